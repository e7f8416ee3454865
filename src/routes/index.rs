//! Landing page

use askama::Template;
use axum::response::Response;

use super::render_template;

/// A pricing plan card shown on the landing page.
pub struct Plan {
    pub name: &'static str,
    pub description: &'static str,
    pub price_eur: &'static str,
    pub cta: &'static str,
    pub tag: &'static str,
    pub highlighted: bool,
    pub footer: &'static str,
    pub features: &'static [&'static str],
}

const PLANS: &[Plan] = &[
    Plan {
        name: "Plan Mensual",
        description: "Para empezar a prepararte sin ataduras",
        price_eur: "35",
        cta: "Empezar ahora",
        tag: "",
        highlighted: false,
        footer: "",
        features: &[
            "Temario completo y actualizado",
            "Widget de convocatorias",
            "Generador de casos y tests (limitado)",
            "Buscador de recursos con AI (limitado)",
        ],
    },
    Plan {
        name: "Plan Mensual Pro",
        description: "Desbloquea todo el poder de la IA sin permanencia",
        price_eur: "57",
        cta: "Elegir Plan Pro",
        tag: "MÁS POPULAR",
        highlighted: true,
        footer: "",
        features: &[
            "Todo lo del plan Mensual",
            "Generación con IA ilimitada",
            "Acceso a exámenes de convocatorias anteriores",
            "Descarga de todo el temario en PDF",
        ],
    },
    Plan {
        name: "Plan Anual Pro",
        description: "El compromiso definitivo con tu plaza. El mejor valor.",
        price_eur: "570",
        cta: "Apostar por mi futuro",
        tag: "AHORRA 2 MESES",
        highlighted: false,
        footer: "La inversión más completa, para asegurar tu preparación, \
                 con las mejores herramientas del mercado.",
        features: &[
            "Todo lo del plan Mensual Pro",
            "Generación con IA ilimitada",
            "Acceso a exámenes de convocatorias anteriores",
            "Descarga de todo el temario en PDF",
        ],
    },
];

#[derive(Template)]
#[template(path = "pages/index.html")]
struct IndexTemplate {
    plans: &'static [Plan],
}

/// GET / - Landing page with pricing plans
pub async fn page() -> Response {
    render_template(IndexTemplate { plans: PLANS })
}
