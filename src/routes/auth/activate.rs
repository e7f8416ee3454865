//! Account activation route handler

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Response,
};
use tracing::{error, info};

use crate::error::AppError;
use crate::routes::{AppState, render_template};

#[derive(Template)]
#[template(path = "pages/auth/activate.html")]
struct ActivatePageTemplate {
    activated: bool,
}

/// GET /activate/{token} - Confirm the account with the emailed token
pub async fn page(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, AppError> {
    let reply = state.backend.activate(&token).await?;
    let activated = reply.status.is_success();

    if activated {
        info!("Account activated");
    } else {
        error!(status = %reply.status, "Activation rejected by backend");
    }

    Ok(render_template(ActivatePageTemplate { activated }))
}
