use askama::Template;
use axum::{
    Router,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware as axum_middleware,
    response::{Html, IntoResponse, Response},
    routing::{any, get, post},
};

use crate::backend::BackendClient;
use crate::middleware::session_guard;

mod auth;
mod dashboard;
mod health;
mod index;
mod proxy;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
}

/// Helper to render templates
pub(crate) fn render_template<T: Template>(t: T) -> Response {
    match t.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
            .into_response(),
    }
}

/// The incoming request's raw `Cookie` header, empty if absent.
pub(crate) fn cookie_header(headers: &HeaderMap) -> &str {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Append backend `Set-Cookie` headers to an outgoing response. The backend
/// owns the session cookies; we only pass them along.
pub(crate) fn relay_set_cookies(mut response: Response, set_cookies: &[String]) -> Response {
    for cookie in set_cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => {
                tracing::warn!("Dropping malformed Set-Cookie header from backend: {}", e);
            }
        }
    }
    response
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundTemplate;

async fn not_found() -> Response {
    let mut response = render_template(NotFoundTemplate);
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/login", get(auth::login::page).post(auth::login::action))
        .route("/logout", post(auth::login::logout))
        .route("/sign-up", get(auth::sign_up::page).post(auth::sign_up::action))
        .route(
            "/reset-password",
            get(auth::reset_password::page).post(auth::reset_password::action),
        )
        .route(
            "/reset-password/{token}",
            get(auth::reset_password::confirm_page).post(auth::reset_password::confirm_action),
        )
        .route("/activate/{token}", get(auth::activate::page))
        .route("/dashboard", get(dashboard::page))
        .route("/api/{*path}", any(proxy::relay))
        .fallback(not_found)
        .layer(axum_middleware::from_fn(session_guard))
        .with_state(state)
}
