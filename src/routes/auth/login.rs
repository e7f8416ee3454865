//! Login route handlers

use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::AppError;
use crate::routes::{AppState, cookie_header, relay_set_cookies, render_template};

/// Login page template
#[derive(Template)]
#[template(path = "pages/auth/login.html")]
struct LoginPageTemplate {
    error: Option<String>,
}

/// Login form data
#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// GET /login - Show login form
pub async fn page() -> Response {
    render_template(LoginPageTemplate { error: None })
}

/// POST /login - Forward credentials to the backend
///
/// On success the backend answers with the session cookies; we relay them and
/// send the member to the dashboard.
pub async fn action(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    info!(username = %form.username, "Processing login");

    let reply = state.backend.login(&form.username, &form.password).await?;

    if !reply.status.is_success() {
        error!(status = %reply.status, "Login rejected by backend");
        let message = reply
            .data
            .as_ref()
            .and_then(|data| data.get("detail"))
            .and_then(Value::as_str)
            .unwrap_or("Usuario o contraseña incorrectos")
            .to_string();
        return Ok(render_template(LoginPageTemplate {
            error: Some(message),
        }));
    }

    info!("User logged in successfully");

    let response = Redirect::to("/dashboard").into_response();
    Ok(relay_set_cookies(response, &reply.set_cookies))
}

/// POST /logout - Void the session; the backend clears its cookies
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let reply = state.backend.logout(cookie_header(&headers)).await?;

    info!("User logged out");

    let response = Redirect::to("/").into_response();
    Ok(relay_set_cookies(response, &reply.set_cookies))
}
