//! Password reset route handlers

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::routes::{AppState, render_template};

#[derive(Template)]
#[template(path = "pages/auth/reset_password.html")]
struct ResetPasswordPageTemplate {
    sent: bool,
}

#[derive(Template)]
#[template(path = "pages/auth/reset_password_confirm.html")]
struct ResetPasswordConfirmTemplate {
    token: String,
    error: Option<String>,
    done: bool,
}

#[derive(Deserialize)]
pub struct ResetRequestForm {
    email: String,
}

#[derive(Deserialize)]
pub struct NewPasswordForm {
    new_password: String,
}

/// GET /reset-password - Show email form
pub async fn page() -> Response {
    render_template(ResetPasswordPageTemplate { sent: false })
}

/// POST /reset-password - Ask the backend to send a reset email
///
/// The backend reply is reported as success either way, so the page looks the
/// same whether or not the address was registered.
pub async fn action(
    State(state): State<AppState>,
    Form(form): Form<ResetRequestForm>,
) -> Result<Response, AppError> {
    info!("Processing password reset request");

    state.backend.request_password_reset(&form.email).await?;

    Ok(render_template(ResetPasswordPageTemplate { sent: true }))
}

/// GET /reset-password/{token} - Show new-password form
pub async fn confirm_page(Path(token): Path<String>) -> Response {
    render_template(ResetPasswordConfirmTemplate {
        token,
        error: None,
        done: false,
    })
}

/// POST /reset-password/{token} - Set the new password
pub async fn confirm_action(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(form): Form<NewPasswordForm>,
) -> Result<Response, AppError> {
    let reply = state
        .backend
        .update_password(&token, &form.new_password)
        .await?;

    if !reply.status.is_success() {
        error!(status = %reply.status, "Password update rejected by backend");
        return Ok(render_template(ResetPasswordConfirmTemplate {
            token,
            error: Some(
                "No hemos podido actualizar la contraseña. El enlace puede haber caducado."
                    .to_string(),
            ),
            done: false,
        }));
    }

    info!("Password updated");

    Ok(render_template(ResetPasswordConfirmTemplate {
        token,
        error: None,
        done: true,
    }))
}
