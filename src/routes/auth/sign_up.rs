//! Sign-up route handlers

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Response,
};
use tracing::{error, info};

use crate::backend::{AvatarUpload, SignUpInput};
use crate::error::AppError;
use crate::routes::{AppState, render_template};

#[derive(Template)]
#[template(path = "pages/auth/sign_up.html")]
struct SignUpPageTemplate {
    error: Option<String>,
    done: bool,
}

/// GET /sign-up - Show registration form
pub async fn page() -> Response {
    render_template(SignUpPageTemplate {
        error: None,
        done: false,
    })
}

/// POST /sign-up - Forward the registration to the backend
///
/// Multipart because of the optional avatar upload; the payload is passed
/// through as form data, not re-encoded as JSON.
pub async fn action(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut email = String::new();
    let mut password = String::new();
    let mut name = String::new();
    let mut avatar: Option<AvatarUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "email" => email = field.text().await?,
            "password" => password = field.text().await?,
            "name" => name = field.text().await?,
            "avatar" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("avatar")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                // An empty file input still submits a zero-length part
                if !bytes.is_empty() {
                    avatar = Some(AvatarUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    if email.is_empty() || password.is_empty() || name.is_empty() {
        return Ok(render_template(SignUpPageTemplate {
            error: Some("Rellena todos los campos obligatorios".to_string()),
            done: false,
        }));
    }

    info!(email = %email, "Processing sign-up");

    let reply = state
        .backend
        .sign_up(SignUpInput {
            email,
            password,
            name,
            avatar,
        })
        .await?;

    if !reply.status.is_success() {
        error!(status = %reply.status, "Sign-up rejected by backend");
        return Ok(render_template(SignUpPageTemplate {
            error: Some("No hemos podido crear la cuenta. Revisa los datos.".to_string()),
            done: false,
        }));
    }

    info!("Account created, awaiting activation");

    Ok(render_template(SignUpPageTemplate {
        error: None,
        done: true,
    }))
}
