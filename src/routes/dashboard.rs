//! Member dashboard (protected)

use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::Value;

use super::{AppState, cookie_header, relay_set_cookies, render_template};
use crate::error::AppError;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
struct DashboardTemplate {
    name: String,
    email: String,
    avatar: Option<String>,
}

/// GET /dashboard - Profile view backed by the backend's /users/me/
///
/// The route guard only checked cookie presence; a stale token surfaces here
/// as a 401 that the fetch client already tried to refresh once. If it still
/// comes back 401 the session is gone for good and we send the member back to
/// the login page.
pub async fn page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let cookies = cookie_header(&headers);
    let reply = state.backend.profile(cookies).await?;

    if reply.status == StatusCode::UNAUTHORIZED {
        tracing::info!("Session expired beyond refresh, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    }

    if !reply.status.is_success() {
        tracing::error!(status = %reply.status, "Profile fetch failed");
        return Err(AppError::Internal(format!(
            "profile fetch returned {}",
            reply.status
        )));
    }

    let profile = reply.data.unwrap_or(Value::Null);
    let response = render_template(DashboardTemplate {
        name: json_str(&profile, "name"),
        email: json_str(&profile, "email"),
        avatar: profile
            .get("avatar")
            .and_then(Value::as_str)
            .map(str::to_string),
    });

    // A transparent refresh may have re-issued the access token
    Ok(relay_set_cookies(response, &reply.set_cookies))
}

fn json_str(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
