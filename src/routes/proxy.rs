//! Same-origin relay to the backend API
//!
//! Lets browser-side code call `/api/...` on this origin instead of talking
//! cross-origin to the backend. The bearer credential is injected from the
//! `access_token` cookie; everything else passes through verbatim. No retry
//! and no interpretation of status codes happens here - that is the fetch
//! client's job.

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use super::AppState;
use crate::backend::ACCESS_TOKEN_COOKIE;

/// ANY /api/{*path} - forward the request to the backend and relay the answer
pub async fn relay(
    State(state): State<AppState>,
    Path(path): Path<String>,
    jar: CookieJar,
    request: Request,
) -> Response {
    let method = request.method().clone();

    // Whatever token is present is trusted here; the backend validates it
    let token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    // GET and HEAD never carry a body, even if the incoming request has one
    let body = if method == Method::GET || method == Method::HEAD {
        None
    } else {
        match axum::body::to_bytes(request.into_body(), usize::MAX).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Failed to read proxied request body: {}", e);
                return StatusCode::BAD_REQUEST.into_response();
            }
        }
    };

    let url = state.backend.endpoint_url(&path);
    tracing::debug!(%method, %url, "Proxying request to backend");

    let mut upstream = state
        .backend
        .http()
        .request(method, &url)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::ACCEPT, "application/json");
    if let Some(bytes) = body {
        upstream = upstream.body(bytes);
    }

    let backend_response = match upstream.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(%url, "Backend unreachable: {}", e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = backend_response.status();
    let mut headers = backend_response.headers().clone();
    // Hop-by-hop headers must not survive the relay; lengths are recomputed
    for name in [
        header::CONNECTION,
        header::TRANSFER_ENCODING,
        header::CONTENT_LENGTH,
    ] {
        headers.remove(&name);
    }

    let bytes = match backend_response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(%url, "Failed to read backend response body: {}", e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
