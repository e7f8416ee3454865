//! Session route guard
//!
//! Gates every incoming page request on the presence of a non-empty
//! `access_token` cookie. Presence is the whole check: validity and expiry
//! are the backend's problem, surfaced later as a 401 on the first data call.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::backend::ACCESS_TOKEN_COOKIE;

/// Paths that require a session.
const PROTECTED_ROUTES: &[&str] = &["/dashboard"];

/// Paths a signed-in member has no business visiting.
const REDIRECT_IF_AUTHENTICATED: &[&str] = &["/login", "/sign-up", "/reset-password", "/activate"];

const LOGIN_PATH: &str = "/login";
const DASHBOARD_PATH: &str = "/dashboard";

fn is_route(path: &str, routes: &[&str]) -> bool {
    routes.iter().any(|route| path.starts_with(route))
}

fn has_session(jar: &CookieJar) -> bool {
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| !cookie.value().is_empty())
        .unwrap_or(false)
}

/// Route guard applied to the whole router.
///
/// Evaluated before any page logic: protected paths without a session
/// redirect to the login page, auth pages visited with a session redirect to
/// the dashboard, everything else continues unmodified.
pub async fn session_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if is_route(path, PROTECTED_ROUTES) && !has_session(&jar) {
        tracing::debug!(path, "No session cookie, redirecting to login");
        return Redirect::to(LOGIN_PATH).into_response();
    }

    if is_route(path, REDIRECT_IF_AUTHENTICATED) && has_session(&jar) {
        tracing::debug!(path, "Already signed in, redirecting to dashboard");
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    next.run(request).await
}
