//! Authenticated fetch with a single transparent token refresh
//!
//! A 401 on the first attempt triggers exactly one call to the refresh
//! endpoint; if that succeeds the original request is reissued once and its
//! result returned as-is. Everything else passes through untouched, so a
//! logical call costs at most three requests on the wire.

use reqwest::{Method, StatusCode, header};

use super::{
    ACCESS_TOKEN_COOKIE, ApiReply, BackendClient, apply_set_cookies, collect_set_cookies,
    cookie_value, read_reply,
};

const REFRESH_PATH: &str = "/auth/token/refresh/";

/// Request body for an authenticated fetch. `Raw` keeps the payload exactly
/// as received (multipart uploads and the like); `Json` serializes.
#[derive(Debug, Clone)]
pub enum FetchBody {
    Json(serde_json::Value),
    Raw {
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl BackendClient {
    /// Perform one logical request with at-most-one refresh-and-retry.
    ///
    /// `cookie_header` is the incoming request's `Cookie` header; it stands in
    /// for the browser's `credentials: 'include'` and carries both the access
    /// token and the backend-managed refresh cookie. Any `Set-Cookie` headers
    /// produced along the way come back in the reply so the caller can relay
    /// them to the browser.
    pub async fn fetch_jwt(
        &self,
        method: Method,
        path: &str,
        body: Option<FetchBody>,
        cookie_header: &str,
    ) -> Result<ApiReply, reqwest::Error> {
        let first = self
            .send_authenticated(method.clone(), path, body.as_ref(), cookie_header)
            .await?;

        // Normal flow for non-401 responses, success or failure alike
        if first.status() != StatusCode::UNAUTHORIZED {
            return read_reply(first).await;
        }

        tracing::debug!(path, "Got 401, attempting token refresh");

        // Exactly one refresh attempt: same headers, no body
        let mut refresh_request = self
            .http()
            .post(self.endpoint_url(REFRESH_PATH))
            .header(header::ACCEPT, "application/json");
        if !cookie_header.is_empty() {
            refresh_request = refresh_request.header(header::COOKIE, cookie_header);
        }
        let refresh = refresh_request.send().await?;

        if !refresh.status().is_success() {
            tracing::debug!(
                status = %refresh.status(),
                "Token refresh failed, surfacing original 401"
            );
            return read_reply(first).await;
        }

        // The refresh response re-issued the access token; fold it into the
        // credentials for the retry the way the browser jar would.
        let refresh_cookies = collect_set_cookies(refresh.headers());
        let refreshed_header = apply_set_cookies(cookie_header, &refresh_cookies);

        let retry = self
            .send_authenticated(method, path, body.as_ref(), &refreshed_header)
            .await?;
        let mut reply = read_reply(retry).await?;

        // Relay the refresh cookies first so the retry's own cookies win
        let mut set_cookies = refresh_cookies;
        set_cookies.append(&mut reply.set_cookies);
        reply.set_cookies = set_cookies;

        Ok(reply)
    }

    async fn send_authenticated(
        &self,
        method: Method,
        path: &str,
        body: Option<&FetchBody>,
        cookie_header: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let token = cookie_value(cookie_header, ACCESS_TOKEN_COOKIE).unwrap_or_default();

        let mut request = self
            .http()
            .request(method, self.endpoint_url(path))
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"));

        if !cookie_header.is_empty() {
            request = request.header(header::COOKIE, cookie_header);
        }

        match body {
            Some(FetchBody::Json(value)) => request = request.json(value),
            Some(FetchBody::Raw {
                content_type,
                bytes,
            }) => {
                request = request
                    .header(header::CONTENT_TYPE, content_type)
                    .body(bytes.clone());
            }
            None => {}
        }

        request.send().await
    }
}
