//! HTTP client for the backend API
//!
//! All durable state (accounts, sessions, subscriptions) lives in the backend;
//! this module is the only place that talks to it.

use std::time::Duration;

use reqwest::{StatusCode, header};
use serde_json::Value;

use crate::config::BackendConfig;

pub mod auth;
pub mod fetch;

pub use auth::{AvatarUpload, SignUpInput};
pub use fetch::FetchBody;

/// Cookie carrying the short-lived bearer credential. The refresh cookie is
/// set and read by the backend only; we never touch its value.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// A backend response reduced to what page handlers need: the JSON body (if
/// any), the status code, and the `Set-Cookie` headers to relay to the
/// browser.
#[derive(Debug)]
pub struct ApiReply {
    pub data: Option<Value>,
    pub status: StatusCode,
    pub set_cookies: Vec<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Join the backend base with a sub-path, enforcing exactly one trailing
    /// slash (the backend routes all end in `/`).
    pub fn endpoint_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        let mut url = format!("{}/{}", self.base_url, path);
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    }
}

/// Pull a single cookie value out of a raw `Cookie` request header.
pub(crate) fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Collect the `Set-Cookie` header values of a backend response so handlers
/// can relay them to the browser.
pub(crate) fn collect_set_cookies(headers: &header::HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Fold `Set-Cookie` headers into an outgoing `Cookie` header, the way a
/// browser jar would before the next request.
pub(crate) fn apply_set_cookies(cookie_header: &str, set_cookies: &[String]) -> String {
    let mut pairs: Vec<(String, String)> = cookie_header
        .split(';')
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect();

    for set_cookie in set_cookies {
        let Some(first) = set_cookie.split(';').next() else {
            continue;
        };
        let Some((key, value)) = first.split_once('=') else {
            continue;
        };
        let key = key.trim();
        match pairs.iter_mut().find(|(name, _)| name == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Read a backend response defensively: a body that is not valid JSON yields
/// `data = None` paired with the real status code.
pub(crate) async fn read_reply(response: reqwest::Response) -> Result<ApiReply, reqwest::Error> {
    let status = response.status();
    let set_cookies = collect_set_cookies(response.headers());
    let bytes = response.bytes().await?;
    let data = serde_json::from_slice(&bytes).ok();

    Ok(ApiReply {
        data,
        status,
        set_cookies,
    })
}
