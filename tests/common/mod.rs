//! Shared test fixtures: a scripted stub backend and app construction
//!
//! The stub backend answers from a queue of scripted responses (the refresh
//! endpoint has its own queue) and records every call it receives, so tests
//! can assert exact call counts and forwarded headers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use opoprep_web::backend::BackendClient;
use opoprep_web::config::{BackendConfig, Config, ObservabilityConfig, ServerConfig};

pub const REFRESH_PATH: &str = "/auth/token/refresh/";

/// One scripted backend answer.
#[derive(Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub set_cookies: Vec<String>,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: serde_json::to_vec(&body).unwrap(),
            set_cookies: Vec::new(),
        }
    }

    /// A response whose body is not valid JSON.
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.as_bytes().to_vec(),
            set_cookies: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, set_cookie: &str) -> Self {
        self.set_cookies.push(set_cookie.to_string());
        self
    }
}

/// A call recorded by the stub backend.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone, Default)]
struct StubState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    script: Arc<Mutex<VecDeque<StubResponse>>>,
    refresh_script: Arc<Mutex<VecDeque<StubResponse>>>,
}

pub struct StubBackend {
    pub base_url: String,
    state: StubState,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Queue the next answer for any non-refresh endpoint.
    pub fn push(&self, response: StubResponse) {
        self.state.script.lock().unwrap().push_back(response);
    }

    /// Queue the next answer for the refresh endpoint.
    pub fn push_refresh(&self, response: StubResponse) {
        self.state.refresh_script.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    pub fn refresh_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.path == REFRESH_PATH)
            .count()
    }
}

async fn handle(State(state): State<StubState>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let headers = request.headers().clone();
    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    let header_str = |name: header::HeaderName| {
        headers
            .get(&name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.calls.lock().unwrap().push(RecordedCall {
        method,
        path: path.clone(),
        authorization: header_str(header::AUTHORIZATION),
        cookie: header_str(header::COOKIE),
        content_type: header_str(header::CONTENT_TYPE),
        body,
    });

    let scripted = if path == REFRESH_PATH {
        state.refresh_script.lock().unwrap().pop_front()
    } else {
        state.script.lock().unwrap().pop_front()
    };

    match scripted {
        Some(stub) => {
            let mut response = Response::new(Body::from(stub.body));
            *response.status_mut() = stub.status;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                "application/json".parse().unwrap(),
            );
            for cookie in &stub.set_cookies {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, cookie.parse().unwrap());
            }
            response
        }
        None => (
            StatusCode::OK,
            axum::Json(serde_json::json!({"ok": true})),
        )
            .into_response(),
    }
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4321,
        },
        backend: BackendConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(base_url: &str) -> Router {
    opoprep_web::create_app(test_config(base_url)).unwrap()
}

pub fn backend_client(base_url: &str) -> BackendClient {
    BackendClient::new(&BackendConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}
