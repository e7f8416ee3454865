//! API proxy: bearer injection, URL joining, verbatim relay

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{StubBackend, StubResponse, create_test_app};

#[tokio::test]
async fn test_proxy_enforces_exactly_one_trailing_slash() {
    for sub_path in ["/api/users/me", "/api/users/me/"] {
        let backend = StubBackend::start().await;
        backend.push(StubResponse::json(200, json!({"ok": true})));
        let app = create_test_app(&backend.base_url);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(sub_path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(backend.calls()[0].path, "/users/me/", "{sub_path}");
    }
}

#[tokio::test]
async fn test_proxy_injects_bearer_from_cookie() {
    let backend = StubBackend::start().await;
    backend.push(StubResponse::json(200, json!({"ok": true})));
    let app = create_test_app(&backend.base_url);

    app.oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/users/me/")
            .header("cookie", "lang=es; access_token=tok123")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let call = &backend.calls()[0];
    assert_eq!(call.authorization.as_deref(), Some("Bearer tok123"));
    // The proxy injects the bearer; it does not forward the cookie jar
    assert_eq!(call.cookie, None);
}

#[tokio::test]
async fn test_proxy_sends_empty_bearer_without_cookie() {
    let backend = StubBackend::start().await;
    backend.push(StubResponse::json(401, json!({"detail": "nope"})));
    let app = create_test_app(&backend.base_url);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/me/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Missing cookie is not an error at this layer; the backend decides
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(backend.calls()[0].authorization.as_deref(), Some("Bearer "));
}

#[tokio::test]
async fn test_proxy_omits_body_for_get_and_head() {
    for method in ["GET", "HEAD"] {
        let backend = StubBackend::start().await;
        backend.push(StubResponse::json(200, json!({"ok": true})));
        let app = create_test_app(&backend.base_url);

        app.oneshot(
            Request::builder()
                .method(method)
                .uri("/api/exams/")
                .body(Body::from("should not be forwarded"))
                .unwrap(),
        )
        .await
        .unwrap();

        assert!(backend.calls()[0].body.is_empty(), "{method}");
    }
}

#[tokio::test]
async fn test_proxy_forwards_body_and_content_type_for_post() {
    let backend = StubBackend::start().await;
    backend.push(StubResponse::json(201, json!({"id": 7})));
    let app = create_test_app(&backend.base_url);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/study/sessions/")
                .header("content-type", "text/plain")
                .body(Body::from("raw payload"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let call = &backend.calls()[0];
    assert_eq!(call.content_type.as_deref(), Some("text/plain"));
    assert_eq!(call.body, b"raw payload");
}

#[tokio::test]
async fn test_proxy_defaults_content_type_to_json() {
    let backend = StubBackend::start().await;
    backend.push(StubResponse::json(200, json!({"ok": true})));
    let app = create_test_app(&backend.base_url);

    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/study/sessions/")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(
        backend.calls()[0].content_type.as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_proxy_relays_status_body_and_cookies_verbatim() {
    let backend = StubBackend::start().await;
    backend.push(
        StubResponse::json(418, json!({"detail": "teapot"}))
            .with_cookie("access_token=relayed; Path=/"),
    );
    let app = create_test_app(&backend.base_url);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/anything/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(
        response.headers().get("set-cookie").unwrap(),
        "access_token=relayed; Path=/"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
        json!({"detail": "teapot"})
    );
}

#[tokio::test]
async fn test_proxy_answers_502_when_backend_is_unreachable() {
    let app = create_test_app("http://127.0.0.1:1");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/me/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
