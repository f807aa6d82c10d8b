//! Health checks and response headers.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use bazaar_integration_tests::{TestContext, empty, plain, storefront_for};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_liveness() {
    let ctx = TestContext::new().await;

    let response = ctx.send(empty(plain(Method::GET, "/health"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_ready_when_marketplace_answers() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx.send(empty(plain(Method::GET, "/health/ready"))).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_when_marketplace_unreachable() {
    let ctx = TestContext {
        upstream: MockServer::start().await,
        app: storefront_for("http://127.0.0.1:9"),
    };

    let response = ctx.send(empty(plain(Method::GET, "/health/ready"))).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_security_headers_on_pages() {
    let ctx = TestContext::new().await;

    let response = ctx.send(empty(plain(Method::GET, "/login"))).await;

    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(response.header("cache-control"), Some("no-store"));
    assert!(
        response
            .header("content-security-policy")
            .unwrap()
            .contains("https://unpkg.com")
    );
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_static_assets_are_cached() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(empty(plain(Method::GET, "/static/js/timezone.js")))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("cache-control").unwrap().contains("immutable"));
    assert!(response.body.contains("timezone"));
}
