//! Integration test harness for the Bazaar storefront.
//!
//! Each test gets its own `wiremock` server standing in for the marketplace
//! API and a storefront router pointed at it. Requests are driven through
//! the router in-process with `tower::ServiceExt::oneshot`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{
        HeaderMap, Method, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        request,
    },
};
use bazaar_storefront::{config::StorefrontConfig, state::AppState};
use tower::ServiceExt;
use wiremock::MockServer;

/// Upstream cookie the marketplace authenticates with.
pub const UPSTREAM_COOKIE: &str = "sessionid=abc123";

/// Storefront plus mock marketplace.
pub struct TestContext {
    pub upstream: MockServer,
    pub app: Router,
}

impl TestContext {
    /// Start a mock marketplace and build a storefront against it.
    pub async fn new() -> Self {
        let upstream = MockServer::start().await;
        let app = storefront_for(&upstream.uri());
        Self { upstream, app }
    }

    /// Send one request through the storefront.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }
}

/// Build a storefront whose marketplace lives at `api_base_url`.
pub fn storefront_for(api_base_url: &str) -> Router {
    let api_base_url = api_base_url.to_string();
    let config = StorefrontConfig::from_source(|key| {
        (key == "BAZAAR_API_BASE_URL").then(|| api_base_url.clone())
    })
    .unwrap();

    bazaar_storefront::app(AppState::new(config).unwrap())
}

/// A collected storefront response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Target of an htmx navigation.
    pub fn hx_redirect(&self) -> Option<&str> {
        self.header("hx-redirect")
    }

    /// Target of a plain redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// The storefront's own session cookie as a `name=value` pair.
    pub fn storefront_session(&self) -> Option<String> {
        self.set_cookies()
            .into_iter()
            .find(|c| c.starts_with("bazaar_session="))
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

// =============================================================================
// Request Builders
// =============================================================================

/// A request as htmx sends it.
pub fn htmx(method: Method, uri: &str) -> request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("hx-request", "true")
}

/// A request as a browser navigation sends it.
pub fn plain(method: Method, uri: &str) -> request::Builder {
    Request::builder().method(method).uri(uri)
}

/// Attach cookies.
pub fn with_cookies(builder: request::Builder, cookies: &[&str]) -> request::Builder {
    builder.header(COOKIE, cookies.join("; "))
}

/// Finish a request with no body.
pub fn empty(builder: request::Builder) -> Request<Body> {
    builder.body(Body::empty()).unwrap()
}

/// Finish a request with a urlencoded form body.
pub fn form(builder: request::Builder, body: &str) -> Request<Body> {
    builder
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A file part for [`multipart`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

const BOUNDARY: &str = "bazaar-test-boundary";

/// Finish a request with a multipart form body.
pub fn multipart(
    builder: request::Builder,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    builder
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
