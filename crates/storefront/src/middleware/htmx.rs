//! htmx request detection and navigation responses.
//!
//! Pages are mounted by htmx fetching a view fragment, so a redirect has to
//! be spelled differently depending on who asked: htmx follows `HX-Redirect`
//! with a full page load, a plain browser request follows a `303`.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use bazaar_core::Route;

/// Set by htmx on every request it makes.
pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
/// Tells htmx to load a new page.
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");
/// Fires client-side events after the swap.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Whether the request came from htmx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl HxRequest {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(headers.get(HX_REQUEST).is_some_and(|v| v == "true"))
    }
}

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Send the browser to another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigate {
    pub to: Route,
    pub htmx: bool,
}

impl Navigate {
    #[must_use]
    pub const fn to(to: Route, htmx: HxRequest) -> Self {
        Self { to, htmx: htmx.0 }
    }

    /// Navigate, handing htmx a body to swap while the new page loads.
    /// Plain requests get the bare redirect.
    pub fn with_body(self, body: impl IntoResponse) -> Response {
        if self.htmx {
            ([(HX_REDIRECT, HeaderValue::from_static(self.to.path()))], body).into_response()
        } else {
            self.into_response()
        }
    }
}

impl IntoResponse for Navigate {
    fn into_response(self) -> Response {
        if self.htmx {
            (
                StatusCode::OK,
                [(HX_REDIRECT, HeaderValue::from_static(self.to.path()))],
            )
                .into_response()
        } else {
            Redirect::to(self.to.path()).into_response()
        }
    }
}
