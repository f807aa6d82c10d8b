//! Browser credentials passed through to the marketplace API.
//!
//! The marketplace authenticates with a session cookie the storefront never
//! reads. Incoming `Cookie` headers are forwarded as-is (minus the
//! storefront's own session cookie), and `Set-Cookie` headers from the API
//! are relayed back to the browser unchanged.

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponseParts, ResponseParts},
};

use crate::middleware::session::SESSION_COOKIE_NAME;

/// The `Cookie` header to send upstream, if the browser sent any cookies.
#[derive(Debug, Clone, Default)]
pub struct Credentials(Option<HeaderValue>);

impl Credentials {
    /// No cookies.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Collect the browser's cookies, dropping the cookie named `exclude`.
    ///
    /// Multiple `Cookie` headers (HTTP/2 splits them) are joined with `"; "`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, exclude: &str) -> Self {
        let prefix = format!("{exclude}=");
        let pairs: Vec<&str> = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .map(str::trim)
            .filter(|pair| !pair.is_empty() && !pair.starts_with(&prefix))
            .collect();

        if pairs.is_empty() {
            return Self::none();
        }

        Self(HeaderValue::from_str(&pairs.join("; ")).ok())
    }

    /// The header value to attach, if any.
    #[must_use]
    pub const fn header(&self) -> Option<&HeaderValue> {
        self.0.as_ref()
    }

    /// Attach the cookies to an outgoing request.
    #[must_use]
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.0 {
            Some(cookie) => request.header(COOKIE, cookie.clone()),
            None => request,
        }
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, SESSION_COOKIE_NAME))
    }
}

/// `Set-Cookie` headers returned by the marketplace API.
#[derive(Debug, Clone, Default)]
pub struct SetCookies(Vec<HeaderValue>);

impl SetCookies {
    /// Take every `Set-Cookie` header from an API response.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(headers.get_all(SET_COOKIE).iter().cloned().collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoResponseParts for SetCookies {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.0 {
            res.headers_mut().append(SET_COOKIE, cookie);
        }
        Ok(res)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_no_cookies() {
        let credentials = Credentials::from_headers(&HeaderMap::new(), SESSION_COOKIE_NAME);
        assert!(credentials.header().is_none());
    }

    #[test]
    fn test_forwards_cookies_verbatim() {
        let credentials =
            Credentials::from_headers(&headers(&["sessionid=abc123; csrftoken=xyz"]), "bazaar_session");
        assert_eq!(
            credentials.header().unwrap(),
            "sessionid=abc123; csrftoken=xyz"
        );
    }

    #[test]
    fn test_drops_storefront_session_cookie() {
        let credentials = Credentials::from_headers(
            &headers(&["bazaar_session=local; sessionid=abc123"]),
            "bazaar_session",
        );
        assert_eq!(credentials.header().unwrap(), "sessionid=abc123");
    }

    #[test]
    fn test_only_storefront_cookie_means_none() {
        let credentials =
            Credentials::from_headers(&headers(&["bazaar_session=local"]), "bazaar_session");
        assert!(credentials.header().is_none());
    }

    #[test]
    fn test_joins_multiple_cookie_headers() {
        let credentials =
            Credentials::from_headers(&headers(&["a=1", "b=2"]), "bazaar_session");
        assert_eq!(credentials.header().unwrap(), "a=1; b=2");
    }

    #[test]
    fn test_set_cookies_collects_all() {
        let mut response_headers = HeaderMap::new();
        response_headers.append(SET_COOKIE, HeaderValue::from_static("sessionid=abc; Path=/"));
        response_headers.append(SET_COOKIE, HeaderValue::from_static("csrftoken=xyz; Path=/"));

        let cookies = SetCookies::from_headers(&response_headers);
        assert_eq!(cookies.len(), 2);
        assert!(!cookies.is_empty());
    }
}
