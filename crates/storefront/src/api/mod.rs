//! Marketplace REST API client.
//!
//! Every endpoint the storefront binds to lives here:
//!
//! ```text
//! GET  /api/auth/check/                - Identity of the current credential
//! POST /api/login-user/                - Sets the session cookie
//! POST /api/logout-user/               - Clears the session cookie
//! POST /api/send-verification-email/   - Registration step 1
//! POST /api/verify-code-and-register/  - Registration step 2
//! GET  /api/check_store/               - Store ownership
//! POST /api/create_store/              - Create the user's store
//! POST /api/sell_item/                 - List an item (multipart)
//! ```
//!
//! The browser's cookies are forwarded on every call. No retries and no
//! timeouts beyond the transport defaults.

mod credentials;
pub mod types;

pub use credentials::{Credentials, SetCookies};

use std::sync::Arc;

use bazaar_core::{CodeRequest, Identity, Store, ValidListing, VerifiedDraft};
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::config::ApiConfig;
use types::{
    CreateStoreRequest, ErrorBody, LoginRequest, SendVerificationRequest, StoreStatus,
    VerifyAndRegisterRequest,
};

/// Errors that can occur when calling the marketplace API.
///
/// `Http` and `Malformed` are transport failures; `Rejected` is an
/// application error reported by the server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The server answered with a non-2xx status.
    #[error("API error: {status} - {}", message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
}

impl ApiError {
    /// Returns `true` for network and parse failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Malformed(_))
    }

    /// The server's own `error` message, when it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Http(_) | Self::Malformed(_) => None,
        }
    }
}

/// Client for the marketplace REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn get(&self, path: &str, credentials: &Credentials) -> reqwest::RequestBuilder {
        credentials.apply(self.inner.client.get(self.url(path)))
    }

    fn post(&self, path: &str, credentials: &Credentials) -> reqwest::RequestBuilder {
        credentials.apply(self.inner.client.post(self.url(path)))
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Ask whether the forwarded credential is valid.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a body that
    /// is not an identity object.
    #[instrument(skip_all)]
    pub async fn check_session(&self, credentials: &Credentials) -> Result<Identity, ApiError> {
        let response = self.get("/api/auth/check/", credentials).send().await?;
        json_body(response).await
    }

    /// Log in. On success, returns the cookies the API set.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx status.
    #[instrument(skip(self, credentials, password))]
    pub async fn login(
        &self,
        credentials: &Credentials,
        email: &str,
        password: &SecretString,
    ) -> Result<SetCookies, ApiError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let response = self
            .post("/api/login-user/", credentials)
            .json(&body)
            .send()
            .await?;
        status_only(response).await
    }

    /// Log out. On success, returns the cookies the API cleared.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx status.
    #[instrument(skip_all)]
    pub async fn logout(&self, credentials: &Credentials) -> Result<SetCookies, ApiError> {
        let response = self.post("/api/logout-user/", credentials).send().await?;
        status_only(response).await
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Ask the API to email a verification code.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a non-JSON
    /// body.
    #[instrument(skip(self, credentials, request), fields(email = %request.email))]
    pub async fn send_verification_email(
        &self,
        credentials: &Credentials,
        request: CodeRequest<'_>,
    ) -> Result<(), ApiError> {
        let body = SendVerificationRequest {
            email: request.email,
            name: request.name,
        };
        let response = self
            .post("/api/send-verification-email/", credentials)
            .json(&body)
            .send()
            .await?;
        json_body::<serde_json::Value>(response).await.map(drop)
    }

    /// Submit the verification code together with the account details.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a non-JSON
    /// body.
    #[instrument(skip(self, credentials, verified))]
    pub async fn verify_and_register(
        &self,
        credentials: &Credentials,
        verified: VerifiedDraft<'_>,
        timezone: &str,
    ) -> Result<(), ApiError> {
        let draft = verified.draft();
        let body = VerifyAndRegisterRequest {
            name: &draft.name,
            email: &draft.email,
            password: draft.password.expose_secret(),
            code: &draft.verification_code,
            accepted_terms: draft.accepted_terms,
            timezone,
        };
        let response = self
            .post("/api/verify-code-and-register/", credentials)
            .json(&body)
            .send()
            .await?;
        json_body::<serde_json::Value>(response).await.map(drop)
    }

    // =========================================================================
    // Store
    // =========================================================================

    /// Read the user's store ownership.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a malformed
    /// body.
    #[instrument(skip_all)]
    pub async fn check_store(&self, credentials: &Credentials) -> Result<Option<Store>, ApiError> {
        let response = self.get("/api/check_store/", credentials).send().await?;
        let status: StoreStatus = json_body(response).await?;
        Ok(Store::from_ownership(status.has_store, status.store_name))
    }

    /// Create a store for the user.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a non-JSON
    /// body.
    #[instrument(skip(self, credentials))]
    pub async fn create_store(
        &self,
        credentials: &Credentials,
        store_name: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .post("/api/create_store/", credentials)
            .json(&CreateStoreRequest { store_name })
            .send()
            .await?;
        json_body::<serde_json::Value>(response).await.map(drop)
    }

    /// List an item for sale.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, an unusable image content type, a
    /// non-2xx status, or a non-JSON body.
    #[instrument(
        skip_all,
        fields(
            item_name = %listing.item_name(),
            price = %listing.price(),
            image_bytes = listing.image().bytes.len(),
        )
    )]
    pub async fn sell_item(
        &self,
        credentials: &Credentials,
        listing: ValidListing,
    ) -> Result<(), ApiError> {
        let (item_name, price, image) = listing.into_parts();

        let mut part = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .text("item_name", item_name)
            .text("price", price)
            .part("image", part);

        let response = self
            .post("/api/sell_item/", credentials)
            .multipart(form)
            .send()
            .await?;
        json_body::<serde_json::Value>(response).await.map(drop)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Returns `true` if the API answers at all, whatever the status.
    pub async fn is_reachable(&self) -> bool {
        self.get("/api/auth/check/", &Credentials::none())
            .send()
            .await
            .is_ok()
    }
}

// =============================================================================
// Response Handling
// =============================================================================

/// Turn a non-2xx response into `ApiError::Rejected`.
async fn rejected(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    tracing::debug!(
        status = %status,
        body = %body.chars().take(200).collect::<String>(),
        "Marketplace API returned non-success status"
    );

    ApiError::Rejected {
        status: status.as_u16(),
        message: ErrorBody::message(&body),
    }
}

/// Success is judged by status alone; the body is ignored.
async fn status_only(response: reqwest::Response) -> Result<SetCookies, ApiError> {
    if !response.status().is_success() {
        return Err(rejected(response).await);
    }
    Ok(SetCookies::from_headers(response.headers()))
}

/// Success requires a 2xx status and a body that parses as `T`.
async fn json_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(rejected(response).await);
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let rejected = ApiError::Rejected {
            status: 400,
            message: Some("Invalid code".to_string()),
        };
        assert!(!rejected.is_transport());
        assert_eq!(rejected.server_message(), Some("Invalid code"));
        assert_eq!(rejected.to_string(), "API error: 400 - Invalid code");

        let malformed = ApiError::Malformed(serde_json::from_str::<()>("nope").unwrap_err());
        assert!(malformed.is_transport());
        assert_eq!(malformed.server_message(), None);
    }

    #[test]
    fn test_url_joins_base_without_double_slash() {
        let config = ApiConfig::new("http://127.0.0.1:8000/").unwrap();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.url("/api/auth/check/"),
            "http://127.0.0.1:8000/api/auth/check/"
        );
    }
}
