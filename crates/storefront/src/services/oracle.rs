//! Session oracle.
//!
//! The only source of truth for whether a browser is logged in. Every guarded
//! view asks once per mount; nothing is cached between mounts.

use bazaar_core::Session;
use tracing::instrument;

use crate::api::{ApiClient, ApiError, Credentials};

/// Resolves the forwarded credential to a [`Session`].
#[derive(Clone)]
pub struct AuthOracle {
    api: ApiClient,
}

impl AuthOracle {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ask the marketplace who the credential belongs to.
    ///
    /// Fails closed: a non-2xx status, a network error and an unreadable body
    /// all mean [`Session::Unauthenticated`].
    #[instrument(skip_all)]
    pub async fn check_session(&self, credentials: &Credentials) -> Session {
        match self.api.check_session(credentials).await {
            Ok(identity) => Session::Authenticated(identity),
            Err(ApiError::Rejected { status, .. }) => {
                tracing::debug!(status, "No valid session");
                Session::Unauthenticated
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed, treating as logged out");
                Session::Unauthenticated
            }
        }
    }
}
