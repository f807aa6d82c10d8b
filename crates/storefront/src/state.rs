//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::api::{ApiClient, ApiError};
use crate::config::StorefrontConfig;
use crate::services::{AccountAggregator, AuthOracle, MutationFlows};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every service wraps the same
/// API client and so shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    oracle: AuthOracle,
    accounts: AccountAggregator,
    flows: MutationFlows,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                oracle: AuthOracle::new(api.clone()),
                accounts: AccountAggregator::new(api.clone()),
                flows: MutationFlows::new(api.clone()),
                api,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the marketplace API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the session oracle.
    #[must_use]
    pub fn oracle(&self) -> &AuthOracle {
        &self.inner.oracle
    }

    /// Get a reference to the profile aggregator.
    #[must_use]
    pub fn accounts(&self) -> &AccountAggregator {
        &self.inner.accounts
    }

    /// Get a reference to the mutation flows.
    #[must_use]
    pub fn flows(&self) -> &MutationFlows {
        &self.inner.flows
    }
}

impl FromRef<AppState> for AuthOracle {
    fn from_ref(state: &AppState) -> Self {
        state.oracle().clone()
    }
}
