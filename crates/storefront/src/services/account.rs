//! Profile aggregation.
//!
//! The profile page shows two independent reads side by side: who the user
//! is and whether they own a store. Both are issued concurrently and each
//! degrades to its own default, so one failing never blanks the other.

use bazaar_core::AccountView;
use tracing::instrument;

use crate::api::{ApiClient, Credentials};
use crate::services::flows::{CREATE_STORE, FlowFailure};

/// Builds [`AccountView`]s and applies store creation to them.
#[derive(Clone)]
pub struct AccountAggregator {
    api: ApiClient,
}

impl AccountAggregator {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Read identity and store ownership concurrently and merge them.
    ///
    /// Never fails. A failed identity read shows as [`bazaar_core::GUEST_NAME`],
    /// a failed store read as no store.
    #[instrument(skip_all)]
    pub async fn load(&self, credentials: &Credentials) -> AccountView {
        let (identity, store) = tokio::join!(
            self.api.check_session(credentials),
            self.api.check_store(credentials),
        );

        let identity = identity
            .inspect_err(|e| tracing::warn!(error = %e, "Identity read failed, showing guest"))
            .ok();
        let store = store
            .inspect_err(|e| tracing::warn!(error = %e, "Store read failed, showing no store"))
            .ok()
            .flatten();

        AccountView::merge(identity.as_ref(), store)
    }

    /// Create a store and record it on `view`, if one is mounted.
    ///
    /// Only the emptiness check trims; the name is sent and recorded as
    /// typed. On success `view` is updated in place and ownership is not
    /// re-read.
    ///
    /// # Errors
    ///
    /// Returns [`FlowFailure::Invalid`] for a blank name (no request is
    /// made), otherwise the API failure mapped through [`CREATE_STORE`].
    #[instrument(skip(self, credentials, view))]
    pub async fn create_store(
        &self,
        credentials: &Credentials,
        view: Option<&mut AccountView>,
        store_name: &str,
    ) -> Result<(), FlowFailure> {
        if store_name.trim().is_empty() {
            return Err(FlowFailure::Invalid(EMPTY_STORE_NAME));
        }

        self.api
            .create_store(credentials, store_name)
            .await
            .map_err(|e| CREATE_STORE.failure(&e))?;

        tracing::info!(store_name, "Store created");
        if let Some(view) = view {
            view.record_store_created(store_name);
        }
        Ok(())
    }
}

/// Shown when the store name is blank after trimming.
pub const EMPTY_STORE_NAME: &str = "Store name cannot be empty.";
