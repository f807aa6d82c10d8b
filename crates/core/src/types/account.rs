//! Account view model for the profile page.

use serde::{Deserialize, Serialize};

use crate::types::session::Identity;

/// Name shown when the identity read fails or carries no name.
pub const GUEST_NAME: &str = "Guest";

/// A store owned by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Store display name.
    pub name: String,
    /// Whether the user owns a store.
    pub has_store: bool,
}

impl Store {
    /// A store the user owns.
    #[must_use]
    pub fn owned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_store: true,
        }
    }

    /// Build the store from an ownership read.
    ///
    /// Returns `None` when the user has no store, whatever name came with it.
    #[must_use]
    pub fn from_ownership(has_store: bool, store_name: Option<String>) -> Option<Self> {
        has_store.then(|| Self::owned(store_name.unwrap_or_default()))
    }
}

/// Merged identity and store-ownership state for one profile mount.
///
/// Built from two independent reads. A failed read never fails the view:
/// the name falls back to [`GUEST_NAME`] and the store to absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    /// Display name.
    pub name: String,
    /// The user's store, if any.
    pub store: Option<Store>,
}

impl AccountView {
    /// The view shown when both reads failed.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            store: None,
        }
    }

    /// Merge the two reads into a view, substituting defaults for failures.
    #[must_use]
    pub fn merge(identity: Option<&Identity>, store: Option<Store>) -> Self {
        let name = identity
            .and_then(Identity::display_name)
            .unwrap_or(GUEST_NAME)
            .to_string();

        Self {
            name,
            store: store.filter(|s| s.has_store),
        }
    }

    /// Record a successful store creation.
    ///
    /// The server's 2xx is trusted: no re-read of store ownership follows.
    pub fn record_store_created(&mut self, name: impl Into<String>) {
        self.store = Some(Store::owned(name));
    }

    /// Returns `true` when the user owns a store.
    #[must_use]
    pub const fn has_store(&self) -> bool {
        self.store.is_some()
    }
}

impl Default for AccountView {
    fn default() -> Self {
        Self::guest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ownership() {
        assert_eq!(
            Store::from_ownership(true, Some("Acme".to_string())),
            Some(Store::owned("Acme"))
        );
        assert_eq!(Store::from_ownership(false, Some("Acme".to_string())), None);
        assert_eq!(Store::from_ownership(false, None), None);
    }

    #[test]
    fn test_merge_both_reads_succeeded() {
        let identity = Identity::named("Ada");
        let view = AccountView::merge(Some(&identity), Some(Store::owned("Acme")));

        assert_eq!(view.name, "Ada");
        assert_eq!(view.store, Some(Store::owned("Acme")));
    }

    #[test]
    fn test_merge_substitutes_defaults() {
        let view = AccountView::merge(None, None);
        assert_eq!(view, AccountView::guest());
        assert_eq!(view.name, "Guest");
    }

    #[test]
    fn test_merge_identity_failure_keeps_store() {
        let view = AccountView::merge(None, Some(Store::owned("Acme")));
        assert_eq!(view.name, GUEST_NAME);
        assert!(view.has_store());
    }

    #[test]
    fn test_merge_nameless_identity_is_guest() {
        let view = AccountView::merge(Some(&Identity::default()), None);
        assert_eq!(view.name, GUEST_NAME);
    }

    #[test]
    fn test_record_store_created() {
        let mut view = AccountView::merge(Some(&Identity::named("Ada")), None);
        assert!(!view.has_store());

        view.record_store_created("Acme");

        assert_eq!(
            view.store,
            Some(Store {
                name: "Acme".to_string(),
                has_store: true,
            })
        );
        assert_eq!(view.name, "Ada");
    }
}
