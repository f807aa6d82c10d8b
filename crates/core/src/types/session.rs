//! Session state as seen by the storefront.
//!
//! The credential itself is a server-managed cookie that the storefront never
//! inspects. What the storefront knows about a session is derived from one
//! call to the marketplace's auth check endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity data returned by a successful auth check.
///
/// Only `name` is interpreted; every other field is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name, if the API provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remaining identity fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Identity {
    /// Create an identity carrying only a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            attributes: Map::new(),
        }
    }

    /// Returns the display name, treating an empty name as absent.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Result of asking the marketplace whether the current credential is valid.
///
/// There is no "unknown" variant: a failed check is `Unauthenticated`.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// The credential is valid.
    Authenticated(Identity),
    /// The credential is missing, invalid, or could not be checked.
    Unauthenticated,
}

impl Session {
    /// Returns `true` for an authenticated session.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the identity of an authenticated session.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }

    /// Consumes the session and returns its identity, if any.
    #[must_use]
    pub fn into_identity(self) -> Option<Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_extra_fields() {
        let identity: Identity =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com","id":7}"#).unwrap();

        assert_eq!(identity.display_name(), Some("Ada"));
        assert_eq!(
            identity.attributes.get("email"),
            Some(&Value::String("ada@example.com".to_string()))
        );
        assert_eq!(identity.attributes.get("id"), Some(&Value::from(7)));
    }

    #[test]
    fn test_identity_without_name() {
        let identity: Identity = serde_json::from_str(r#"{"email":"ada@example.com"}"#).unwrap();
        assert_eq!(identity.name, None);
        assert_eq!(identity.display_name(), None);
    }

    #[test]
    fn test_empty_name_is_not_displayed() {
        let identity = Identity::named("");
        assert_eq!(identity.display_name(), None);
    }

    #[test]
    fn test_session_accessors() {
        let session = Session::Authenticated(Identity::named("Ada"));
        assert!(session.is_authenticated());
        assert_eq!(session.identity().and_then(Identity::display_name), Some("Ada"));

        assert!(!Session::Unauthenticated.is_authenticated());
        assert!(Session::Unauthenticated.identity().is_none());
        assert!(Session::Unauthenticated.into_identity().is_none());
    }
}
