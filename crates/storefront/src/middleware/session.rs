//! Session middleware configuration.
//!
//! The storefront keeps its own short-lived session, separate from the
//! marketplace's cookie, for per-browser flow state: the registration step
//! and the profile's account view. Sessions live in a bounded in-process
//! cache that drops records once they expire and die with the process.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name. Never forwarded to the marketplace.
pub const SESSION_COOKIE_NAME: &str = "bazaar_session";

/// Session expiry time in seconds (1 hour of inactivity).
const SESSION_INACTIVITY_SECONDS: i64 = 60 * 60;

/// Most sessions held at once; the least recently used go first.
const SESSION_CAPACITY: u64 = 100_000;

/// Create the session store. Expired records are evicted, not just hidden.
#[must_use]
pub fn create_session_store() -> MokaStore {
    MokaStore::new(Some(SESSION_CAPACITY))
}

/// Create the session layer over [`create_session_store`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_INACTIVITY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::{
        SessionStore,
        cookie::time::{Duration, OffsetDateTime},
        session::{Id, Record},
    };

    use super::*;

    fn record(expires_in: Duration) -> Record {
        Record {
            id: Id::default(),
            data: std::collections::HashMap::default(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_live_record_loads() {
        let store = create_session_store();
        let mut live = record(Duration::minutes(5));
        store.create(&mut live).await.unwrap();

        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_record_is_dropped() {
        let store = create_session_store();
        let mut expired = record(Duration::milliseconds(50));
        store.create(&mut expired).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        assert!(store.load(&expired.id).await.unwrap().is_none());
    }
}
