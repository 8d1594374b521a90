//! Session middleware configuration.
//!
//! Sessions live in an in-memory moka cache: a restart signs everyone out and
//! empties every cart. Each record is evicted once its expiry passes, and the
//! cache holds at most [`SESSION_CAPACITY`] sessions.

use tower_sessions::cookie::{SameSite, time::Duration};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "souq_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Most sessions kept at once; the least recently used are evicted first.
pub const SESSION_CAPACITY: u64 = 100_000;

/// In-memory session store with expiry and a size cap.
#[must_use]
pub fn session_store() -> MokaStore {
    MokaStore::new(Some(SESSION_CAPACITY))
}

/// Create the session layer.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::SessionStore;
    use tower_sessions::cookie::time::OffsetDateTime;
    use tower_sessions::session::{Id, Record};

    use super::*;

    fn record(ttl: Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + ttl,
        }
    }

    #[tokio::test]
    async fn test_live_session_is_kept() {
        let store = session_store();
        let mut live = record(Duration::hours(1));
        store.create(&mut live).await.unwrap();
        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = session_store();
        let mut short = record(Duration::milliseconds(200));
        store.create(&mut short).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        assert!(store.load(&short.id).await.unwrap().is_none());
    }
}
