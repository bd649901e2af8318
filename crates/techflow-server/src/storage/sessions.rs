//! In-memory session store using DashMap (no external Redis)

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use techflow_types::Session;

/// Server-side session store with TTL expiry.
///
/// Tokens are opaque uuids; the cookie only ever carries the token, never
/// identity data.
pub struct SessionStore {
    entries: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
}

struct SessionEntry {
    session: Session,
    expires_at: Instant,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let store = Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        };

        // Start cleanup task
        store.start_cleanup_task();

        store
    }

    /// Establish a session and return its token.
    pub fn insert(&self, session: Session) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.entries.insert(
            token.clone(),
            SessionEntry {
                session,
                expires_at: Instant::now() + self.ttl,
            },
        );
        token
    }

    /// Look up a live session. Expired entries are dropped on read.
    pub fn get(&self, token: &str) -> Option<Session> {
        let entry = self.entries.get(token)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.entries.remove(token);
            return None;
        }
        Some(entry.session.clone())
    }

    /// Tear down a session. Removing an unknown token is a no-op.
    pub fn remove(&self, token: &str) {
        self.entries.remove(token);
    }

    fn start_cleanup_task(&self) {
        let entries = self.entries.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;

                let now = Instant::now();
                entries.retain(|_, entry| entry.expires_at > now);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_session() -> Session {
        Session {
            user_id: 1,
            username: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_basic_operations() {
        let store = SessionStore::new(Duration::from_secs(60));

        let token = store.insert(admin_session());
        assert_eq!(store.get(&token), Some(admin_session()));

        // Unknown token
        assert_eq!(store.get("nonexistent"), None);

        // Removal is idempotent
        store.remove(&token);
        assert_eq!(store.get(&token), None);
        store.remove(&token);
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let store = SessionStore::new(Duration::from_millis(10));

        let token = store.insert(admin_session());
        assert!(store.get(&token).is_some());

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.get(&token), None);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60));

        let a = store.insert(admin_session());
        let b = store.insert(admin_session());
        assert_ne!(a, b);
    }
}
