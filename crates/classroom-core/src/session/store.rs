//! Session store trait.
//!
//! Defines the interface for persisting the authenticated session across restarts.

use super::model::Session;
use crate::error::Result;
use crate::user::UserRecord;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Holds the bearer token and user identity.
///
/// # Implementation Notes
///
/// - `save_session` overwrites any prior session and performs no validation.
/// - `load_session` never fails: unreadable or corrupt storage reads as "absent".
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists the token and user record, replacing any prior session.
    async fn save_session(&self, token: &str, user: &UserRecord) -> Result<()>;

    /// Returns the persisted session, or `None` when absent or unreadable.
    async fn load_session(&self) -> Option<Session>;

    /// Removes the persisted session.
    ///
    /// Succeeds when there was nothing to remove.
    async fn clear_session(&self) -> Result<()>;
}

/// A process-local store, used for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_session(&self, token: &str, user: &UserRecord) -> Result<()> {
        *self.session.write().await = Some(Session::new(token, user.clone()));
        Ok(())
    }

    async fn load_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn clear_session(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            email: Some(format!("{}@kkumail.com", id)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = InMemorySessionStore::new();
        assert!(store.load_session().await.is_none());

        store.save_session("tok-1", &user("u1")).await.unwrap();
        let session = store.load_session().await.unwrap();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user_id(), "u1");
    }

    #[tokio::test]
    async fn test_save_overwrites_prior_session() {
        let store = InMemorySessionStore::new();
        store.save_session("tok-1", &user("u1")).await.unwrap();
        store.save_session("tok-2", &user("u2")).await.unwrap();

        let session = store.load_session().await.unwrap();
        assert_eq!(session.token, "tok-2");
        assert_eq!(session.email(), Some("u2@kkumail.com"));
    }

    #[tokio::test]
    async fn test_clear_session() {
        let store = InMemorySessionStore::with_session(Session::new("tok", user("u1")));
        store.clear_session().await.unwrap();
        assert!(store.load_session().await.is_none());
        // clearing twice is fine
        store.clear_session().await.unwrap();
    }
}
