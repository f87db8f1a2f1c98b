//! File-backed implementation of `SessionStore`.
//!
//! The token and the user record live under the fixed keys `token` and `user`
//! of `session.toml`; the user record is stored as a JSON string.

use crate::paths::ClassroomPaths;
use crate::storage::TomlKeyValueStore;
use async_trait::async_trait;
use classroom_core::session::{Session, SessionStore};
use classroom_core::user::UserRecord;
use classroom_core::{ClassroomError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct TomlSessionStore {
    store: Arc<TomlKeyValueStore>,
}

impl TomlSessionStore {
    /// Store at the default location (`<config dir>/session.toml`).
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = ClassroomPaths::new(base_path)
            .session_file()
            .map_err(|e| ClassroomError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            store: Arc::new(TomlKeyValueStore::new(path)),
        }
    }

    fn read(store: &TomlKeyValueStore) -> Option<Session> {
        let [token, user] = match store.get_many([TOKEN_KEY, USER_KEY]) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {:?}: {}", store.path(), e);
                return None;
            }
        };

        let token = token.filter(|t| !t.trim().is_empty())?;
        let Some(user) = user else {
            tracing::warn!("Session file has a token but no user record");
            return None;
        };

        match serde_json::from_str::<UserRecord>(&user) {
            Ok(user) => Some(Session::new(token, user)),
            Err(e) => {
                tracing::warn!("Ignoring corrupt user record in session file: {}", e);
                None
            }
        }
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ClassroomError::internal(format!("Session store task failed: {}", e)))?
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn save_session(&self, token: &str, user: &UserRecord) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        let token = token.to_string();
        let store = self.store.clone();
        blocking(move || {
            store.set_many(&[(TOKEN_KEY, token.as_str()), (USER_KEY, user_json.as_str())])?;
            Ok(())
        })
        .await?;
        tracing::debug!("Session persisted to {:?}", self.store.path());
        Ok(())
    }

    async fn load_session(&self) -> Option<Session> {
        let store = self.store.clone();
        match blocking(move || Ok(Self::read(&store))).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Failed to load session: {}", e);
                None
            }
        }
    }

    async fn clear_session(&self) -> Result<()> {
        let store = self.store.clone();
        blocking(move || {
            store.clear()?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn user() -> UserRecord {
        serde_json::from_str(
            r#"{"_id":"u1","email":"u1@kkumail.com","firstname":"Ann","image":"/uploads/u1.png"}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(Some(temp_dir.path())).unwrap();

        store.save_session("tok-123", &user()).await.unwrap();
        let session = store.load_session().await.unwrap();
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user_id(), "u1");
        assert_eq!(session.user.image.as_deref(), Some("/uploads/u1.png"));

        let raw = fs::read_to_string(temp_dir.path().join("session.toml")).unwrap();
        assert!(raw.contains("token = \"tok-123\""));
    }

    #[tokio::test]
    async fn test_survives_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        TomlSessionStore::new(Some(temp_dir.path()))
            .unwrap()
            .save_session("tok", &user())
            .await
            .unwrap();

        let reopened = TomlSessionStore::new(Some(temp_dir.path())).unwrap();
        assert!(reopened.load_session().await.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(Some(temp_dir.path())).unwrap();
        assert!(store.load_session().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "token = [unterminated").unwrap();
        let store = TomlSessionStore::with_path(path);
        assert!(store.load_session().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_user_json_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "token = \"tok\"\nuser = \"{not json\"\n").unwrap();
        let store = TomlSessionStore::with_path(path);
        assert!(store.load_session().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(Some(temp_dir.path())).unwrap();
        store.save_session("tok", &user()).await.unwrap();
        store.clear_session().await.unwrap();
        assert!(store.load_session().await.is_none());
        store.clear_session().await.unwrap();
    }
}
