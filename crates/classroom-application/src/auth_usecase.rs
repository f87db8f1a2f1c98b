//! Sign-in, session restore and sign-out.
//!
//! `AuthUseCase` keeps the persisted session and the API client's bearer
//! token in step: whatever the store holds is what the client sends.

use classroom_core::api::ClassroomApi;
use classroom_core::session::{Session, SessionStore};
use classroom_core::{ClassroomError, Result};
use std::sync::Arc;

pub struct AuthUseCase {
    api: Arc<dyn ClassroomApi>,
    store: Arc<dyn SessionStore>,
}

impl AuthUseCase {
    pub fn new(api: Arc<dyn ClassroomApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// Signs in against the backend, persists the session and installs the
    /// bearer token for subsequent calls.
    ///
    /// Nothing is persisted when the backend rejects the credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClassroomError::invalid_input(
                "Email and password are required",
            ));
        }

        let sign_in = self.api.sign_in(email, password).await?;
        self.store.save_session(&sign_in.token, &sign_in.user).await?;
        self.api.set_bearer_token(Some(sign_in.token.clone())).await;

        tracing::info!("[AuthUseCase] Signed in as {}", sign_in.user.id);
        Ok(Session::new(sign_in.token, sign_in.user))
    }

    /// Restores a previously persisted session, if any, and installs its token.
    pub async fn restore(&self) -> Option<Session> {
        let session = self.store.load_session().await?;
        self.api.set_bearer_token(Some(session.token.clone())).await;
        tracing::debug!("[AuthUseCase] Restored session for {}", session.user_id());
        Some(session)
    }

    /// Like [`AuthUseCase::restore`], but a missing session is an error.
    pub async fn require_session(&self) -> Result<Session> {
        self.restore().await.ok_or(ClassroomError::NotSignedIn)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.store.clear_session().await?;
        self.api.set_bearer_token(None).await;
        tracing::info!("[AuthUseCase] Signed out");
        Ok(())
    }
}
