//! Classroom backend API trait.
//!
//! Defines every call the client makes against the backend, decoupling the
//! application layer from the HTTP implementation.

use crate::error::Result;
use crate::feed::PostRecord;
use crate::user::{MemberRecord, UserRecord};
use async_trait::async_trait;

/// A successful sign-in: the bearer token plus the user record it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SignIn {
    pub token: String,
    pub user: UserRecord,
}

/// Authenticated calls against the classroom backend.
///
/// Implementations attach the API key to every call and the bearer token once
/// one has been installed with [`ClassroomApi::set_bearer_token`]. Failures are
/// reported once and never retried.
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    /// Installs (or removes) the bearer token used for subsequent calls.
    async fn set_bearer_token(&self, token: Option<String>);

    /// `POST /signin`
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn>;

    /// `GET /profile`. `None` when the response carries no profile.
    async fn fetch_profile(&self) -> Result<Option<UserRecord>>;

    /// `GET /class/{year}`
    async fn fetch_roster(&self, year: u32) -> Result<Vec<MemberRecord>>;

    /// `GET /status`
    async fn fetch_feed(&self) -> Result<Vec<PostRecord>>;

    /// `POST /status`
    async fn create_post(&self, content: &str) -> Result<PostRecord>;

    /// `DELETE /status/{id}`
    async fn delete_post(&self, post_id: &str) -> Result<()>;

    /// `POST /like`
    async fn like(&self, post_id: &str) -> Result<()>;

    /// `DELETE /like`
    async fn unlike(&self, post_id: &str) -> Result<()>;

    /// `POST /comment`
    async fn comment(&self, post_id: &str, content: &str) -> Result<()>;
}
