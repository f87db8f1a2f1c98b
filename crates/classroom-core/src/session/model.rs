//! Session domain model.

use crate::user::UserRecord;
use serde::{Deserialize, Serialize};

/// The authenticated identity for the lifetime of the process.
///
/// Created on successful sign-in and read-only to everything except the
/// session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent as `Authorization: Bearer <token>`
    pub token: String,
    /// The user record returned by sign-in
    pub user: UserRecord,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserRecord) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }

    pub fn display_name(&self) -> String {
        self.user.display_name()
    }
}
