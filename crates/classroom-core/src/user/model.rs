//! User record domain model.

use crate::avatar::AvatarResolver;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Education details attached to a student profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    /// The backend sends this either as a number or a string.
    #[serde(default)]
    pub enrollment_year: Option<Value>,
}

impl Education {
    pub fn enrollment_year_label(&self) -> Option<String> {
        match self.enrollment_year.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A user as the backend describes it.
///
/// Every field is optional on the wire; fields this client does not use are
/// kept in `extra` so that a persisted record round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Roster entries share the user record shape.
pub type MemberRecord = UserRecord;

impl UserRecord {
    /// "firstname lastname", falling back to the email, then "User".
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if !parts.is_empty() {
            return parts.join(" ");
        }
        self.email
            .clone()
            .filter(|email| !email.trim().is_empty())
            .unwrap_or_else(|| "User".to_string())
    }

    pub fn avatar_url(&self, resolver: &AvatarResolver) -> String {
        resolver.resolve(self.image.as_deref())
    }
}
