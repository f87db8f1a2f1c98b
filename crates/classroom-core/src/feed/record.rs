//! Wire records for the status feed.
//!
//! The backend is loose about shapes: authors and likes may arrive as bare ids
//! or as embedded user objects, and any field may be missing. These types
//! accept all of those and leave defaulting to normalization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An embedded user object as it appears inside posts, likes and comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// `createdBy` is either an embedded user or a bare user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Embedded(AuthorRecord),
    Id(String),
}

impl AuthorField {
    pub fn into_record(self) -> AuthorRecord {
        match self {
            AuthorField::Embedded(record) => record,
            AuthorField::Id(id) => AuthorRecord {
                id: Some(id),
                ..Default::default()
            },
        }
    }
}

/// One entry of a post's `like` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LikeEntry {
    Id(String),
    Embedded(AuthorRecord),
    /// Anything else the backend might send; ignored by normalization.
    Unknown(Value),
}

/// A malformed `createdBy` decodes as absent instead of failing the record.
fn lenient_author<'de, D>(deserializer: D) -> Result<Option<AuthorField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value::<AuthorField>(value) {
        Ok(author) => Some(author),
        Err(e) => {
            tracing::debug!("Ignoring malformed createdBy: {}", e);
            None
        }
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_author")]
    pub created_by: Option<AuthorField>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_author")]
    pub created_by: Option<AuthorField>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub like: Option<Vec<LikeEntry>>,
    #[serde(default)]
    pub comment: Option<Vec<CommentRecord>>,
}
