//! Error types for the classroom client.

use thiserror::Error;

/// A shared error type for the entire classroom client.
///
/// Every failure is caught at the operation boundary and turned into an inline
/// message by the presentation layer; none of these variants are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassroomError {
    /// Sign-in was rejected (bad credentials or no token in the response)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network or connection-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An operation that needs a session was attempted without one
    #[error("Not signed in")]
    NotSignedIn,

    /// The current user is not allowed to perform the operation
    #[error("Not permitted: {0}")]
    NotPermitted(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// User input rejected before any request was issued
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClassroomError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_permitted(message: impl Into<String>) -> Self {
        Self::NotPermitted(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Returns true for the generic "request failed" family: transport errors,
    /// non-2xx responses and undecodable bodies.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::MalformedResponse(_)
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ClassroomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ClassroomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClassroomError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ClassroomError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at infrastructure seams)
impl From<anyhow::Error> for ClassroomError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ClassroomError>`.
pub type Result<T> = std::result::Result<T, ClassroomError>;
