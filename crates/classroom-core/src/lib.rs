//! Domain layer of the classroom portal client.
//!
//! Holds the entities, the feed state machine and the traits the outer
//! layers implement. Nothing in here performs I/O.

pub mod api;
pub mod avatar;
pub mod config;
pub mod error;
pub mod feed;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{ClassroomError, Result};
