//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The authenticated `Session` (bearer token plus user record)
//! - `store`: `SessionStore` trait for persisting it, and an in-memory implementation
//!
//! # Usage
//!
//! ```ignore
//! use classroom_core::session::{Session, SessionStore, InMemorySessionStore};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::Session;
pub use store::{InMemorySessionStore, SessionStore};
