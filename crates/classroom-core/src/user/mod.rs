//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User records as returned by sign-in, profile and roster endpoints
//!
//! # Usage
//!
//! ```ignore
//! use classroom_core::user::{UserRecord, MemberRecord, Education};
//! ```

mod model;

// Re-export public API
pub use model::{Education, MemberRecord, UserRecord};
