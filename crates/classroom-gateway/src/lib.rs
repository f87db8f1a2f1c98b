//! HTTP gateway to the classroom backend.
//!
//! [`HttpClassroomApi`] implements [`classroom_core::api::ClassroomApi`] with
//! `reqwest`, unwrapping the backend's `{ "data": ... }` envelope.

mod envelope;
pub mod http_api;

pub use http_api::HttpClassroomApi;
