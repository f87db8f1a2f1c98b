//! Application layer for the classroom client.
//!
//! Use cases that coordinate the core feed engine with the backend API and
//! the session store. The presentation layer only talks to these types.

pub mod auth_usecase;
pub mod directory_service;
pub mod feed_service;

#[cfg(test)]
mod mock_api;

pub use auth_usecase::AuthUseCase;
pub use directory_service::{DirectoryService, Roster};
pub use feed_service::FeedService;
