//! Filesystem-backed infrastructure for the classroom client: paths,
//! configuration loading and the persisted session store.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_session_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::ClassroomPaths;
pub use crate::toml_session_store::TomlSessionStore;
