//! Storage layer for atomic file operations.

mod atomic_toml;
mod key_value;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use key_value::TomlKeyValueStore;
