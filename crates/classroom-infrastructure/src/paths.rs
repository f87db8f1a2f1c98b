//! Path management for classroom client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/classroom/         # Config directory (dirs::config_dir)
//! ├── config.toml              # Optional API configuration overrides
//! └── session.toml             # Persisted token + user record
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

/// Path resolution, optionally rooted at an explicit base directory
/// (used by `--config-dir` and by tests).
#[derive(Debug, Clone, Default)]
pub struct ClassroomPaths {
    base: Option<PathBuf>,
}

impl ClassroomPaths {
    pub const APP_DIR: &'static str = "classroom";
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const SESSION_FILE: &'static str = "session.toml";

    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the classroom configuration directory.
    ///
    /// - `Ok(PathBuf)`: the base directory if one was given, otherwise
    ///   `<platform config dir>/classroom`
    /// - `Err(PathError::ConfigDirNotFound)`: no base and no platform directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(Self::APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::CONFIG_FILE))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::SESSION_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base() {
        let paths = ClassroomPaths::new(Some(Path::new("/tmp/classroom-test")));
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/classroom-test"));
        assert_eq!(
            paths.session_file().unwrap(),
            PathBuf::from("/tmp/classroom-test/session.toml")
        );
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/classroom-test/config.toml")
        );
    }

    #[test]
    fn test_platform_default_ends_with_app_dir() {
        // Some CI containers have no config dir at all.
        if let Ok(dir) = ClassroomPaths::default().config_dir() {
            assert!(dir.ends_with("classroom"));
        }
    }
}
