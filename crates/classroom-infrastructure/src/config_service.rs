//! Configuration service implementation.
//!
//! Builds the `ApiConfig` from, lowest to highest precedence: built-in
//! defaults, `config.toml` in the config directory, then the process
//! environment.

use crate::paths::ClassroomPaths;
use crate::storage::AtomicTomlFile;
use classroom_core::config::ApiConfig;
use classroom_core::{ClassroomError, Result};
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: [&str; 2] = ["CLASSROOM_API_KEY", "API_KEY"];
pub const ENV_TOKEN: [&str; 2] = ["CLASSROOM_TOKEN", "TOKEN"];
pub const ENV_ORIGIN: &str = "CLASSROOM_ORIGIN";

#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let config_path = ClassroomPaths::new(base_path)
            .config_file()
            .map_err(|e| ClassroomError::config(e.to_string()))?;
        Ok(Self { config_path })
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the configuration using the real process environment.
    pub fn load(&self) -> Result<ApiConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads the configuration with an injectable environment lookup.
    pub fn load_with_env<F>(&self, env: F) -> Result<ApiConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_file()?;
        apply_env(&mut config, env);
        Ok(config)
    }

    fn load_file(&self) -> Result<ApiConfig> {
        let file = AtomicTomlFile::<ApiConfig>::new(self.config_path.clone());
        match file.load() {
            Ok(Some(config)) => {
                tracing::debug!("Loaded config from {:?}", self.config_path);
                Ok(config)
            }
            Ok(None) => Ok(ApiConfig::default()),
            Err(e) => Err(ClassroomError::config(format!(
                "Failed to read {:?}: {}",
                self.config_path, e
            ))),
        }
    }
}

fn first_set<F>(env: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| env(key))
        .find(|value| !value.trim().is_empty())
}

fn apply_env<F>(config: &mut ApiConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = first_set(&env, &ENV_API_KEY) {
        config.api_key = Some(api_key);
    }
    if let Some(token) = first_set(&env, &ENV_TOKEN) {
        config.auxiliary_token = Some(token);
    }
    if let Some(origin) = first_set(&env, &[ENV_ORIGIN]) {
        config.origin = origin;
    }
}
