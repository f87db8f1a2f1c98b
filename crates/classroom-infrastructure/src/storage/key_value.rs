//! A small string key-value store persisted as a flat TOML table.

use super::atomic_toml::{AtomicTomlError, AtomicTomlFile};
use std::collections::BTreeMap;
use std::path::PathBuf;

type Table = BTreeMap<String, String>;

pub struct TomlKeyValueStore {
    file: AtomicTomlFile<Table>,
}

impl TomlKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Reads several keys from a single load of the file.
    pub fn get_many<const N: usize>(
        &self,
        keys: [&str; N],
    ) -> Result<[Option<String>; N], AtomicTomlError> {
        let mut table = self.file.load()?.unwrap_or_default();
        Ok(keys.map(|key| table.remove(key)))
    }

    /// Writes several keys in one atomic replacement.
    pub fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), AtomicTomlError> {
        self.file.update(Table::new(), |table| {
            for (key, value) in entries {
                table.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    /// Removes the backing file entirely.
    pub fn clear(&self) -> Result<(), AtomicTomlError> {
        self.file.remove()
    }
}
