// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value storage seam for pad persistence.
//!
//! The engine only ever needs `get(key)`/`set(key, value)` with string
//! values, mirroring browser-local storage. `MemoryStorage` backs tests and
//! embedders with their own persistence; `FileStorage` keeps the mapping in
//! a single JSON object file for the CLI.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed prefix for all pad storage keys.
pub const STORAGE_PREFIX: &str = "webpad";

/// Errors from file-backed storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {} is not a JSON object of strings: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage, the engine's only persistence contract.
pub trait KeyValueStorage: Send {
    /// Returns the stored value, or `None` when the key was never set.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value under a key, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and embedders.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
///
/// The whole mapping loads at open; every `set` writes the file back, so
/// the on-disk state never lags the last completed operation.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens storage at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let map = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StorageError::Malformed {
                path: path.clone(),
                source,
            })?,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        Ok(Self { path, map })
    }

    /// The file this storage persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let mut text = serde_json::to_string_pretty(&self.map)
            .map_err(|source| write_err(std::io::Error::other(source)))?;
        text.push('\n');
        std::fs::write(&self.path, text).map_err(write_err)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Derives the fixed storage keys from a prefix.
#[derive(Clone, Debug)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    /// Keys under the standard `webpad` prefix.
    pub fn new() -> Self {
        Self::with_prefix(STORAGE_PREFIX)
    }

    /// Keys under a custom prefix, for embedders hosting several pads.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Key holding the serialized project mapping.
    pub fn project(&self) -> String {
        format!("{}.project", self.prefix)
    }

    /// Key holding the remembered project name.
    pub fn filename(&self) -> String {
        format!("{}.filename", self.prefix)
    }

    /// Key holding the RFC 3339 timestamp of the last save.
    pub fn saved_at(&self) -> String {
        format!("{}.saved-at", self.prefix)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
