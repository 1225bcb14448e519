//! Durable key-value storage for reader preferences.
//!
//! Preferences persist across sessions, so the store is the one piece of the
//! runtime with real durability requirements. Both backends expose the same
//! string-to-string map: an in-memory store for tests and ephemeral sessions,
//! and a JSON-file store that writes through on every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Errors that can occur when reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read preference store: {0}")]
    Read(String),

    #[error("Failed to write preference store: {0}")]
    Write(String),

    #[error("Preference store is corrupt: {0}")]
    Corrupt(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Persistent key-value storage for reader preferences.
///
/// Implementations must tolerate concurrent readers. `get` on an absent key
/// is `Ok(None)`, never an error; callers distinguish "no value" from
/// "storage broken".
pub trait PreferenceStore: Send + Sync {
    /// Look up the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Store `value` under `key` only if the key is absent, atomically with
    /// respect to other sessions on the same store. Returns whether this
    /// call created the entry.
    fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by an in-memory map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Durable store backed by a JSON file.
///
/// The whole map is held in memory and rewritten to disk on every mutation.
/// Preference sets are tiny (a handful of UI flags), so write-through keeps
/// the durability story simple.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries if the file exists.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StoreError::Read(e.to_string()))?;
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
            }
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StoreError::Write(e.to_string()))
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)?;
        Ok(true)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        entries.remove(key);
        self.persist(&entries)
    }
}
