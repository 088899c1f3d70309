//! Durable key-value storage backends.
//!
//! Values are opaque strings stored under short keys, the same contract a
//! browser's local storage offers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::trace;

use crate::atomic::{atomic_write, read_optional, remove_if_exists};
use crate::error::{PersistenceError, Result};

/// A string-valued key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as a JSON file in a directory.
///
/// ```text
/// base_path/
/// └── cultural-events.json
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_path`. The directory is created lazily.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the file backing `key`.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::StorageUnavailable(format!(
                "invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        trace!(path = %path.display(), "reading key");
        read_optional(&path)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        trace!(path = %path.display(), bytes = value.len(), "writing key");
        atomic_write(&path, value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        remove_if_exists(&path)
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every operation fails with `StorageUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            unavailable: true,
        }
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.into(), value.into());
        }
        store
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(PersistenceError::StorageUnavailable(
                "memory store disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn poisoned<E: std::fmt::Display>(e: E) -> PersistenceError {
        PersistenceError::StorageUnavailable(format!("lock poisoned: {}", e))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        let entries = self.entries.read().map_err(Self::poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        let mut entries = self.entries.write().map_err(Self::poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        let mut entries = self.entries.write().map_err(Self::poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        assert!(store.get("greeting").unwrap().is_none());

        store.set("greeting", "[1,2,3]").unwrap();
        assert_eq!(store.get("greeting").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("greeting.json").exists());

        store.remove("greeting").unwrap();
        assert!(store.get("greeting").unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        let result = store.set("../escape", "x");
        assert!(matches!(result, Err(PersistenceError::StorageUnavailable(_))));
        assert!(store.key_path("").is_err());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_with_entry() {
        let store = MemoryKeyValueStore::with_entry("k", "seeded");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("seeded"));
    }

    #[test]
    fn test_unavailable_store_fails_everything() {
        let store = MemoryKeyValueStore::unavailable();
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }
}
