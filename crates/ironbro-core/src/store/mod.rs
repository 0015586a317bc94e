//! Persisted key/value store
//!
//! Models the browser's per-origin local storage:
//! - `MemoryStore` - in-process map shared by every tab of one origin
//! - `FileStore` - JSON file on disk, used by the CLI
//! - `SafeStore` - wrapper that turns storage failures into logged defaults

mod file;
pub mod keys;
mod memory;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

pub use file::FileStore;
pub use memory::{MemoryStore, UnavailableStore};

/// Failure to reach or decode the persisted store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage contents are not a JSON object: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key/value storage scoped to one origin
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Store handle that never fails: errors are logged and reported as absence
#[derive(Clone)]
pub struct SafeStore {
    inner: Arc<dyn KeyValueStore>,
}

impl SafeStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    /// Read a key, treating failures and empty strings as absent
    pub fn get(&self, key: &str) -> Option<String> {
        match self.inner.get(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                warn!("SafeStore: could not read '{}': {}", key, e);
                None
            }
        }
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Write a key; returns whether the value was persisted
    pub fn set(&self, key: &str, value: &str) -> bool {
        match self.inner.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!("SafeStore: could not save '{}': {}", key, e);
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.inner.remove(key) {
            Ok(()) => true,
            Err(e) => {
                warn!("SafeStore: could not remove '{}': {}", key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_store_reads_and_writes() {
        let store = SafeStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.get(keys::THEME), None);
        assert!(store.set(keys::THEME, "red"));
        assert_eq!(store.get(keys::THEME).as_deref(), Some("red"));
        assert!(store.remove(keys::THEME));
        assert_eq!(store.get_or(keys::THEME, "blue"), "blue");
    }

    #[test]
    fn test_safe_store_treats_empty_as_absent() {
        let store = SafeStore::new(Arc::new(MemoryStore::new()));
        store.set(keys::SITE_ACCENT, "");
        assert_eq!(store.get(keys::SITE_ACCENT), None);
    }

    #[test]
    fn test_safe_store_swallows_failures() {
        let store = SafeStore::new(Arc::new(UnavailableStore));
        assert_eq!(store.get(keys::THEME), None);
        assert!(!store.set(keys::THEME, "red"));
        assert!(!store.remove(keys::THEME));
        assert_eq!(store.get_or(keys::THEME, "brosquad-blue"), "brosquad-blue");
    }
}
