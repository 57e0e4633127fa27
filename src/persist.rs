//! # Persistence
//!
//! This module defines the text slot the editor saves its notation into.
//!
//! The contract is deliberately loose, matching the browser storage the
//! editor grew up against: one string value per key, writes are
//! fire-and-forget with no flush or durability guarantee, reads return the
//! last written value, concurrent writers are last-write-wins. An editor
//! uses a single fixed key (see `EditorConfig::storage_key`).
//!
//! Two implementations ship: [`MemoryStore`] for tests and headless use,
//! and [`FileStore`] keeping one file per key under a root directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::debug;

/// A keyed text slot
pub trait TextStore {
    /// The last value written to `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` to `key`. Fire-and-forget: failures are swallowed by
    /// the implementation and never interrupt editing.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }
}

/// One file per key under a root directory.
///
/// Keys are used as file names as-is. IO failures are logged at debug and
/// swallowed per the `TextStore` contract.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl TextStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.root) {
            debug!("store: creating {} failed: {}", self.root.display(), e);
            return;
        }
        if let Err(e) = fs::write(self.path_for(key), value) {
            debug!("store: writing {} failed: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("tab_input_v1"), None);

        store.set("tab_input_v1", "4:5,4:7");
        assert_eq!(store.get("tab_input_v1"), Some("4:5,4:7".to_string()));
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        store.set("slot", "first");
        store.set("slot", "second");
        assert_eq!(store.get("slot"), Some("second".to_string()));
    }

    #[test]
    fn test_memory_store_keys_are_independent() {
        let mut store = MemoryStore::new();
        store.set("a", "4:5");
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert_eq!(store.get("tab_input_v1"), None);
        store.set("tab_input_v1", "4:5,4:7,3:7,2:5");
        assert_eq!(
            store.get("tab_input_v1"),
            Some("4:5,4:7,3:7,2:5".to_string())
        );
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        FileStore::new(dir.path()).set("slot", "3:x");

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("slot"), Some("3:x".to_string()));
    }

    #[test]
    fn test_file_store_creates_root() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("editor").join("store");

        let mut store = FileStore::new(&nested);
        store.set("slot", "2:0");
        assert_eq!(store.get("slot"), Some("2:0".to_string()));
    }
}
