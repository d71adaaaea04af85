// ABOUTME: In-memory key-value store backend for tests and ephemeral sessions
// ABOUTME: Stores values in a shared HashMap behind a mutex, cheap to clone

//! In-memory storage backend

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::KeyValueStore;

/// In-memory store backed by a shared map
///
/// Clones share the same underlying map, mirroring how file-store clones
/// share a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("Memory store mutex poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("recipes").unwrap(), None);

        store.set("recipes", "[]").unwrap();
        assert_eq!(store.get("recipes").unwrap().as_deref(), Some("[]"));

        store.set("recipes", "[1]").unwrap();
        assert_eq!(store.get("recipes").unwrap().as_deref(), Some("[1]"));

        store.remove("recipes").unwrap();
        assert_eq!(store.get("recipes").unwrap(), None);
        // removing again is not an error
        store.remove("recipes").unwrap();
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.set("settings", "{}").unwrap();
        assert_eq!(clone.get("settings").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn keys_are_sorted() {
        let store = MemoryStore::new();
        store.set("b", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_owned(), "b".to_owned()]);
    }
}
