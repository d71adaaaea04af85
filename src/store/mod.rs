// ABOUTME: Persistence abstraction layer for the Larder engine
// ABOUTME: Plugin architecture for key-value storage with file and in-memory backends

//! Key-value persistence for application state
//!
//! Every top-level collection is mirrored to the store under its own key as a
//! JSON snapshot, and rehydrated from it at startup. Backends are selected at
//! runtime through the [`Store`] wrapper.

use anyhow::Result;
use tracing::info;

use crate::config::StoreBackend;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Core storage abstraction trait
///
/// All storage implementations must implement this trait to provide a
/// consistent interface for the application layer. Operations are
/// synchronous; callers treat writes as fire-and-forget.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under a key, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key and its value; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn remove(&self, key: &str) -> Result<()>;

    /// List every key currently present
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be enumerated
    fn keys(&self) -> Result<Vec<String>>;
}

/// Storage instance wrapper that delegates to the appropriate backend
#[derive(Debug, Clone)]
pub enum Store {
    /// File-backed store, one JSON file per key
    File(FileStore),
    /// In-memory store for tests and ephemeral sessions
    Memory(MemoryStore),
}

impl Store {
    /// Open a store for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the file backend's data directory cannot be
    /// created or accessed
    pub fn open(backend: &StoreBackend) -> Result<Self> {
        match backend {
            StoreBackend::File { path } => {
                info!("Initializing file store at {}", path.display());
                let store = FileStore::open(path)?;
                Ok(Self::File(store))
            }
            StoreBackend::Memory => {
                info!("Initializing in-memory store");
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }

    /// Get a descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::File(_) => "File (one JSON file per key)",
            Self::Memory(_) => "Memory (ephemeral)",
        }
    }
}

impl KeyValueStore for Store {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::File(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::File(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            Self::File(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        match self {
            Self::File(store) => store.keys(),
            Self::Memory(store) => store.keys(),
        }
    }
}
