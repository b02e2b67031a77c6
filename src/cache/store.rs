//! Cache Store Module
//!
//! Unbounded key to response map. Entries never expire and are only replaced
//! wholesale by a later `set` for the same key.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::CachedResponse;
use crate::models::DebugResponse;

/// Cache store shared between request handlers.
///
/// Lookups take the read lock, inserts take the write lock. Neither is held
/// across upstream I/O.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Cache Store ==
/// In-memory storage for buffered upstream responses.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Records keyed by cache key
    entries: HashMap<String, Arc<CachedResponse>>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Shared ==
    /// Wraps the store for use across handlers.
    pub fn into_shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Returns the record stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Arc<CachedResponse>> {
        self.entries.get(key).cloned()
    }

    // == Set ==
    /// Stores `record` under `key`, replacing any previous record.
    pub fn set(&mut self, key: String, record: Arc<CachedResponse>) {
        self.entries.insert(key, record);
    }

    // == Snapshot ==
    /// Copies the metadata of every entry.
    ///
    /// The result owns its data, so callers can serialize it after the lock
    /// guard is gone.
    pub fn snapshot(&self) -> DebugResponse {
        self.entries
            .iter()
            .map(|(key, record)| (key.clone(), record.summary()))
            .collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
