//! Store Module
//!
//! The shared state behind every connection.
//!
//! ## Responsibilities
//! - Flat key/value map with upsert and idempotent delete
//! - Registry of named sorted sets, created lazily on first write
//! - All access mediated by one top-level RwLock

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::zset::SortedSet;

#[derive(Default)]
struct Inner {
    values: HashMap<Vec<u8>, Vec<u8>>,
    sorted_sets: HashMap<Vec<u8>, Arc<SortedSet>>,
}

/// The in-memory store
///
/// ## Concurrency Model
///
/// - **Top-level lock**: guards the key/value map and the sorted-set
///   registry together. GET and registry lookups share the read lock;
///   SET, DEL and lazy set creation take the write lock.
///
/// - **Per-set lock**: each `SortedSet` carries its own RwLock. Handles are
///   `Arc`s cloned out of the registry, so the top-level guard is dropped
///   before any per-set lock is taken. Work on two different sets only
///   contends for the brief registry lookup.
///
/// - Sets are never removed from the registry, so a handle stays valid for
///   the life of the store.
#[derive(Default)]
pub struct Store {
    inner: RwLock<Inner>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Key/Value Operations
    // =========================================================================

    /// Get a value by key
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.inner.read().values.get(key).cloned()
    }

    /// Insert or overwrite a value
    pub fn set(&self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.inner.write().values.insert(key.into(), value.into());
    }

    /// Delete a key
    ///
    /// Returns whether the key existed; deleting an absent key is not an error.
    pub fn delete(&self, key: &[u8]) -> bool {
        self.inner.write().values.remove(key).is_some()
    }

    // =========================================================================
    // Sorted Set Registry
    // =========================================================================

    /// Look up an existing sorted set
    pub fn sorted_set(&self, key: &[u8]) -> Option<Arc<SortedSet>> {
        self.inner.read().sorted_sets.get(key).cloned()
    }

    /// Look up a sorted set, creating it if absent
    ///
    /// The existence check and the insert happen under one write guard, so
    /// concurrent first writers to a new key all get the same instance.
    pub fn sorted_set_or_create(&self, key: &[u8]) -> Arc<SortedSet> {
        if let Some(set) = self.sorted_set(key) {
            return set;
        }

        let mut inner = self.inner.write();
        let set = inner
            .sorted_sets
            .entry(key.to_vec())
            .or_insert_with(|| {
                tracing::debug!("Creating sorted set {:?}", String::from_utf8_lossy(key));
                Arc::new(SortedSet::new())
            });
        Arc::clone(set)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of key/value entries
    pub fn len(&self) -> usize {
        self.inner.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sorted sets ever created
    pub fn sorted_set_count(&self) -> usize {
        self.inner.read().sorted_sets.len()
    }
}
