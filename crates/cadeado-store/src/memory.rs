// In-memory lock store backed by DashMap
// Entries expire lazily on access; an optional background task sweeps them out

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use crate::LockStore;

/// A stored value with its absolute expiry deadline
pub(crate) struct StoreEntry {
    value: String,
    expires_at: Instant,
}

impl StoreEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory `LockStore` implementation.
///
/// Suitable for single-node deployments and as the fake store in tests. Both
/// primitives go through DashMap's per-shard locking, so each call is atomic
/// with respect to every other call on the same key.
pub struct MemoryLockStore {
    pub(crate) entries: Arc<DashMap<String, StoreEntry>>,
}

impl Default for MemoryLockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLockStore {
    /// Create a store without a background sweeper; expired entries are
    /// reclaimed lazily when their key is next touched.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Create a store and spawn a background task that sweeps expired
    /// entries every `interval`. Must be called from within a tokio runtime.
    pub fn with_cleanup(interval: Duration) -> Self {
        let store = Self::new();

        let entries = store.entries.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let expired_keys: Vec<String> = entries
                    .iter()
                    .filter(|entry| entry.value().is_expired())
                    .map(|entry| entry.key().clone())
                    .collect();

                for key in &expired_keys {
                    entries.remove_if(key, |_, entry| entry.is_expired());
                }

                if !expired_keys.is_empty() {
                    debug!(count = expired_keys.len(), "Swept expired store entries");
                }
            }
        });

        store
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(StoreEntry::new(value, ttl));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoreEntry::new(value, ttl));
                Ok(true)
            }
        }
    }

    async fn compare_and_delete(&self, key: &str, value: &str) -> anyhow::Result<bool> {
        // remove_if holds the shard lock across the predicate, giving the
        // read-compare-delete atomicity the trait requires
        let removed = self
            .entries
            .remove_if(key, |_, entry| !entry.is_expired() && entry.value == value);

        Ok(removed.is_some())
    }
}
