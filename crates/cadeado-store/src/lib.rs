//! Cadeado Store - key-value store capability boundary
//!
//! This crate provides:
//! - `LockStore`: the two atomic store primitives the lock manager needs
//! - `StoreError`: communication failure taxonomy for store implementations
//! - `MemoryLockStore`: in-memory implementation with per-entry expiry

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryLockStore;

use std::time::Duration;

use async_trait::async_trait;

/// Atomic key-value primitives required for distributed locking.
///
/// Both operations must be atomic as seen by every client of the store: no
/// other party may observe or act on an intermediate state. Against Redis
/// these map to `SET key value NX PX <ttl>` and a server-side
/// "if GET(key) == value then DEL(key)" script.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Set `key` to `value` only if the key is absent, with a time-to-live.
    ///
    /// Returns `Ok(true)` iff the store performed the write. `Ok(false)`
    /// means the key was already present. `Err` is reserved for
    /// communication failures, not for contention.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<bool>;

    /// Delete `key` only if its current value equals `value`.
    ///
    /// The read-compare-delete must execute as one atomic step; a client-side
    /// read followed by a delete would race with lease expiry and reacquire.
    /// Returns `Ok(true)` iff this call deleted the entry.
    async fn compare_and_delete(&self, key: &str, value: &str) -> anyhow::Result<bool>;
}
