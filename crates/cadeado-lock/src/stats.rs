//! Lock manager statistics

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Snapshot of lock manager counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct LockManagerStats {
    /// Store attempts issued by `acquire` (every call that reached the store)
    pub acquire_attempts: u64,
    /// Attempts that obtained the lock
    pub acquired: u64,
    /// Attempts rejected because the key was already held
    pub contended: u64,
    /// Attempts or releases that failed on store communication
    pub store_errors: u64,
    /// Releases that deleted the entry
    pub released: u64,
    /// Releases denied because the stored token did not match
    pub release_denied: u64,
}

#[derive(Default)]
pub(crate) struct StatsCollector {
    acquire_attempts: AtomicU64,
    acquired: AtomicU64,
    contended: AtomicU64,
    store_errors: AtomicU64,
    released: AtomicU64,
    release_denied: AtomicU64,
}

impl StatsCollector {
    pub(crate) fn record_attempt(&self) {
        self.acquire_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_acquired(&self) {
        self.acquired.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_contended(&self) {
        self.contended.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_released(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_release_denied(&self) {
        self.release_denied.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> LockManagerStats {
        LockManagerStats {
            acquire_attempts: self.acquire_attempts.load(Ordering::Relaxed),
            acquired: self.acquired.load(Ordering::Relaxed),
            contended: self.contended.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            release_denied: self.release_denied.load(Ordering::Relaxed),
        }
    }
}
