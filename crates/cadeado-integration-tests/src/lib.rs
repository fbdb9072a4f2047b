//! Shared fixtures for the Cadeado integration test binaries

use std::sync::Arc;

use cadeado_lock::{LockManager, LockManagerConfig};
use cadeado_store::MemoryLockStore;

/// A fleet of lock managers sharing one store, one per simulated process
/// instance. Each manager coordinates with the others only through the store,
/// as independent processes would.
pub fn fleet(size: usize, config: LockManagerConfig) -> Vec<Arc<LockManager>> {
    let store = Arc::new(MemoryLockStore::new());
    (0..size)
        .map(|_| {
            Arc::new(LockManager::with_config(
                store.clone(),
                config.clone(),
            ))
        })
        .collect()
}
