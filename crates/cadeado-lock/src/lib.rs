//! Cadeado Lock - distributed mutual exclusion over a key-value store
//!
//! This crate provides:
//! - `LockManager`: acquire / acquire-with-retry / release over a `LockStore`
//! - `LockManagerConfig`: lease duration and retry policy
//! - `LockManagerStats`: acquisition and release counters
//!
//! The manager holds no lock state of its own; the key-value pair in the
//! store is the only coordination medium, so independent process instances
//! (and concurrent tasks within one process) contend identically.

pub mod config;
pub mod manager;
pub mod stats;

pub use config::LockManagerConfig;
pub use manager::{AcquireOutcome, LockManager};
pub use stats::LockManagerStats;
