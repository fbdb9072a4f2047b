//! Lock manager configuration

use std::time::Duration;

use serde::Deserialize;

/// Lease duration and retry policy for the lock manager.
///
/// Deserializable so a host application can load it from its configuration
/// file; absent fields fall back to the defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LockManagerConfig {
    /// Lease duration for an acquired lock. The lease expires unconditionally
    /// after this long regardless of whether the holder is still working;
    /// size it to exceed the expected critical-section duration.
    #[serde(default = "default_lock_timeout_seconds")]
    pub lock_timeout_seconds: u64,

    /// Attempt budget for `acquire_with_retry`, inclusive of the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed pause between attempts
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

fn default_lock_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_interval_ms() -> u64 {
    100
}

impl Default for LockManagerConfig {
    fn default() -> Self {
        Self {
            lock_timeout_seconds: default_lock_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_interval_ms: default_retry_interval_ms(),
        }
    }
}

impl LockManagerConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_seconds)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}
