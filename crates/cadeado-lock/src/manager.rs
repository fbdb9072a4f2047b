//! Distributed lock manager
//!
//! Best-effort mutual exclusion over a named resource, shared across
//! independent process instances with no coordination channel other than the
//! key-value store itself. Crashed holders are tolerated through lease
//! expiry; contention through bounded linear retry; and a non-holder can
//! never release another holder's lock because release is an atomic
//! compare-and-delete against the holder's token.

use std::sync::Arc;
use std::time::Duration;

use cadeado_store::LockStore;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::LockManagerConfig;
use crate::stats::{LockManagerStats, StatsCollector};

/// Result of a cancellable retrying acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The lock was acquired
    Acquired,
    /// Every attempt in the budget found the key held
    Contended,
    /// The cancel signal fired during a backoff wait
    Cancelled,
}

/// Lock manager over a `LockStore`.
///
/// Holds no lock state in-process; every call is independent, so one manager
/// can be shared freely across tasks. Contending on the same key from within
/// one process behaves exactly like cross-process contention.
pub struct LockManager {
    store: Arc<dyn LockStore>,
    config: LockManagerConfig,
    stats: StatsCollector,
}

impl LockManager {
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self::with_config(store, LockManagerConfig::default())
    }

    pub fn with_config(store: Arc<dyn LockStore>, config: LockManagerConfig) -> Self {
        Self {
            store,
            config,
            stats: StatsCollector::default(),
        }
    }

    pub fn config(&self) -> &LockManagerConfig {
        &self.config
    }

    /// Try once to acquire the lock at `key` with the caller-chosen `token`.
    ///
    /// The token must uniquely identify this acquisition attempt (not just
    /// this process), otherwise release cannot distinguish holders; callers
    /// that have no natural identity should use [`acquire_generated`].
    ///
    /// Returns `true` iff the store created the lease. `false` covers
    /// contention, rejected input, and store communication failure alike:
    /// the caller does not have the lock.
    ///
    /// [`acquire_generated`]: LockManager::acquire_generated
    pub async fn acquire(&self, key: &str, token: &str) -> bool {
        if key.is_empty() || token.is_empty() {
            warn!("Lock acquire rejected: empty key or token");
            return false;
        }

        self.stats.record_attempt();

        match self
            .store
            .set_if_absent(key, token, self.config.lock_timeout())
            .await
        {
            Ok(true) => {
                debug!(key = %key, token = %token, "Lock acquired");
                self.stats.record_acquired();
                true
            }
            Ok(false) => {
                debug!(key = %key, "Lock contended");
                self.stats.record_contended();
                false
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Store failure during acquire, treating as not acquired");
                self.stats.record_store_error();
                false
            }
        }
    }

    /// Acquire with a generated token, returning the token on success.
    ///
    /// The token is a UUIDv4, unique per call, so the uniqueness contract of
    /// [`acquire`](LockManager::acquire) is met without caller involvement.
    /// The returned token must be kept for the matching `release`.
    pub async fn acquire_generated(&self, key: &str) -> Option<String> {
        let token = Uuid::new_v4().to_string();
        self.acquire(key, &token).await.then_some(token)
    }

    /// Acquire with up to `max_retries` attempts (inclusive of the first),
    /// sleeping `retry_interval` between attempts.
    ///
    /// Fixed linear backoff: the lock is expected to be low-contention and
    /// short-held, so adaptive backoff buys nothing. Returns `true` on the
    /// first successful attempt, `false` once the budget is exhausted.
    pub async fn acquire_with_retry(
        &self,
        key: &str,
        token: &str,
        max_retries: u32,
        retry_interval: Duration,
    ) -> bool {
        matches!(
            self.retry_loop(key, token, max_retries, retry_interval, None)
                .await,
            AcquireOutcome::Acquired
        )
    }

    /// `acquire_with_retry` using the configured attempt budget and interval
    pub async fn acquire_with_retry_default(&self, key: &str, token: &str) -> bool {
        self.acquire_with_retry(
            key,
            token,
            self.config.max_retries,
            self.config.retry_interval(),
        )
        .await
    }

    /// Retrying acquisition that a shutdown signal can abort.
    ///
    /// A message on `cancel` aborts the backoff wait promptly (not merely
    /// between attempts) and yields [`AcquireOutcome::Cancelled`], which
    /// callers can tell apart from ordinary lock pressure.
    pub async fn acquire_with_retry_cancellable(
        &self,
        key: &str,
        token: &str,
        max_retries: u32,
        retry_interval: Duration,
        cancel: &mut mpsc::Receiver<()>,
    ) -> AcquireOutcome {
        self.retry_loop(key, token, max_retries, retry_interval, Some(cancel))
            .await
    }

    async fn retry_loop(
        &self,
        key: &str,
        token: &str,
        max_retries: u32,
        retry_interval: Duration,
        mut cancel: Option<&mut mpsc::Receiver<()>>,
    ) -> AcquireOutcome {
        for attempt in 1..=max_retries {
            if self.acquire(key, token).await {
                return AcquireOutcome::Acquired;
            }

            // No wait after the final attempt
            if attempt == max_retries {
                break;
            }

            match cancel.as_deref_mut() {
                Some(rx) => {
                    tokio::select! {
                        _ = tokio::time::sleep(retry_interval) => {}
                        _ = rx.recv() => {
                            debug!(key = %key, attempt, "Lock wait cancelled");
                            return AcquireOutcome::Cancelled;
                        }
                    }
                }
                None => tokio::time::sleep(retry_interval).await,
            }
        }

        AcquireOutcome::Contended
    }

    /// Release the lock at `key` if this caller still holds it.
    ///
    /// Executes the store's atomic compare-and-delete against `token`.
    /// Returns `true` iff this call deleted the entry; `false` means the
    /// lease already expired, someone else holds the key, or it never
    /// existed — either way the caller no longer holds the lock and should
    /// abandon any remaining critical-section work.
    pub async fn release(&self, key: &str, token: &str) -> bool {
        if key.is_empty() || token.is_empty() {
            warn!("Lock release rejected: empty key or token");
            return false;
        }

        match self.store.compare_and_delete(key, token).await {
            Ok(true) => {
                debug!(key = %key, token = %token, "Lock released");
                self.stats.record_released();
                true
            }
            Ok(false) => {
                debug!(key = %key, "Lock release denied, not held by this token");
                self.stats.record_release_denied();
                false
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Store failure during release");
                self.stats.record_store_error();
                false
            }
        }
    }

    pub fn stats(&self) -> LockManagerStats {
        self.stats.snapshot()
    }
}
