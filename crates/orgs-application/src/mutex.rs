//! Backoff Mutex
//!
//! [`DistributedMutex`] built on a single-attempt [`LockService`]: linear
//! retry on contention, all-or-nothing multi-key claims in canonical key
//! order, and idempotent release.
//!
//! ## Example
//!
//! ```ignore
//! let mutex = BackoffMutex::new(lock_service).with_cancellation(shutdown.child_token());
//! let lock = mutex
//!     .claim_with_backoff(&LockKey::organisation_slug("acme"), Duration::from_millis(300))
//!     .await?;
//! // ... critical section ...
//! lock.release().await?;
//! ```

use async_trait::async_trait;
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::{DistributedMutex, Lock, LockGuard, LockService, ReleaseOutcome};
use orgs_domain::value_objects::LockKey;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Default pause between claim attempts
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Default number of claim attempts before giving up
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Reason reported when every attempt found the key held
const REASON_CONTENDED: &str = "lock is held elsewhere";

/// Linear backoff: a fixed interval between a fixed number of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub attempts: u32,
}

impl RetryPolicy {
    pub fn linear(interval: Duration, attempts: u32) -> Self {
        Self { interval, attempts }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::linear(DEFAULT_RETRY_INTERVAL, DEFAULT_RETRY_ATTEMPTS)
    }
}

/// Distributed mutex with retry, multi-claim and cancellation
#[derive(Clone)]
pub struct BackoffMutex {
    service: Arc<dyn LockService>,
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl BackoffMutex {
    /// Create a mutex using the default retry policy
    pub fn new(service: Arc<dyn LockService>) -> Self {
        Self {
            service,
            policy: RetryPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Abort pending retries once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    fn handle(&self, guard: LockGuard) -> ClaimedLock {
        ClaimedLock {
            service: Arc::clone(&self.service),
            guard,
            released: AtomicBool::new(false),
        }
    }

    /// Obtain `key`, retrying on contention or lock service errors
    async fn obtain(&self, key: &LockKey, ttl: Duration) -> Result<LockGuard> {
        if key.is_empty() {
            return Err(Error::invalid_argument("lock key cannot be empty"));
        }
        if ttl.is_zero() {
            return Err(Error::invalid_argument(format!(
                "lock TTL for '{key}' must be greater than zero"
            )));
        }

        let attempts = self.policy.attempts.max(1);
        let mut last_error: Option<Error> = None;

        for attempt in 1..=attempts {
            if self.cancel.is_cancelled() {
                return Err(Error::cancelled(format!("claiming lock '{key}'")));
            }

            match self.service.try_obtain(key.as_str(), ttl).await {
                Ok(Some(guard)) => {
                    debug!(
                        key = %key,
                        ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
                        attempt,
                        "claimed lock"
                    );
                    return Ok(guard);
                }
                Ok(None) => {
                    debug!(key = %key, attempt, "lock contended");
                    last_error = None;
                }
                Err(e) => {
                    warn!(key = %key, attempt, error = %e, "lock service failed to obtain lock");
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => {
                        return Err(Error::cancelled(format!("claiming lock '{key}'")));
                    }
                    () = tokio::time::sleep(self.policy.interval) => {}
                }
            }
        }

        let reason = last_error
            .as_ref()
            .map_or_else(|| REASON_CONTENDED.to_string(), ToString::to_string);

        Err(Error::LockNotClaimed {
            key: key.to_string(),
            attempts,
            reason,
            source: last_error.map(Box::new),
        })
    }
}

#[async_trait]
impl DistributedMutex for BackoffMutex {
    async fn claim_with_backoff(&self, key: &LockKey, ttl: Duration) -> Result<Box<dyn Lock>> {
        let guard = self.obtain(key, ttl).await?;
        Ok(Box::new(self.handle(guard)))
    }

    async fn multi_claim_with_backoff(
        &self,
        keys: &[LockKey],
        ttl: Duration,
    ) -> Result<Box<dyn Lock>> {
        // Canonical order so overlapping claims cannot deadlock each other
        let mut ordered: Vec<&LockKey> = keys.iter().collect();
        ordered.sort();
        ordered.dedup();

        if ordered.is_empty() {
            return Err(Error::invalid_argument("multi-claim requires at least one key"));
        }

        let mut held: Vec<ClaimedLock> = Vec::with_capacity(ordered.len());
        for key in ordered {
            match self.obtain(key, ttl).await {
                Ok(guard) => held.push(self.handle(guard)),
                Err(e) => {
                    for lock in &held {
                        if let Err(release_err) = lock.release().await {
                            error!(
                                key = %lock.guard.key,
                                error = %release_err,
                                "failed to roll back partially claimed lock"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(Box::new(MultiLock { locks: held }))
    }
}

/// A single lock obtained from the lock service
pub struct ClaimedLock {
    service: Arc<dyn LockService>,
    guard: LockGuard,
    released: AtomicBool,
}

impl ClaimedLock {
    pub fn key(&self) -> &str {
        &self.guard.key
    }
}

#[async_trait]
impl Lock for ClaimedLock {
    fn keys(&self) -> Vec<String> {
        vec![self.guard.key.clone()]
    }

    async fn release(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        match self.service.release(&self.guard).await {
            Ok(ReleaseOutcome::Released) => {
                debug!(key = %self.guard.key, "released lock");
                Ok(())
            }
            Ok(ReleaseOutcome::NotHeld) => {
                debug!(key = %self.guard.key, "lock was no longer held on release");
                Ok(())
            }
            Err(e) => {
                // Still ours as far as we know; allow another attempt
                self.released.store(false, Ordering::Release);
                Err(e)
            }
        }
    }
}

/// Every lock of a multi-claim, released together
pub struct MultiLock {
    locks: Vec<ClaimedLock>,
}

#[async_trait]
impl Lock for MultiLock {
    fn keys(&self) -> Vec<String> {
        self.locks.iter().map(|l| l.guard.key.clone()).collect()
    }

    /// Release every constituent lock; failures are logged and the first
    /// one is returned after all releases were attempted.
    async fn release(&self) -> Result<()> {
        let mut first_error = None;
        for lock in &self.locks {
            if let Err(e) = lock.release().await {
                error!(key = %lock.guard.key, error = %e, "failed to release lock");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
