//! Distributed Mutex Port
//!
//! Mutation handlers depend on this trait rather than on a lock service
//! directly, so claim semantics (retries, multi-key atomicity) live in one
//! place.

use crate::error::Result;
use crate::value_objects::LockKey;
use async_trait::async_trait;
use std::time::Duration;

/// A held lock, exclusively owned by the caller until released or expired
#[async_trait]
pub trait Lock: Send + Sync {
    /// Keys covered by this lock
    fn keys(&self) -> Vec<String>;

    /// Release the lock
    ///
    /// Idempotent: releasing an expired or already released lock succeeds.
    async fn release(&self) -> Result<()>;
}

/// Retrying mutual exclusion across service instances
#[async_trait]
pub trait DistributedMutex: Send + Sync {
    /// Claim a single key, retrying on contention
    ///
    /// Fails with `Error::LockNotClaimed` once retries are exhausted.
    async fn claim_with_backoff(&self, key: &LockKey, ttl: Duration) -> Result<Box<dyn Lock>>;

    /// Claim every key or none of them
    async fn multi_claim_with_backoff(
        &self,
        keys: &[LockKey],
        ttl: Duration,
    ) -> Result<Box<dyn Lock>>;
}
