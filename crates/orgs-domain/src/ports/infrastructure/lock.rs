//! Distributed Lock Service Port
//!
//! Defines the contract for a remote, TTL-based lock service. The service,
//! not the caller, is the source of truth for whether a lock is held.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Lock guard token returned when a lock is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockGuard {
    /// Lock key
    pub key: String,
    /// Unique token for this lock acquisition
    pub token: String,
}

/// What the lock service did on release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The lock was held by this guard and is now free
    Released,
    /// The lock had expired, was already released, or is owned by someone else
    NotHeld,
}

/// Distributed lock service interface
#[async_trait]
pub trait LockService: Send + Sync {
    /// Make a single attempt to obtain `key` for `ttl`
    ///
    /// Returns `Ok(None)` when the key is currently held elsewhere; errors
    /// are reserved for connectivity or protocol failures.
    async fn try_obtain(&self, key: &str, ttl: Duration) -> Result<Option<LockGuard>>;

    /// Release a previously obtained lock
    async fn release(&self, guard: &LockGuard) -> Result<ReleaseOutcome>;

    /// Short name of the backing implementation
    fn provider_name(&self) -> &str;
}
