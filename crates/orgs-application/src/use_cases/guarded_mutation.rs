//! Uniqueness-guarded mutations
//!
//! Runs a critical section while holding one or more distributed locks.
//! Callers do an optimistic uniqueness check before claiming, then repeat
//! it inside the critical section, where it is authoritative.

use orgs_domain::error::{Error, ErrorKind, Result};
use orgs_domain::ports::DistributedMutex;
use orgs_domain::value_objects::LockKey;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Lock TTL sized for a single document read plus write
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_millis(300);

/// Claims locks around a critical section and always releases them
#[derive(Clone)]
pub struct UniquenessGuard {
    mutex: Arc<dyn DistributedMutex>,
    ttl: Duration,
}

impl UniquenessGuard {
    pub fn new(mutex: Arc<dyn DistributedMutex>) -> Self {
        Self {
            mutex,
            ttl: DEFAULT_LOCK_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Run `critical` while holding every key in `keys`
    ///
    /// A lock that cannot be claimed surfaces as `Error::Conflict` with
    /// `conflict_message`. Release failures are logged and never replace
    /// the result of `critical`.
    pub async fn run_locked<T, F, Fut>(
        &self,
        keys: &[LockKey],
        conflict_message: &str,
        critical: F,
    ) -> Result<T>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let claimed = match keys {
            [key] => self.mutex.claim_with_backoff(key, self.ttl).await,
            _ => self.mutex.multi_claim_with_backoff(keys, self.ttl).await,
        };

        let lock = match claimed {
            Ok(lock) => lock,
            Err(e) if e.kind() == ErrorKind::LockNotClaimed => {
                debug!(error = %e, "lock not claimed, reporting conflict");
                return Err(Error::conflict(conflict_message));
            }
            Err(e) => return Err(e),
        };

        let result = critical().await;

        if let Err(e) = lock.release().await {
            error!(keys = ?lock.keys(), error = %e, "failed to release lock");
        }

        result
    }
}

/// Turn a typed not-found into `None`, keeping every other error
pub(crate) fn found<T>(lookup: Result<T>) -> Result<Option<T>> {
    match lookup {
        Ok(entity) => Ok(Some(entity)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
