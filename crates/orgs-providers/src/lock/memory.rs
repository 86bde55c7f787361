//! In-memory lock service
//!
//! Honours TTLs like the remote service does, so expiry behaviour can be
//! exercised without a server. Locks are only visible within this process.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use orgs_domain::error::Result;
use orgs_domain::ports::{LockGuard, LockService, ReleaseOutcome};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Held {
    token: String,
    expires_at: Instant,
}

impl Held {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Process-local [`LockService`]
#[derive(Debug, Default)]
pub struct InMemoryLockService {
    locks: DashMap<String, Held>,
}

impl InMemoryLockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is currently held and unexpired
    pub fn is_held(&self, key: &str) -> bool {
        self.locks.get(key).is_some_and(|held| held.is_live())
    }
}

#[async_trait]
impl LockService for InMemoryLockService {
    async fn try_obtain(&self, key: &str, ttl: Duration) -> Result<Option<LockGuard>> {
        let held = Held {
            token: Uuid::new_v4().to_string(),
            expires_at: Instant::now() + ttl,
        };
        let token = held.token.clone();

        match self.locks.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                if entry.get().is_live() {
                    return Ok(None);
                }
                entry.insert(held);
            }
            Entry::Vacant(entry) => {
                entry.insert(held);
            }
        }

        Ok(Some(LockGuard {
            key: key.to_string(),
            token,
        }))
    }

    async fn release(&self, guard: &LockGuard) -> Result<ReleaseOutcome> {
        let removed = self
            .locks
            .remove_if(&guard.key, |_, held| held.token == guard.token && held.is_live());

        Ok(if removed.is_some() {
            ReleaseOutcome::Released
        } else {
            ReleaseOutcome::NotHeld
        })
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
