//! Distributed lock configuration types

use crate::constants::{
    LOCK_DEFAULT_RETRY_ATTEMPTS, LOCK_DEFAULT_RETRY_INTERVAL_MS, LOCK_DEFAULT_TTL_MS,
    LOCK_KEY_PREFIX_DEFAULT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lock service backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockProvider {
    /// Redis `SET NX PX` locks shared between processes
    #[default]
    Redis,
    /// Process-local locks, for tests and single-instance runs
    Memory,
}

/// Distributed lock configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Lock service backend
    pub provider: LockProvider,

    /// Lifetime of a mutation lock in milliseconds
    pub ttl_ms: u64,

    /// Pause between claim attempts in milliseconds
    pub retry_interval_ms: u64,

    /// Total claim attempts before giving up
    pub retry_attempts: u32,

    /// Namespace prepended to every lock key
    pub key_prefix: String,
}

impl LockConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            provider: LockProvider::default(),
            ttl_ms: LOCK_DEFAULT_TTL_MS,
            retry_interval_ms: LOCK_DEFAULT_RETRY_INTERVAL_MS,
            retry_attempts: LOCK_DEFAULT_RETRY_ATTEMPTS,
            key_prefix: LOCK_KEY_PREFIX_DEFAULT.to_string(),
        }
    }
}
