//! Redis lock service
//!
//! Distributed lock service using Redis as the backend, suitable for
//! multi-instance deployments.
//!
//! ## Features
//!
//! - `SET key token NX PX ttl` for a single acquisition attempt
//! - Release deletes the key only while it still holds the caller's token
//! - Lazy connection on first use, guarded so concurrent callers share one
//!   connection manager
//!
//! ## Example
//!
//! ```ignore
//! use orgs_providers::lock::RedisLockService;
//!
//! let service = RedisLockService::new("redis://localhost:6379/0")?
//!     .with_key_prefix("organisations_mutex");
//! ```

use crate::constants::{
    LOCK_KEY_PREFIX_DEFAULT, LOCK_RELEASE_SCRIPT, REDIS_CONNECTION_RETRIES_DEFAULT,
    REDIS_CONNECTION_RETRY_DELAY_MS,
};
use async_trait::async_trait;
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::{LockGuard, LockService, ReleaseOutcome};
use redis::aio::ConnectionManager;
use redis::{Client, Script};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use uuid::Uuid;

/// Redis lock service
pub struct RedisLockService {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    release_script: Script,
    key_prefix: String,
    connection_retries: u32,
}

impl RedisLockService {
    /// Create a lock service for `url`; no connection is made yet
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| Error::Configuration {
            message: format!("Invalid Redis URL: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            release_script: Script::new(LOCK_RELEASE_SCRIPT),
            key_prefix: LOCK_KEY_PREFIX_DEFAULT.to_string(),
            connection_retries: REDIS_CONNECTION_RETRIES_DEFAULT,
        })
    }

    #[must_use]
    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_connection_retries(mut self, retries: u32) -> Self {
        self.connection_retries = retries;
        self
    }

    fn namespaced(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{key}", self.key_prefix)
        }
    }

    /// Shared connection, established on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        self.connection
            .get_or_try_init(|| self.connect())
            .await
            .cloned()
    }

    async fn connect(&self) -> Result<ConnectionManager> {
        let attempts = self.connection_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.ping().await {
                Ok(connection) => {
                    debug!(attempt, "connected to redis");
                    return Ok(connection);
                }
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "redis connection attempt failed");
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tokio::time::sleep(Duration::from_millis(REDIS_CONNECTION_RETRY_DELAY_MS)).await;
            }
        }

        Err(match last_error {
            Some(e) => Error::network_with_source(
                format!("Failed to connect to Redis after {attempts} attempt(s)"),
                e,
            ),
            None => Error::network("Failed to connect to Redis"),
        })
    }

    async fn ping(&self) -> redis::RedisResult<ConnectionManager> {
        let mut connection = ConnectionManager::new(self.client.clone()).await?;
        redis::cmd("PING")
            .query_async::<String>(&mut connection)
            .await?;
        Ok(connection)
    }
}

#[async_trait]
impl LockService for RedisLockService {
    async fn try_obtain(&self, key: &str, ttl: Duration) -> Result<Option<LockGuard>> {
        let mut connection = self.connection().await?;
        let namespaced = self.namespaced(key);
        let token = Uuid::new_v4().to_string();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let reply: Option<String> = redis::cmd("SET")
            .arg(&namespaced)
            .arg(&token)
            .arg("NX")
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut connection)
            .await
            .map_err(|e| Error::network_with_source(format!("Redis SET NX failed for '{namespaced}'"), e))?;

        Ok(reply.map(|_| LockGuard {
            key: key.to_string(),
            token,
        }))
    }

    async fn release(&self, guard: &LockGuard) -> Result<ReleaseOutcome> {
        let mut connection = self.connection().await?;
        let namespaced = self.namespaced(&guard.key);

        let deleted: i64 = self
            .release_script
            .key(&namespaced)
            .arg(&guard.token)
            .invoke_async(&mut connection)
            .await
            .map_err(|e| Error::network_with_source(format!("Redis release failed for '{namespaced}'"), e))?;

        Ok(if deleted > 0 {
            ReleaseOutcome::Released
        } else {
            ReleaseOutcome::NotHeld
        })
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}
