//! Redis configuration types

use crate::constants::{REDIS_CONNECTION_RETRIES_DEFAULT, REDIS_DEFAULT_URL};
use serde::{Deserialize, Serialize};

/// Redis connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379/0`
    pub url: String,

    /// Connection attempts made on first use
    pub connection_retries: u32,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: REDIS_DEFAULT_URL.to_string(),
            connection_retries: REDIS_CONNECTION_RETRIES_DEFAULT,
        }
    }
}
