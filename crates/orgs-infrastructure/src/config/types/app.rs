//! Main application configuration

use super::{LockConfig, LoggingConfig, MunicipalitiesConfig, RedisConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Redis connection used by the redis lock provider
    #[serde(default)]
    pub redis: RedisConfig,

    /// Distributed lock configuration
    #[serde(default)]
    pub lock: LockConfig,

    /// Municipality reference data configuration
    #[serde(default)]
    pub municipalities: MunicipalitiesConfig,
}
