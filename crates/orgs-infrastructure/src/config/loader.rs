//! Configuration loader
//!
//! Handles loading configuration from defaults, a TOML file and
//! environment variables using Figment.

use crate::config::{
    AppConfig, LockConfig, LockProvider, LoggingConfig, MunicipalityStoreConfig,
    MunicipalityStoreProvider, MunicipalitySyncConfig,
};
use crate::constants::{CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_FILENAME};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use orgs_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (the configured path, else `orgs.toml` in the working directory)
    /// 3. Environment variables with prefix (e.g., `ORGS__MUNICIPALITIES__SYNC__BATCH_SIZE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                // Explicit paths must exist
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).split(CONFIG_ENV_SEPARATOR));

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let candidate = env::current_dir().ok()?.join(DEFAULT_CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_lock_config(&config.lock)?;
    if config.lock.provider == LockProvider::Redis {
        validate_redis_url(&config.redis.url)?;
    }
    validate_sync_config(&config.municipalities.sync)?;
    validate_store_config(&config.municipalities.store)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_lock_config(config: &LockConfig) -> Result<()> {
    if config.ttl_ms == 0 {
        return Err(Error::Configuration {
            message: "Lock TTL cannot be 0".to_string(),
            source: None,
        });
    }

    if config.retry_attempts == 0 {
        return Err(Error::Configuration {
            message: "Lock retry attempts cannot be 0".to_string(),
            source: None,
        });
    }

    Ok(())
}

fn validate_redis_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::Configuration {
            message: "Redis URL is required when the redis lock provider is selected".to_string(),
            source: None,
        });
    }

    Ok(())
}

fn validate_sync_config(config: &MunicipalitySyncConfig) -> Result<()> {
    if config.batch_size == 0 {
        return Err(Error::Configuration {
            message: "Municipality sync batch size cannot be 0".to_string(),
            source: None,
        });
    }

    if config.max_processes == 0 {
        return Err(Error::Configuration {
            message: "Municipality sync max processes cannot be 0".to_string(),
            source: None,
        });
    }

    Ok(())
}

fn validate_store_config(config: &MunicipalityStoreConfig) -> Result<()> {
    if config.provider == MunicipalityStoreProvider::File && config.path.as_os_str().is_empty() {
        return Err(Error::Configuration {
            message: "Municipality store path is required when the file store provider is selected"
                .to_string(),
            source: None,
        });
    }

    Ok(())
}
