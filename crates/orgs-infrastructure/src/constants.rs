//! Infrastructure layer constants
//!
//! Defaults for configuration values. Provider-level defaults live in
//! `orgs_providers::constants` and are reused here where they overlap.

pub use orgs_providers::constants::{LOCK_KEY_PREFIX_DEFAULT, REDIS_CONNECTION_RETRIES_DEFAULT};

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "orgs.toml";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "ORGS__";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "ORGS_LOG";

// ============================================================================
// REDIS CONSTANTS
// ============================================================================

/// Default Redis URL
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379/0";

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Default TTL of mutation locks in milliseconds
pub const LOCK_DEFAULT_TTL_MS: u64 = 300;

/// Default pause between claim attempts in milliseconds
pub const LOCK_DEFAULT_RETRY_INTERVAL_MS: u64 = 100;

/// Default number of claim attempts
pub const LOCK_DEFAULT_RETRY_ATTEMPTS: u32 = 3;

// ============================================================================
// MUNICIPALITY SYNC CONSTANTS
// ============================================================================

/// Default number of rows per batch
pub const SYNC_DEFAULT_BATCH_SIZE: usize = 100;

/// Default number of batches upserted concurrently
pub const SYNC_DEFAULT_MAX_PROCESSES: usize = 10;

/// Default location of the municipality file store
pub const MUNICIPALITY_STORE_DEFAULT_PATH: &str = "data/municipalities.json";
