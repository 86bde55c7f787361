//! Provider Constants

// ============================================================================
// LOCK SERVICE CONSTANTS
// ============================================================================

/// Namespace prepended to every lock key stored in Redis
pub const LOCK_KEY_PREFIX_DEFAULT: &str = "organisations_mutex";

/// Connection attempts made before the Redis lock service gives up
pub const REDIS_CONNECTION_RETRIES_DEFAULT: u32 = 3;

/// Pause between Redis connection attempts
pub const REDIS_CONNECTION_RETRY_DELAY_MS: u64 = 100;

/// Deletes `KEYS[1]` only while it still holds the token in `ARGV[1]`
///
/// Returns 1 when deleted, 0 when the key expired or belongs to another
/// holder.
pub const LOCK_RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;
