//! Lock Service Implementations
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryLockService`] | Local | TTL locks in a concurrent map, single process only |
//! | [`RedisLockService`] | Distributed | `SET NX PX` with token-checked release |

pub mod memory;
#[cfg(feature = "lock-redis")]
pub mod redis;

pub use memory::InMemoryLockService;
#[cfg(feature = "lock-redis")]
pub use redis::RedisLockService;
