//! Configuration types module

pub mod app;
pub mod lock;
pub mod logging;
pub mod municipalities;
pub mod redis;

// Re-export main types
pub use app::AppConfig;
pub use lock::{LockConfig, LockProvider};
pub use logging::{LogFormat, LoggingConfig};
pub use municipalities::{
    MunicipalitiesConfig, MunicipalityStoreConfig, MunicipalityStoreProvider,
    MunicipalitySyncConfig,
};
pub use redis::RedisConfig;
