//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the organisations service.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, `ORGS__` env vars |
//! | [`logging`] | Structured logging with tracing |
//! | [`shutdown`] | Root cancellation token and Ctrl-C handling |
//! | [`bootstrap`] | Composition root wiring providers into services |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Configuration defaults |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod shutdown;

pub use bootstrap::{AppContext, init_app};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use shutdown::ShutdownCoordinator;
