//! Configuration management
//!
//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `ORGS__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::*;
