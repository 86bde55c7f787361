//! Domain Layer - Organisations Service
//!
//! Core types and contracts for the organisations service. This crate holds
//! no I/O: entities, value objects, the error taxonomy and the port traits
//! that adapters implement.
//!
//! ## Modules
//!
//! - [`entities`] - Organisation, venue and municipality records
//! - [`value_objects`] - Validation failures, lock keys, sync results
//! - [`ports`] - Lock service, distributed mutex, repositories, record sources
//! - [`error`] - Error taxonomy with an exhaustive [`error::ErrorKind`]

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorKind, Result};
