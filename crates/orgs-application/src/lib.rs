//! Application Layer - Organisations Service
//!
//! This crate contains the application layer of the organisations service:
//! the commands callers send, the distributed mutex that serialises
//! conflicting mutations, and the use cases built on top of them.
//!
//! ## Architecture
//!
//! The application layer:
//! - Defines command types and their declarative validation rules
//! - Builds retry and multi-key semantics on top of the lock service port
//! - Implements the uniqueness-guarded mutation protocol per aggregate
//! - Drives the bounded-concurrency municipality synchronization pipeline
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `orgs-domain`: entities, value objects, errors and port traits
//! - Pure Rust libraries for async, validation and logging

pub mod commands;
pub mod domain_services;
pub mod mutex;
pub mod use_cases;
pub mod validation;

pub use commands::*;
pub use domain_services::*;
pub use mutex::{BackoffMutex, RetryPolicy};
pub use use_cases::*;
pub use validation::ValidateCommand;
