//! Domain Services
//!
//! Interfaces for the use cases callers invoke. The command layer depends
//! on these traits, never on the concrete services.
//!
//! ## Domain Services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`OrganisationServiceInterface`] | Uniqueness-guarded organisation mutations |
//! | [`VenueServiceInterface`] | Uniqueness-guarded venue mutations, scoped per organisation |
//! | [`MunicipalitySyncInterface`] | Bounded-concurrency municipality synchronization |

/// Mutation service interfaces
pub mod services;

pub use services::{MunicipalitySyncInterface, OrganisationServiceInterface, VenueServiceInterface};
