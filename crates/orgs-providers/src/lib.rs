//! # Organisations Service - Provider Implementations
//!
//! Adapters implementing the ports defined in `orgs-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Lock | `LockService` | Redis, InMemory |
//! | Store | `OrganisationRepository`, `VenueRepository`, `MunicipalitySink` | InMemory |
//! | Source | `MunicipalitySource` | Csv |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! orgs-providers = { version = "0.1", default-features = false, features = ["source-csv"] }
//! ```

pub use orgs_domain::error::{Error, Result};
pub use orgs_domain::ports::{
    LockService, MunicipalitySink, MunicipalitySource, OrganisationRepository, VenueRepository,
};

/// Provider-specific constants
pub mod constants;

/// Lock service implementations
pub mod lock;

/// Record source implementations
pub mod source;

/// Document store implementations
pub mod store;
