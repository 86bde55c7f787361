//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers.
//!
//! ## Organization
//!
//! - **infrastructure/** - Lock service and the distributed mutex built on it
//! - **repositories/** - Document store contracts per aggregate, plus the bulk sink
//! - **providers/** - External record sources

/// Infrastructure service ports
pub mod infrastructure;
/// External data provider ports
pub mod providers;
/// Document store ports
pub mod repositories;

pub use infrastructure::{DistributedMutex, Lock, LockGuard, LockService, ReleaseOutcome};
pub use providers::MunicipalitySource;
pub use repositories::{MunicipalitySink, OrganisationRepository, VenueRepository};
