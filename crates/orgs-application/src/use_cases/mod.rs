//! Use Cases
//!
//! Application services implementing the interfaces in
//! [`crate::domain_services`].

/// Lock-guarded critical sections
pub mod guarded_mutation;
/// Municipality synchronization pipeline
pub mod municipality_sync_service;
/// Organisation mutations
pub mod organisation_service;
/// Venue mutations
pub mod venue_service;

pub use guarded_mutation::{DEFAULT_LOCK_TTL, UniquenessGuard};
pub use municipality_sync_service::{MunicipalitySyncService, SyncSettings, partition};
pub use organisation_service::OrganisationService;
pub use venue_service::VenueService;
