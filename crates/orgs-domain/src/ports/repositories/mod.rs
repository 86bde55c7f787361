//! Document Store Ports
//!
//! Lookups by id or unique field return `Error::NotFound` when nothing
//! matches; uniqueness guards rely on that typed error.

/// Municipality bulk sink
pub mod municipality_repository;
/// Organisation repository
pub mod organisation_repository;
/// Venue repository
pub mod venue_repository;

pub use municipality_repository::MunicipalitySink;
pub use organisation_repository::OrganisationRepository;
pub use venue_repository::VenueRepository;
