//! Domain Entities
//!
//! Aggregate roots persisted by the document store, plus the municipality
//! reference record ingested by the batch synchronization pipeline.

/// Municipality reference data
pub mod municipality;
/// Organisation aggregate
pub mod organisation;
/// Venue aggregate
pub mod venue;

pub use municipality::{Municipality, MunicipalityBatch};
pub use organisation::Organisation;
pub use venue::{Address, Coordinates, Venue, VenueType};
