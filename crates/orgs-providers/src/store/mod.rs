//! Document Store Implementations
//!
//! In-memory stores backing the repository ports. They implement the same
//! lookup contract as a document database: typed not-found errors, store
//! assigned ids and replace-on-save. They enforce no unique index, so the
//! uniqueness guard is the only thing keeping slugs unique.
//!
//! Municipalities can also be kept in a JSON file that survives restarts.

pub mod municipalities;
pub mod municipalities_file;
pub mod organisations;
pub mod venues;

pub use municipalities::InMemoryMunicipalityStore;
pub use municipalities_file::JsonFileMunicipalityStore;
pub use organisations::InMemoryOrganisationRepository;
pub use venues::InMemoryVenueRepository;

/// Identifier for a newly inserted document
pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
