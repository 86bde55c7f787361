//! Application Service Interfaces

use crate::commands::{
    CreateOrganisationCommand, CreateVenueCommand, SyncCommand, UpdateOrganisationCommand,
    UpdateVenueCommand,
};
use async_trait::async_trait;
use orgs_domain::entities::{Organisation, Venue};
use orgs_domain::error::Result;
use orgs_domain::value_objects::SyncOutcome;

// ============================================================================
// Organisation Service Interface
// ============================================================================

/// Organisation Service Interface
///
/// Create and update enforce slug uniqueness across all organisations.
#[async_trait]
pub trait OrganisationServiceInterface: Send + Sync {
    /// Create an organisation with a unique slug
    async fn create(&self, command: CreateOrganisationCommand) -> Result<Organisation>;

    /// Apply a partial update; a changed slug must stay unique
    async fn update(&self, command: UpdateOrganisationCommand) -> Result<Organisation>;

    async fn get(&self, id: &str) -> Result<Organisation>;

    async fn delete(&self, id: &str) -> Result<()>;
}

// ============================================================================
// Venue Service Interface
// ============================================================================

/// Venue Service Interface
///
/// Venue slugs are unique within their organisation only.
#[async_trait]
pub trait VenueServiceInterface: Send + Sync {
    async fn create(&self, command: CreateVenueCommand) -> Result<Venue>;

    async fn update(&self, command: UpdateVenueCommand) -> Result<Venue>;

    async fn get(&self, id: &str, organisation_id: &str) -> Result<Venue>;

    async fn delete(&self, id: &str, organisation_id: &str) -> Result<()>;
}

// ============================================================================
// Municipality Sync Interface
// ============================================================================

/// Municipality Synchronization Interface
#[async_trait]
pub trait MunicipalitySyncInterface: Send + Sync {
    /// Read, filter and upsert every municipality from `command.source`
    ///
    /// Fails with `Error::SyncFailed` carrying every batch error when any
    /// batch fails; batches that succeeded stay applied.
    async fn sync(&self, command: SyncCommand) -> Result<SyncOutcome>;
}
