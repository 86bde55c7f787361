//! Venue repository port

use crate::entities::Venue;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Insert (no id) or replace (with id), returning the persisted entity
    async fn save(&self, venue: Venue) -> Result<Venue>;

    async fn by_slug_and_organisation(&self, slug: &str, organisation_id: &str) -> Result<Venue>;

    async fn get(&self, id: &str, organisation_id: &str) -> Result<Venue>;

    async fn delete(&self, venue: &Venue) -> Result<()>;
}
