//! Organisation repository port

use crate::entities::Organisation;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait OrganisationRepository: Send + Sync {
    /// Insert (no id) or replace (with id), returning the persisted entity
    async fn save(&self, organisation: Organisation) -> Result<Organisation>;

    async fn by_slug(&self, slug: &str) -> Result<Organisation>;

    async fn get(&self, id: &str) -> Result<Organisation>;

    async fn delete(&self, organisation: &Organisation) -> Result<()>;
}
