//! In-memory venue repository

use super::new_document_id;
use async_trait::async_trait;
use orgs_domain::constants::RESOURCE_VENUE;
use orgs_domain::entities::Venue;
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::VenueRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryVenueRepository {
    documents: RwLock<HashMap<String, Venue>>,
}

impl InMemoryVenueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Every stored venue of `organisation_id` using `slug`
    pub async fn all_with_slug(&self, organisation_id: &str, slug: &str) -> Vec<Venue> {
        self.documents
            .read()
            .await
            .values()
            .filter(|v| v.organisation_id == organisation_id && v.slug == slug)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn save(&self, mut venue: Venue) -> Result<Venue> {
        let id = venue.id.get_or_insert_with(new_document_id).clone();
        self.documents.write().await.insert(id, venue.clone());
        Ok(venue)
    }

    async fn by_slug_and_organisation(&self, slug: &str, organisation_id: &str) -> Result<Venue> {
        self.documents
            .read()
            .await
            .values()
            .find(|v| v.slug == slug && v.organisation_id == organisation_id)
            .cloned()
            .ok_or_else(|| Error::not_found(RESOURCE_VENUE, format!("{organisation_id}/{slug}")))
    }

    async fn get(&self, id: &str, organisation_id: &str) -> Result<Venue> {
        self.documents
            .read()
            .await
            .get(id)
            .filter(|v| v.organisation_id == organisation_id)
            .cloned()
            .ok_or_else(|| Error::not_found(RESOURCE_VENUE, id))
    }

    async fn delete(&self, venue: &Venue) -> Result<()> {
        let Some(id) = venue.id.as_deref() else {
            return Err(Error::invalid_argument("cannot delete an unsaved venue"));
        };

        self.documents
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(RESOURCE_VENUE, id))
    }
}
