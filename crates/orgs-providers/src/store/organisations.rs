//! In-memory organisation repository

use super::new_document_id;
use async_trait::async_trait;
use orgs_domain::constants::RESOURCE_ORGANISATION;
use orgs_domain::entities::Organisation;
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::OrganisationRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryOrganisationRepository {
    documents: RwLock<HashMap<String, Organisation>>,
}

impl InMemoryOrganisationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Every stored organisation using `slug`
    pub async fn all_with_slug(&self, slug: &str) -> Vec<Organisation> {
        self.documents
            .read()
            .await
            .values()
            .filter(|o| o.slug == slug)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrganisationRepository for InMemoryOrganisationRepository {
    async fn save(&self, mut organisation: Organisation) -> Result<Organisation> {
        let id = organisation.id.get_or_insert_with(new_document_id).clone();
        self.documents
            .write()
            .await
            .insert(id, organisation.clone());
        Ok(organisation)
    }

    async fn by_slug(&self, slug: &str) -> Result<Organisation> {
        self.documents
            .read()
            .await
            .values()
            .find(|o| o.slug == slug)
            .cloned()
            .ok_or_else(|| Error::not_found(RESOURCE_ORGANISATION, slug))
    }

    async fn get(&self, id: &str) -> Result<Organisation> {
        self.documents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(RESOURCE_ORGANISATION, id))
    }

    async fn delete(&self, organisation: &Organisation) -> Result<()> {
        let Some(id) = organisation.id.as_deref() else {
            return Err(Error::invalid_argument("cannot delete an unsaved organisation"));
        };

        self.documents
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(RESOURCE_ORGANISATION, id))
    }
}
