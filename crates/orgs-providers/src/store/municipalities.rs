//! In-memory municipality store

use async_trait::async_trait;
use orgs_domain::entities::Municipality;
use orgs_domain::error::Result;
use orgs_domain::ports::MunicipalitySink;
use orgs_domain::value_objects::UpsertSummary;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Municipalities keyed by import id
#[derive(Debug, Default)]
pub struct InMemoryMunicipalityStore {
    documents: RwLock<HashMap<i64, Municipality>>,
}

impl InMemoryMunicipalityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    pub async fn get(&self, import_id: i64) -> Option<Municipality> {
        self.documents.read().await.get(&import_id).cloned()
    }
}

#[async_trait]
impl MunicipalitySink for InMemoryMunicipalityStore {
    /// Unchanged rows count as neither upserted nor modified
    async fn upsert_many(&self, rows: &[Municipality]) -> Result<UpsertSummary> {
        let mut documents = self.documents.write().await;
        let mut summary = UpsertSummary::default();

        for row in rows {
            match documents.insert(row.import_id, row.clone()) {
                None => summary.upserted += 1,
                Some(previous) if previous != *row => summary.modified += 1,
                Some(_) => {}
            }
        }
        Ok(summary)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
