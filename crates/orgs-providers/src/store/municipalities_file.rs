//! JSON file municipality store
//!
//! Keeps the whole municipality set in one JSON document, loaded on first
//! use. Each write goes to a sibling `.tmp` file that is then renamed over
//! the target, so an interrupted write leaves the previous snapshot intact.

use async_trait::async_trait;
use orgs_domain::entities::Municipality;
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::MunicipalitySink;
use orgs_domain::value_objects::UpsertSummary;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

type Documents = BTreeMap<i64, Municipality>;

/// Municipalities keyed by import id, persisted to a JSON file
#[derive(Debug)]
pub struct JsonFileMunicipalityStore {
    path: PathBuf,
    documents: Mutex<Option<Documents>>,
}

impl JsonFileMunicipalityStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            documents: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> Result<usize> {
        let mut documents = self.documents.lock().await;
        Ok(self.loaded(&mut *documents).await?.len())
    }

    pub async fn get(&self, import_id: i64) -> Result<Option<Municipality>> {
        let mut documents = self.documents.lock().await;
        Ok(self.loaded(&mut *documents).await?.get(&import_id).cloned())
    }

    async fn loaded<'a>(&self, slot: &'a mut Option<Documents>) -> Result<&'a mut Documents> {
        if slot.is_none() {
            *slot = Some(read_snapshot(&self.path).await?);
        }
        slot.as_mut()
            .ok_or_else(|| Error::internal("municipality snapshot was not loaded"))
    }

    async fn persist(&self, documents: &Documents) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::io_with_source(format!("Failed to create {}", parent.display()), e)
            })?;
        }

        let rows: Vec<&Municipality> = documents.values().collect();
        let content = serde_json::to_vec_pretty(&rows)?;

        let tmp = temporary_path(&self.path);
        tokio::fs::write(&tmp, content).await.map_err(|e| {
            Error::io_with_source(format!("Failed to write {}", tmp.display()), e)
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            Error::io_with_source(format!("Failed to replace {}", self.path.display()), e)
        })
    }
}

/// Read the snapshot at `path`; a missing file is an empty store
async fn read_snapshot(path: &Path) -> Result<Documents> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Documents::new()),
        Err(e) => {
            return Err(Error::io_with_source(
                format!("Failed to read {}", path.display()),
                e,
            ));
        }
    };

    let rows: Vec<Municipality> = serde_json::from_slice(&content)?;
    Ok(rows.into_iter().map(|row| (row.import_id, row)).collect())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("municipalities"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl MunicipalitySink for JsonFileMunicipalityStore {
    /// Batches are applied one at a time; each write rewrites the snapshot
    async fn upsert_many(&self, rows: &[Municipality]) -> Result<UpsertSummary> {
        let mut slot = self.documents.lock().await;
        let documents = self.loaded(&mut *slot).await?;
        let mut next = documents.clone();
        let mut summary = UpsertSummary::default();

        for row in rows {
            match next.insert(row.import_id, row.clone()) {
                None => summary.upserted += 1,
                Some(previous) if previous != *row => summary.modified += 1,
                Some(_) => {}
            }
        }

        // Only a persisted snapshot becomes visible
        if summary.synced() > 0 {
            self.persist(&next).await?;
            *documents = next;
        }
        debug!(path = %self.path.display(), rows = rows.len(), "municipality batch stored");
        Ok(summary)
    }

    fn provider_name(&self) -> &str {
        "file"
    }
}
