//! CSV municipality source
//!
//! Columns are matched by header name (`city`, `city_ascii`, `lat`, `lng`,
//! `country`, `iso3`, `id`); any other columns in the file are ignored.

use async_trait::async_trait;
use orgs_domain::entities::Municipality;
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::MunicipalitySource;
use std::path::Path;
use tracing::debug;

/// Reads municipalities from a CSV file on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvMunicipalitySource;

impl CsvMunicipalitySource {
    pub fn new() -> Self {
        Self
    }

    fn read_file(path: &Path) -> Result<Vec<Municipality>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                Error::io_with_source(format!("Failed to open {}", path.display()), e)
            })?;

        reader
            .deserialize::<Municipality>()
            .enumerate()
            .map(|(index, row)| {
                row.map_err(|e| {
                    Error::io_with_source(
                        format!("Invalid row {} in {}", index + 1, path.display()),
                        e,
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl MunicipalitySource for CsvMunicipalitySource {
    async fn read_all(&self, location: &str) -> Result<Vec<Municipality>> {
        let path = Path::new(location).to_path_buf();
        let rows = tokio::task::spawn_blocking(move || Self::read_file(&path))
            .await
            .map_err(|e| Error::internal(format!("CSV reader task failed: {e}")))??;

        debug!(source = location, rows = rows.len(), "read municipalities");
        Ok(rows)
    }
}
