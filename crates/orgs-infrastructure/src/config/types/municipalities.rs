//! Municipality reference data configuration types

use crate::constants::{
    MUNICIPALITY_STORE_DEFAULT_PATH, SYNC_DEFAULT_BATCH_SIZE, SYNC_DEFAULT_MAX_PROCESSES,
};
use orgs_application::SyncSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Municipality configuration container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalitiesConfig {
    /// Synchronization pipeline settings
    #[serde(default)]
    pub sync: MunicipalitySyncConfig,

    /// Where synchronized municipalities are kept
    #[serde(default)]
    pub store: MunicipalityStoreConfig,
}

/// Municipality store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MunicipalityStoreProvider {
    /// JSON snapshot on disk, kept between runs
    #[default]
    File,
    /// Process-local map, discarded on exit
    Memory,
}

/// Municipality store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MunicipalityStoreConfig {
    pub provider: MunicipalityStoreProvider,

    /// Snapshot location for the file provider
    pub path: PathBuf,
}

impl Default for MunicipalityStoreConfig {
    fn default() -> Self {
        Self {
            provider: MunicipalityStoreProvider::default(),
            path: PathBuf::from(MUNICIPALITY_STORE_DEFAULT_PATH),
        }
    }
}

/// Municipality synchronization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MunicipalitySyncConfig {
    /// Rows per upsert batch
    pub batch_size: usize,

    /// Batches upserted concurrently
    pub max_processes: usize,

    /// Countries to import; rows from any other country are skipped
    pub countries: Vec<String>,
}

impl Default for MunicipalitySyncConfig {
    fn default() -> Self {
        Self {
            batch_size: SYNC_DEFAULT_BATCH_SIZE,
            max_processes: SYNC_DEFAULT_MAX_PROCESSES,
            countries: Vec::new(),
        }
    }
}

impl From<&MunicipalitySyncConfig> for SyncSettings {
    fn from(config: &MunicipalitySyncConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            max_processes: config.max_processes,
            allowed_countries: config.countries.clone(),
        }
    }
}
