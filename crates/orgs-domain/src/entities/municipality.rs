//! Municipality reference data
//!
//! Rows follow the column contract of the external world-cities dataset;
//! `import_id` is the natural key used for idempotent upserts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    #[serde(rename = "city")]
    pub name: String,
    #[serde(rename = "city_ascii")]
    pub name_ascii: String,
    pub lat: f64,
    #[serde(rename = "lng")]
    pub long: f64,
    pub country: String,
    pub iso3: String,
    #[serde(rename = "id")]
    pub import_id: i64,
}

/// A numbered slice of rows, upserted as one unit
///
/// Numbers exist for diagnostics only; batches carry no ordering.
#[derive(Debug, Clone)]
pub struct MunicipalityBatch {
    pub number: usize,
    pub rows: Vec<Municipality>,
}

impl MunicipalityBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
