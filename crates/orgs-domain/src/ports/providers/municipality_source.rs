//! Municipality record source port

use crate::entities::Municipality;
use crate::error::Result;
use async_trait::async_trait;

/// Bounded reference data, read whole into memory
#[async_trait]
pub trait MunicipalitySource: Send + Sync {
    /// Read every row from `location`
    async fn read_all(&self, location: &str) -> Result<Vec<Municipality>>;
}
