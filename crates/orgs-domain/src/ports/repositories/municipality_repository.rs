//! Municipality bulk sink port

use crate::entities::Municipality;
use crate::error::Result;
use crate::value_objects::UpsertSummary;
use async_trait::async_trait;

/// Bulk write capability used by the synchronization pipeline
#[async_trait]
pub trait MunicipalitySink: Send + Sync {
    /// Replace-or-insert every row keyed by its `import_id`
    ///
    /// Must be safe to call repeatedly with the same rows.
    async fn upsert_many(&self, rows: &[Municipality]) -> Result<UpsertSummary>;

    /// Backend name for logs
    fn provider_name(&self) -> &str;
}
