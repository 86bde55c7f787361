//! Municipality Sync Use Case
//!
//! Reads the whole record source, keeps rows from allowed countries, splits
//! them into fixed-size batches and upserts each batch in its own task. A
//! semaphore caps how many upserts run at once; the driver joins every task
//! before deciding the outcome.
//!
//! Batches that succeed stay applied even when the run fails as a whole.
//! Re-running with the same source converges because upserts are keyed by
//! import id.

use crate::commands::SyncCommand;
use crate::domain_services::MunicipalitySyncInterface;
use crate::validation::ValidateCommand;
use async_trait::async_trait;
use orgs_domain::entities::{Municipality, MunicipalityBatch};
use orgs_domain::error::{Error, Result};
use orgs_domain::ports::{MunicipalitySink, MunicipalitySource};
use orgs_domain::value_objects::{BatchResult, SyncOutcome};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default number of rows per upsert
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default ceiling on concurrent upserts
pub const DEFAULT_MAX_PROCESSES: usize = 10;

/// Pipeline parameters, read once from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub batch_size: usize,
    pub max_processes: usize,
    /// Countries whose rows are kept; an empty list keeps nothing
    pub allowed_countries: Vec<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_processes: DEFAULT_MAX_PROCESSES,
            allowed_countries: Vec::new(),
        }
    }
}

impl SyncSettings {
    fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_argument("batch size must be greater than zero"));
        }
        if self.max_processes == 0 {
            return Err(Error::invalid_argument(
                "max processes must be greater than zero",
            ));
        }
        Ok(())
    }

    fn allows(&self, row: &Municipality) -> bool {
        self.allowed_countries.iter().any(|c| *c == row.country)
    }
}

/// Split `rows` into numbered batches of `batch_size`, keeping a final
/// partial batch
pub fn partition(rows: Vec<Municipality>, batch_size: usize) -> Vec<MunicipalityBatch> {
    let size = batch_size.max(1);
    let mut batches = Vec::with_capacity(rows.len().div_ceil(size));
    let mut rows = rows.into_iter().peekable();

    while rows.peek().is_some() {
        batches.push(MunicipalityBatch {
            number: batches.len() + 1,
            rows: rows.by_ref().take(size).collect(),
        });
    }
    batches
}

/// Municipality synchronization service implementation
pub struct MunicipalitySyncService {
    source: Arc<dyn MunicipalitySource>,
    sink: Arc<dyn MunicipalitySink>,
    settings: SyncSettings,
    cancel: CancellationToken,
}

impl MunicipalitySyncService {
    pub fn new(
        source: Arc<dyn MunicipalitySource>,
        sink: Arc<dyn MunicipalitySink>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            source,
            sink,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop admitting batches once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Wait for an admission slot, then upsert the batch once
    ///
    /// A batch still waiting when cancellation fires is never started and
    /// reports `Error::Cancelled`. Admitted upserts run to completion.
    async fn run_batch(
        sink: Arc<dyn MunicipalitySink>,
        semaphore: Arc<Semaphore>,
        cancel: CancellationToken,
        batch: MunicipalityBatch,
    ) -> BatchResult {
        let permit = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            permit = semaphore.acquire_owned() => permit.ok(),
        };

        let Some(_permit) = permit else {
            debug!(batch = batch.number, "batch not admitted before cancellation");
            return BatchResult::failed(
                batch.number,
                Error::cancelled(format!("municipality batch {}", batch.number)),
            );
        };

        match sink.upsert_many(&batch.rows).await {
            Ok(summary) => {
                debug!(
                    batch = batch.number,
                    rows = batch.len(),
                    upserted = summary.upserted,
                    modified = summary.modified,
                    "batch synced"
                );
                BatchResult::synced(batch.number, summary.synced())
            }
            Err(e) => {
                warn!(batch = batch.number, rows = batch.len(), error = %e, "batch failed to sync");
                BatchResult::failed(batch.number, e)
            }
        }
    }

    /// Run every batch and wait for all of them
    async fn process(&self, batches: Vec<MunicipalityBatch>) -> Vec<BatchResult> {
        let semaphore = Arc::new(Semaphore::new(self.settings.max_processes));
        let mut tasks = JoinSet::new();
        let mut numbers = HashMap::with_capacity(batches.len());

        for batch in batches {
            let number = batch.number;
            let handle = tasks.spawn(Self::run_batch(
                Arc::clone(&self.sink),
                Arc::clone(&semaphore),
                self.cancel.clone(),
                batch,
            ));
            numbers.insert(handle.id(), number);
        }

        let mut results = Vec::with_capacity(numbers.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, result)) => results.push(result),
                Err(e) => {
                    let number = numbers.get(&e.id()).copied().unwrap_or_default();
                    warn!(batch = number, error = %e, "batch task did not complete");
                    results.push(BatchResult::failed(
                        number,
                        Error::internal(format!("batch {number} task failed: {e}")),
                    ));
                }
            }
        }
        results
    }
}

#[async_trait]
impl MunicipalitySyncInterface for MunicipalitySyncService {
    async fn sync(&self, command: SyncCommand) -> Result<SyncOutcome> {
        command.validate_command()?;
        self.settings.validate()?;

        let rows = self.source.read_all(&command.source).await?;
        let total = rows.len();
        let kept: Vec<Municipality> = rows
            .into_iter()
            .filter(|row| self.settings.allows(row))
            .collect();

        let batches = partition(kept, self.settings.batch_size);
        debug!(
            source = %command.source,
            rows = total,
            batches = batches.len(),
            max_processes = self.settings.max_processes,
            "starting municipality sync"
        );

        let mut processed = 0;
        let mut errors = Vec::new();
        for result in self.process(batches).await {
            processed += result.synced_records;
            if let Some(e) = result.error {
                errors.push(e);
            }
        }

        if !errors.is_empty() {
            warn!(failed = errors.len(), "municipality sync finished with errors");
            return Err(Error::sync_failed(errors));
        }

        info!(processed, source = %command.source, "municipality sync complete");
        Ok(SyncOutcome {
            processed,
            source: command.source,
        })
    }
}
