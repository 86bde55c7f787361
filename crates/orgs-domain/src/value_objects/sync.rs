//! Batch synchronization values

use crate::error::Error;

/// What a bulk upsert did to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Records that did not exist and were inserted
    pub upserted: usize,
    /// Existing records that were replaced with different content
    pub modified: usize,
}

impl UpsertSummary {
    /// Records touched by the upsert
    pub fn synced(&self) -> usize {
        self.upserted + self.modified
    }
}

/// Outcome of a single batch worker
#[derive(Debug)]
pub struct BatchResult {
    /// Diagnostic batch number
    pub number: usize,
    pub synced_records: usize,
    pub error: Option<Error>,
}

impl BatchResult {
    pub fn synced(number: usize, synced_records: usize) -> Self {
        Self {
            number,
            synced_records,
            error: None,
        }
    }

    pub fn failed(number: usize, error: Error) -> Self {
        Self {
            number,
            synced_records: 0,
            error: Some(error),
        }
    }
}

/// Result of a fully successful synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Sum of every batch's synced records
    pub processed: usize,
    /// Where the records were read from
    pub source: String,
}
