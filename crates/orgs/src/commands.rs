//! Command handlers
//!
//! Handlers write their report to the given writer and return whether the
//! command succeeded; the caller owns the exit code.

use orgs_application::{MunicipalitySyncInterface, SyncCommand};
use std::io::{self, Write};
use std::path::Path;

/// Run a municipality sync from `csv` and report the outcome
///
/// On failure the top-level error is followed by one line per grouped
/// (per-batch) error.
pub async fn municipalities_sync<W: Write>(
    sync: &dyn MunicipalitySyncInterface,
    csv: &Path,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "Syncing municipalities...")?;

    let source = csv.display().to_string();
    match sync.sync(SyncCommand::new(source)).await {
        Ok(outcome) => {
            writeln!(
                out,
                "Successfully synced {} municipalities from {}",
                outcome.processed, outcome.source
            )?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "Error: {err}")?;
            writeln!(out)?;
            for grouped in err.grouped() {
                writeln!(out, "{grouped}")?;
            }
            Ok(false)
        }
    }
}
