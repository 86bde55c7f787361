//! Organisations service - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `orgs municipalities-sync <csv>` | Import municipality reference data from a CSV file |

use clap::Parser;
use orgs::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    orgs::run(cli).await
}
