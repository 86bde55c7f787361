//! Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for the organisations service
#[derive(Parser, Debug)]
#[command(name = "orgs")]
#[command(about = "Organisations service - organisations, venues and municipality reference data")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults to `orgs.toml` in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sync municipalities from a world cities CSV file
    #[command(name = "municipalities-sync")]
    MunicipalitiesSync {
        /// CSV file with a `city,city_ascii,lat,lng,country,...,id` header
        csv: PathBuf,
    },
}
