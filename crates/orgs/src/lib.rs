//! # Organisations Service
//!
//! Organisations, their venues and the municipality reference data venues
//! are located in. Mutations that must keep slugs unique are serialised
//! through a distributed mutex; municipality data is imported by a
//! bounded-concurrency batch pipeline.
//!
//! ## Architecture
//!
//! - `domain` - entities, errors and port traits
//! - `application` - commands, the backoff mutex and the use cases
//! - `infrastructure` - configuration, logging, shutdown and wiring
//! - [`cli`] / [`commands`] - the `orgs` command line

use anyhow::Context;
use orgs_infrastructure::logging::init_logging;
use orgs_infrastructure::{ConfigLoader, ShutdownCoordinator, init_app};
use std::io;
use std::process::ExitCode;
use tracing::warn;

pub mod cli;
pub mod commands;

/// Domain layer - re-exported for convenience
pub mod domain {
    pub use orgs_domain::*;
}

/// Application layer - re-exported for convenience
pub mod application {
    pub use orgs_application::*;
}

/// Infrastructure layer - re-exported for convenience
pub mod infrastructure {
    pub use orgs_infrastructure::*;
}

pub use cli::{Cli, Command};

/// Load configuration, wire the services and dispatch `cli.command`
///
/// Ctrl-C cancels in-flight work through the shutdown coordinator.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let shutdown = ShutdownCoordinator::new();
    let ctrl_c = shutdown.listen_for_ctrl_c();
    let context = init_app(config, shutdown.clone()).context("Failed to initialize application")?;

    let succeeded = match &cli.command {
        Command::MunicipalitiesSync { csv } => {
            let sync = context.municipality_sync();
            commands::municipalities_sync(sync.as_ref(), csv, &mut io::stdout()).await?
        }
    };

    shutdown.signal_shutdown();
    if let Err(e) = ctrl_c.await {
        warn!(error = %e, "Ctrl-C listener ended abnormally");
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
