//! Tests for command line parsing

use clap::Parser;
use orgs::{Cli, Command};
use std::path::PathBuf;

#[test]
fn test_parses_municipalities_sync() {
    let cli = Cli::try_parse_from(["orgs", "municipalities-sync", "worldcities.csv"]).unwrap();

    assert_eq!(cli.config, None);
    assert_eq!(
        cli.command,
        Command::MunicipalitiesSync {
            csv: PathBuf::from("worldcities.csv")
        }
    );
}

#[test]
fn test_config_flag_before_or_after_subcommand() {
    let before = Cli::try_parse_from([
        "orgs",
        "--config",
        "prod.toml",
        "municipalities-sync",
        "a.csv",
    ])
    .unwrap();
    let after =
        Cli::try_parse_from(["orgs", "municipalities-sync", "a.csv", "-c", "prod.toml"]).unwrap();

    assert_eq!(before.config, Some(PathBuf::from("prod.toml")));
    assert_eq!(after.config, Some(PathBuf::from("prod.toml")));
}

#[test]
fn test_csv_path_is_required() {
    assert!(Cli::try_parse_from(["orgs", "municipalities-sync"]).is_err());
    assert!(Cli::try_parse_from(["orgs"]).is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
