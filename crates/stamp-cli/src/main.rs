//! Offline driver for the stamp panel
//!
//! Runs a full panel session against a JSON snapshot of the asset service,
//! printing the panel state, the rendered stamps, or the bulk update a
//! stamp click would send.

mod snapshot;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use snapshot::{Snapshot, SnapshotApi, SnapshotHost};
use stamp_core::StampConfig;
use stamp_panel::{StampOutcome, StampResult, StampSession};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("stamp-panel")
        .version(stamp_panel::VERSION)
        .about("Inspect stamp templates and dry-run metadata stamps")
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON snapshot of field info, templates, selection and messages"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration (defaults apply when omitted)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("state").about("Print the visible panel"))
        .subcommand(Command::new("list").about("List stamp templates with their metadata"))
        .subcommand(
            Command::new("stamp")
                .about("Show the bulk update a stamp click would send")
                .arg(
                    Arg::new("template")
                        .long("template")
                        .required(true)
                        .help("Id of the stamp template"),
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    run(&matches).await
}

/// Configuration from `path`, or the defaults
fn load_config(path: Option<&Path>) -> StampResult<StampConfig> {
    Ok(match path {
        Some(path) => StampConfig::load(path)?,
        None => StampConfig::default(),
    })
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let config = load_config(config_path.map(PathBuf::as_path)).with_context(|| {
        format!(
            "loading config {}",
            config_path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
        )
    })?;
    let snapshot_path = matches
        .get_one::<PathBuf>("snapshot")
        .context("--snapshot is required")?;
    let json = matches.get_flag("json");

    let snapshot = Snapshot::load(snapshot_path)?;
    tracing::debug!(
        templates = snapshot.templates.len(),
        selected = snapshot.selection.len(),
        "Loaded snapshot {}",
        snapshot_path.display()
    );
    let host = Arc::new(SnapshotHost::new(snapshot.selection.clone()));
    let api = Arc::new(SnapshotApi::new(snapshot));
    let session = StampSession::new(api.clone(), host, config);
    let state = session.start().await;

    match matches.subcommand() {
        Some(("state", _)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{state}");
            }
        }
        Some(("list", _)) => {
            let view = session.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("Panel: {state}");
                for card in &view.stamps {
                    println!("{} ({})", card.display_name, card.id);
                    for field in &card.fields {
                        println!("  {}: {}", field.label, field.value);
                    }
                }
            }
        }
        Some(("stamp", args)) => {
            let template = args
                .get_one::<String>("template")
                .context("--template is required")?;
            let outcome = session.apply_stamp(template).await?;
            let submitted = api.submitted();
            if json {
                println!("{}", serde_json::to_string_pretty(&submitted)?);
            } else {
                match outcome {
                    StampOutcome::Submitted { assets, fields } => {
                        println!("Would write {fields} field(s) to {assets} asset(s)");
                        for request in &submitted {
                            println!("query: {}", request.locator);
                            for (field, value) in &request.payload {
                                println!("  {field} = {value}");
                            }
                        }
                    }
                    StampOutcome::NoSelection => println!("Nothing selected, no update sent"),
                    StampOutcome::NothingToStamp => {
                        println!("Template has no encodable fields, no update sent");
                    }
                }
            }
        }
        _ => anyhow::bail!("unknown command"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stamp_core::ConfigError;
    use stamp_panel::StampError;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn subcommand_is_required() {
        assert!(cli().try_get_matches_from(["stamp-panel", "--snapshot", "s.json"]).is_err());
    }

    #[test]
    fn stamp_requires_template() {
        let result = cli().try_get_matches_from(["stamp-panel", "--snapshot", "s.json", "stamp"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, StampError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), StampConfig::default());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["stamp-panel", "list", "--snapshot", "s.json", "--json"])
            .unwrap();
        assert!(matches.get_flag("json"));
        assert_eq!(matches.subcommand_name(), Some("list"));
    }
}
