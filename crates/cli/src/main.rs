#![deny(unsafe_code)]
//! CLI binary for microbe-forge.
//!
//! Subcommands:
//! - `render <asset>`: synthesize one asset and write a PNG
//! - `batch`: write the whole catalog under `germs/` and `tiles/`
//! - `list`: print the asset catalog

mod batch;
mod error;

use batch::Outcome;
use clap::{Parser, Subcommand};
use error::CliError;
use microbe_forge_assets::{snapshot, AssetDescriptor};
use microbe_forge_core::RenderConfig;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(name = "microbe-forge", about = "Procedural sprite and tile synthesis")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Render configuration as a JSON string, e.g. '{"output_size": 128}'.
    #[arg(long, global = true, default_value = "{}")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize one asset and write a PNG.
    Render {
        /// Asset name (e.g. "coccus", "penicillin", "tile_wall_w4").
        asset: String,

        /// Output file path. Defaults to `<asset>.png`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Synthesize every catalog asset into an output directory.
    Batch {
        /// Output root; files land in `germs/` and `tiles/` below it.
        #[arg(long, default_value = "assets")]
        out: PathBuf,

        /// Overwrite files that already exist.
        #[arg(long)]
        force: bool,

        /// Worker threads. Defaults to one per available core.
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// List every asset in the catalog.
    List,
}

fn parse_config(raw: &str) -> Result<RenderConfig, CliError> {
    let params: serde_json::Value = serde_json::from_str(raw).map_err(CliError::Config)?;
    let config = RenderConfig::from_json(&params);
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let catalog = AssetDescriptor::catalog();
            if cli.json {
                let assets: Vec<_> = catalog
                    .iter()
                    .map(|a| {
                        serde_json::json!({
                            "name": a.name(),
                            "category": a.category(),
                            "file": format!("{}.png", a.file_stem()),
                            "descriptor": a,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&assets)?);
            } else {
                for category in ["germs", "tiles"] {
                    println!("{category}:");
                    for asset in catalog.iter().filter(|a| a.category().dir_name() == category) {
                        println!("  {asset}");
                    }
                }
            }
        }
        Command::Render { asset, output } => {
            let config = parse_config(&cli.config)?;
            let descriptor = AssetDescriptor::from_name(&asset)?;
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{asset}.png")));

            let image = descriptor.synthesize(&config)?;
            snapshot::write_png(&image, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "asset": descriptor.name(),
                    "size": image.width(),
                    "canvas_size": config.canvas_size,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {descriptor} ({0}x{0} from {1}x{1}) -> {2}",
                    image.width(),
                    config.canvas_size,
                    output.display()
                );
            }
        }
        Command::Batch { out, force, jobs } => {
            let config = parse_config(&cli.config)?;
            let catalog = AssetDescriptor::catalog();
            let jobs = jobs.unwrap_or_else(batch::default_jobs);
            let outcomes = batch::run_batch(&out, &catalog, &config, force, jobs)?;

            let mut failed = 0;
            let mut written = 0;
            let mut skipped = 0;
            for outcome in &outcomes {
                match outcome {
                    Outcome::Written(_) => written += 1,
                    Outcome::Skipped(_) => skipped += 1,
                    Outcome::Failed(_) => failed += 1,
                }
            }

            if cli.json {
                let results: Vec<_> = catalog
                    .iter()
                    .zip(&outcomes)
                    .map(|(asset, outcome)| {
                        let (status, path, error) = match outcome {
                            Outcome::Written(p) => ("written", Some(p.display().to_string()), None),
                            Outcome::Skipped(p) => ("skipped", Some(p.display().to_string()), None),
                            Outcome::Failed(e) => ("failed", None, Some(e.as_str())),
                        };
                        serde_json::json!({
                            "asset": asset.name(),
                            "status": status,
                            "path": path,
                            "error": error,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (asset, outcome) in catalog.iter().zip(&outcomes) {
                    match outcome {
                        Outcome::Written(p) => eprintln!("  wrote   {}", p.display()),
                        Outcome::Skipped(p) => eprintln!("  skipped {}", p.display()),
                        Outcome::Failed(e) => eprintln!("  FAILED  {asset}: {e}"),
                    }
                }
            }
            info!(written, skipped, failed, out = %out.display(), "batch finished");

            if failed > 0 {
                return Err(CliError::Batch { failed, total: outcomes.len() });
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn malformed_config_is_input_error() {
        let err = parse_config("{oops").unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn out_of_range_config_is_engine_error() {
        let err = parse_config(r#"{"canvas_size": 64, "output_size": 128}"#).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn batch_arguments_parse() {
        let cli = Cli::try_parse_from([
            "microbe-forge",
            "--config",
            r#"{"output_size": 64}"#,
            "batch",
            "--out",
            "build",
            "--force",
            "-j",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::Batch { out, force, jobs } => {
                assert_eq!(out, PathBuf::from("build"));
                assert!(force);
                assert_eq!(jobs, Some(3));
            }
            _ => panic!("expected batch"),
        }
    }
}
