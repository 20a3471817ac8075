//! Command-line entry point: runs the experiment described by a config file.
//!
//! ```text
//! id3 [CONFIG] [--json]
//! ```
//!
//! `CONFIG` defaults to `id3.toml`. With `--json` the report is printed as
//! JSON instead of a text summary.

use anyhow::{bail, Context, Result};
use id3_rust::config::DEFAULT_CONFIG_FILE;
use id3_rust::{run_experiment, ExperimentConfig};
use std::path::PathBuf;

struct Args {
    config: PathBuf,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut config = None;
    let mut json = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("usage: id3 [CONFIG] [--json]");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option '{}'", flag),
            path => {
                if config.replace(PathBuf::from(path)).is_some() {
                    bail!("expected a single config file");
                }
            }
        }
    }

    Ok(Args {
        config: config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        json,
    })
}

fn main() -> Result<()> {
    id3_rust::init().context("failed to initialize logging")?;
    let args = parse_args()?;

    let config = ExperimentConfig::load_from_file(&args.config)
        .with_context(|| format!("failed to load experiment config {}", args.config.display()))?;
    log::info!("Running experiment from {}", args.config.display());

    let report = run_experiment(&config).context("experiment failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
