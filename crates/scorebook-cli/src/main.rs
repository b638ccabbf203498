//! `scorebook`: replay a JSON match sheet and print the resulting
//! scorecards, league table and awards as JSON.

mod logging;
mod sheet;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use scorebook_types::{EngineConfig, constants};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "scorebook")]
#[command(about = "Replay a cricket match sheet and print scorecards, standings and awards", long_about = None)]
struct Cli {
    /// Match sheet to replay
    sheet: PathBuf,

    /// Engine config (JSON); missing fields take their defaults
    #[arg(long, env = "SCOREBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the overs per innings
    #[arg(long)]
    over_limit: Option<u32>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Compact instead of pretty-printed output
    #[arg(long)]
    compact: bool,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.json_logs);
    info!(engine = constants::ENGINE_NAME, version = constants::VERSION, "Starting");

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(overs) = cli.over_limit {
        config.match_over_limit = overs;
    }

    let raw = fs::read_to_string(&cli.sheet)
        .with_context(|| format!("reading sheet {}", cli.sheet.display()))?;
    let sheet: sheet::MatchSheet = serde_json::from_str(&raw)
        .with_context(|| format!("parsing sheet {}", cli.sheet.display()))?;
    info!(
        sheet = %cli.sheet.display(),
        teams = sheet.teams.len(),
        matches = sheet.matches.len(),
        over_limit = config.match_over_limit,
        "Replaying match sheet"
    );

    let report = sheet::replay(&sheet, config)?;
    let out = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{out}");
    Ok(())
}
