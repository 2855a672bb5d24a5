//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Shipped content directory, used when neither flag nor env var is set.
const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

#[derive(Debug, Parser)]
#[command(name = "combat-sim", version, about = "Simulate battles and idle runs")]
pub struct Cli {
    /// Directory holding the RON/TOML catalogues.
    #[arg(long, env = "COMBAT_SIM_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Combat config overriding `<data-dir>/config.toml`.
    #[arg(long, env = "COMBAT_SIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fight a mission once and print the encounter record.
    Fight {
        #[arg(long)]
        hero: String,
        #[arg(long)]
        mission: String,
        /// Milliseconds since the Unix epoch (default: now).
        #[arg(long)]
        timestamp: Option<i64>,
        /// Explicit seed instead of the one derived from the timestamp.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of consecutive fights; rewards carry over between them.
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
    /// Claim an idle session that ran for the given hours.
    Idle {
        #[arg(long)]
        hero: String,
        #[arg(long)]
        mission: String,
        #[arg(long)]
        hours: f64,
    },
    /// Show the level reached with an amount of experience.
    Level {
        #[arg(long)]
        experience: u64,
        #[arg(long, default_value_t = 1)]
        from: u32,
    },
    /// List missions with their power ratings.
    Missions,
}
