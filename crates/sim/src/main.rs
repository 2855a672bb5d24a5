//! Command line combat simulator.
//!
//! Loads a content directory, seeds an in-memory runtime with its heroes and
//! missions, runs the requested command and prints JSON to stdout. Logs go
//! to stderr at `info` unless `RUST_LOG` is set; `RUST_LOG=debug` adds
//! reward and level-up details.
//!
//! # Examples
//!
//! ```bash
//! combat-sim fight --hero aria --mission crypt --pretty
//! combat-sim idle --hero corvin --mission wolf-den --hours 8
//! combat-sim level --experience 2500
//! ```

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use game_content::{ConfigLoader, ContentFactory};
use runtime::Runtime;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::Level { experience, from } = cli.command {
        return print(&commands::level(experience, from), cli.pretty);
    }

    let factory = ContentFactory::new(&cli.data_dir);
    let mut catalog = factory
        .load_catalog()
        .with_context(|| format!("load content from {}", cli.data_dir.display()))?;
    if let Some(path) = &cli.config {
        catalog.config = ConfigLoader::load(path)?;
    }
    tracing::info!(
        data_dir = %cli.data_dir.display(),
        heroes = catalog.heroes.len(),
        missions = catalog.missions.len(),
        "content loaded"
    );

    let runtime = Runtime::from_catalog(&catalog)?;
    match &cli.command {
        Command::Fight {
            hero,
            mission,
            timestamp,
            seed,
            repeat,
        } => {
            let resolutions =
                commands::fight(&runtime, hero, mission, *timestamp, *seed, *repeat)?;
            print(&resolutions, cli.pretty)
        }
        Command::Idle {
            hero,
            mission,
            hours,
        } => print(&commands::idle(&runtime, hero, mission, *hours)?, cli.pretty),
        Command::Missions => print(&commands::missions(&catalog), cli.pretty),
        Command::Level { .. } => Ok(()),
    }
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn print(value: &impl Serialize, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
