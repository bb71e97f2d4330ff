//! Headless simulation entry point for Starlane.
//!
//! Starts a new game from `starlane-config.yaml`, lets a greedy trader play
//! it for a fixed number of days, and prints a JSON report to stdout. Logs
//! go to stderr.
//!
//! # Architecture
//!
//! ```text
//! Trader --> StateManager --> starlane-economy (prices, events, wear)
//!                 |
//!                 +--> observers --> ChangeLogger (tracing)
//! ```
//!
//! The same seed and configuration always produce the same report.

mod config;
mod error;
mod logger;
mod trader;

use anyhow::Context;
use starlane_core::{GameConfig, StateManager};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::trader::Trader;

/// Application entry point.
///
/// Loads settings and game configuration, initialises logging, starts a new
/// game and runs the trader to the day limit.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the game reports a
/// contract violation.
fn main() -> anyhow::Result<()> {
    let settings = SimConfig::from_env()?.with_args(std::env::args().skip(1))?;
    let game_config = settings
        .load_game_config()
        .with_context(|| format!("loading {}", settings.config_path.display()))?;

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&game_config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        config = %settings.config_path.display(),
        days = settings.days,
        seed = %game_config.new_game.seed,
        "starlane-sim starting"
    );

    let json = simulate(&settings, game_config)?;
    println!("{json}");

    Ok(())
}

/// Play one game and render its report.
fn simulate(settings: &SimConfig, game_config: GameConfig) -> Result<String, SimError> {
    let mut manager = StateManager::with_standard_reference(game_config)?;
    logger::attach(&mut manager);
    manager.new_game()?;

    let report = Trader::new(settings.days, settings.reserve).run(&mut manager)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
