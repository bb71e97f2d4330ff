//! Configuration loading and typed config structures for the Starlane core.
//!
//! The canonical configuration lives in `starlane-config.yaml` at the project
//! root. Every section and every field has a default, so an empty document
//! (or a missing file, at the caller's discretion) yields the stock game.
//!
//! Loading is pure. Callers that honour the `STARLANE_SEED` environment
//! variable apply it with [`GameConfig::with_env_overrides`].

use std::path::Path;

use serde::Deserialize;
use starlane_economy::{IntelligenceConfig, MarketConfig, ShipEconomyConfig};
use starlane_types::SystemId;

/// Environment variable that overrides the new-game seed.
pub const SEED_ENV_VAR: &str = "STARLANE_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `starlane-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Starting conditions of a new game.
    #[serde(default)]
    pub new_game: NewGameConfig,

    /// Ship wear, repair and fuel parameters.
    #[serde(default)]
    pub ship: ShipEconomyConfig,

    /// Market pressure parameters.
    #[serde(default)]
    pub market: MarketConfig,

    /// Intelligence pricing.
    #[serde(default)]
    pub intelligence: IntelligenceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// A non-empty `STARLANE_SEED` replaces `new_game.seed`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.new_game
            .apply_seed_override(std::env::var(SEED_ENV_VAR).ok());
        self
    }
}

/// Starting conditions for [`crate::StateManager::new_game`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewGameConfig {
    /// Seed for ship quirk assignment.
    #[serde(default = "default_seed")]
    pub seed: String,

    /// Name of the starting ship.
    #[serde(default = "default_ship_name")]
    pub ship_name: String,

    /// System the game starts in.
    #[serde(default)]
    pub starting_system: SystemId,

    /// Credits at the start.
    #[serde(default = "default_starting_credits")]
    pub starting_credits: u64,

    /// Debt at the start.
    #[serde(default = "default_starting_debt")]
    pub starting_debt: u64,

    /// Main-hold capacity before quirks.
    #[serde(default = "default_cargo_capacity")]
    pub cargo_capacity: u32,

    /// Fuel percentage at the start.
    #[serde(default = "default_starting_fuel")]
    pub starting_fuel: f64,

    /// Number of quirks rolled for the ship.
    #[serde(default = "default_quirk_count")]
    pub quirk_count: usize,
}

impl NewGameConfig {
    /// Replace the seed when an override is present and non-empty.
    pub fn apply_seed_override(&mut self, seed: Option<String>) {
        if let Some(seed) = seed.filter(|s| !s.trim().is_empty()) {
            self.seed = seed;
        }
    }
}

impl Default for NewGameConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            ship_name: default_ship_name(),
            starting_system: SystemId::default(),
            starting_credits: default_starting_credits(),
            starting_debt: default_starting_debt(),
            cargo_capacity: default_cargo_capacity(),
            starting_fuel: default_starting_fuel(),
            quirk_count: default_quirk_count(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_seed() -> String {
    String::from("starlane")
}

fn default_ship_name() -> String {
    String::from("Serendipity")
}

const fn default_starting_credits() -> u64 {
    500
}

const fn default_starting_debt() -> u64 {
    10_000
}

const fn default_cargo_capacity() -> u32 {
    50
}

const fn default_starting_fuel() -> f64 {
    100.0
}

const fn default_quirk_count() -> usize {
    2
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_game() {
        let config = GameConfig::default();
        assert_eq!(config.new_game.starting_credits, 500);
        assert_eq!(config.new_game.starting_debt, 10_000);
        assert_eq!(config.new_game.cargo_capacity, 50);
        assert_eq!(config.new_game.ship_name, "Serendipity");
        assert_eq!(config.new_game.starting_system, SystemId(0));
        assert_eq!(config.intelligence.unknown_cost, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "
new_game:
  starting_credits: 2500
  ship_name: Wanderer
ship:
  fuel_price_per_percent: 3.0
market:
  daily_retention_percent: 80
";
        let config: GameConfig = serde_yml::from_str(yaml).unwrap_or_default();
        assert_eq!(config.new_game.starting_credits, 2500);
        assert_eq!(config.new_game.ship_name, "Wanderer");
        assert_eq!(config.new_game.starting_debt, 10_000);
        assert!((config.ship.fuel_price_per_percent - 3.0).abs() < f64::EPSILON);
        assert!((config.ship.hull_repair_base - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.market.daily_retention_percent, 80);
        assert_eq!(config.market.sale_pressure_per_mille, 5);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let yaml = include_str!("../../../starlane-config.yaml");
        let config: Result<GameConfig, _> = serde_yml::from_str(yaml);
        assert!(config.is_ok());
        assert_eq!(config.unwrap_or_default(), GameConfig::default());
    }

    #[test]
    fn empty_document_is_valid() {
        let config = GameConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn parse_keeps_the_seed_as_written() {
        let config = GameConfig::parse("new_game:\n  seed: fixed-seed\n");
        assert_eq!(
            config.map(|c| c.new_game.seed).unwrap_or_default(),
            "fixed-seed"
        );
        let empty = GameConfig::parse("");
        assert_eq!(
            empty.map(|c| c.new_game.seed).unwrap_or_default(),
            "starlane"
        );
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = GameConfig::parse("new_game: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn seed_override_ignores_blank_values() {
        let mut config = NewGameConfig::default();
        config.apply_seed_override(Some(String::from("   ")));
        assert_eq!(config.seed, "starlane");
        config.apply_seed_override(None);
        assert_eq!(config.seed, "starlane");
        config.apply_seed_override(Some(String::from("replay-42")));
        assert_eq!(config.seed, "replay-42");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = GameConfig::from_file(Path::new("/nonexistent/starlane-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
