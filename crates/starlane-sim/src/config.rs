//! Run settings for the simulation.
//!
//! Settings come from environment variables. The game itself is configured
//! by the YAML file they point at.

use std::path::PathBuf;

use starlane_core::GameConfig;

use crate::error::SimError;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "starlane-config.yaml";

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Path to the game configuration YAML.
    pub config_path: PathBuf,
    /// Stop once this many days have elapsed.
    pub days: u32,
    /// Credits the trader keeps back when buying cargo.
    pub reserve: u64,
}

impl SimConfig {
    /// Load settings from environment variables.
    ///
    /// Optional variables:
    /// - `STARLANE_CONFIG` -- path to the game config (default `starlane-config.yaml`)
    /// - `STARLANE_DAYS` -- days to simulate (default 120)
    /// - `STARLANE_RESERVE` -- credits held back from purchases (default 150)
    pub fn from_env() -> Result<Self, SimError> {
        let config_path = std::env::var("STARLANE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned())
            .into();

        let days: u32 = std::env::var("STARLANE_DAYS")
            .unwrap_or_else(|_| "120".to_owned())
            .parse()
            .map_err(|e| SimError::Settings(format!("invalid STARLANE_DAYS: {e}")))?;

        let reserve: u64 = std::env::var("STARLANE_RESERVE")
            .unwrap_or_else(|_| "150".to_owned())
            .parse()
            .map_err(|e| SimError::Settings(format!("invalid STARLANE_RESERVE: {e}")))?;

        Ok(Self {
            config_path,
            days,
            reserve,
        })
    }

    /// Apply positional arguments: `[config.yaml] [days]`.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Result<Self, SimError> {
        if let Some(path) = args.next() {
            self.config_path = PathBuf::from(path);
        }
        if let Some(days) = args.next() {
            self.days = days
                .parse()
                .map_err(|e| SimError::Settings(format!("invalid days argument: {e}")))?;
        }
        Ok(self)
    }

    /// Load the game configuration, falling back to defaults when the file
    /// does not exist. `STARLANE_SEED` overrides the configured seed.
    pub fn load_game_config(&self) -> Result<GameConfig, SimError> {
        let config = if self.config_path.exists() {
            GameConfig::from_file(&self.config_path)?
        } else {
            GameConfig::default()
        };
        Ok(config.with_env_overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = SimConfig {
            config_path: PathBuf::from("/nonexistent/starlane-config.yaml"),
            days: 10,
            reserve: 0,
        };
        let config = settings.load_game_config();
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.new_game.starting_credits, 500);
    }

    #[test]
    fn positional_arguments_override_environment() {
        let base = SimConfig {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            days: 120,
            reserve: 150,
        };
        let args = ["custom.yaml", "30"].into_iter().map(String::from);
        let settings = base.clone().with_args(args).unwrap_or(base);
        assert_eq!(settings.config_path, PathBuf::from("custom.yaml"));
        assert_eq!(settings.days, 30);

        let bad = SimConfig {
            config_path: PathBuf::new(),
            days: 1,
            reserve: 0,
        }
        .with_args(["a.yaml", "soon"].into_iter().map(String::from));
        assert!(matches!(bad, Err(SimError::Settings(_))));
    }
}
