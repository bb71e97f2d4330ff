//! Error types for the simulation binary.

use starlane_core::{ConfigError, CoreError};

/// Errors that can stop a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An environment setting is malformed.
    #[error("config error: {0}")]
    Settings(String),

    /// The YAML game configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The state manager refused to continue.
    #[error("game error: {0}")]
    Core(#[from] CoreError),

    /// The run report could not be serialized.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
