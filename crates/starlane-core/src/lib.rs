//! Game state management for the Starlane trading core.
//!
//! [`StateManager`] owns the single [`GameState`](starlane_types::GameState)
//! tree and is the only path through which it changes. Every mutation
//! validates against the deterministic rules in `starlane-economy`, applies
//! atomically, and then publishes a [`ChangeEvent`](starlane_types::ChangeEvent)
//! to subscribed [`Observer`]s.
//!
//! # Modules
//!
//! - [`manager`] -- The state manager: trading, services, travel, queries
//! - [`day`] -- The ordered day cycle
//! - [`observer`] -- Change subscriptions with failure isolation
//! - [`config`] -- YAML configuration with per-field defaults
//! - [`error`] -- Rejections versus contract errors

pub mod config;
pub mod day;
pub mod error;
pub mod manager;
pub mod observer;

pub use config::{ConfigError, GameConfig, LoggingConfig, NewGameConfig, SEED_ENV_VAR};
pub use day::{DaySummary, run_day};
pub use error::CoreError;
pub use manager::{CargoUsage, ConditionReport, DebugField, JumpSummary, StateManager, TradeReceipt};
pub use observer::{Observer, ObserverError, ObserverRegistry, SubscriptionId};
