//! Deterministic economy for the Starlane trading core.
//!
//! Everything here is pure computation over state passed in by the caller.
//! Nothing holds game state of its own, performs I/O, or reads the clock.
//! All randomness comes from [`SeededRng`] built from explicit seed strings.
//!
//! # Modules
//!
//! - [`rng`] -- String-seeded reproducible random numbers
//! - [`pricing`] -- Commodity prices from star class, technology, events and sales
//! - [`events`] -- Market event registry, trigger rolls and expiry
//! - [`market`] -- Sales surplus and its daily recovery
//! - [`intelligence`] -- Price knowledge staleness and intelligence costs
//! - [`ship`] -- Wear, repairs, fuel, upgrades, quirks and travel
//! - [`cargo`] -- Lot-based cargo holds
//! - [`catalog`] -- Star systems and the wormhole graph
//! - [`starting_catalog`] -- The stock sixteen-star catalog
//! - [`reference`] -- Reference data bundle and stock upgrades and quirks
//! - [`config`] -- Tunable balance parameters
//! - [`error`] -- Rejections and catalog errors

pub mod cargo;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod intelligence;
pub mod market;
pub mod pricing;
pub mod reference;
pub mod rng;
pub mod ship;
pub mod starting_catalog;

pub use catalog::StarCatalog;
pub use config::{IntelligenceConfig, MarketConfig, ShipEconomyConfig};
pub use error::{CatalogError, Rejection};
pub use events::{EventUpdate, update_events};
pub use intelligence::{IntelligenceOffer, PriceKnowledge};
pub use pricing::{calculate_price, price_table};
pub use reference::ReferenceData;
pub use rng::SeededRng;
pub use ship::{ConditionWarning, ShipModifiers};
pub use starting_catalog::default_catalog;
