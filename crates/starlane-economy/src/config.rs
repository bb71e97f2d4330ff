//! Tunable parameters of the economy.
//!
//! Each struct mirrors one section of `starlane-config.yaml` and is embedded
//! by the core crate's `GameConfig`. Every field has a default, so an empty
//! section (or an absent one) yields the stock game balance.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// Wear, repair, fuel and warning parameters for the ship.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShipEconomyConfig {
    /// Hull condition lost per day before modifiers.
    #[serde(default = "default_hull_decay_per_day")]
    pub hull_decay_per_day: f64,

    /// Engine condition lost per day before modifiers.
    #[serde(default = "default_engine_decay_per_day")]
    pub engine_decay_per_day: f64,

    /// Life support condition lost per day before modifiers.
    #[serde(default = "default_life_support_decay_per_day")]
    pub life_support_decay_per_day: f64,

    /// Base credits per hull point repaired.
    #[serde(default = "default_hull_repair_base")]
    pub hull_repair_base: f64,

    /// Base credits per engine point repaired.
    #[serde(default = "default_engine_repair_base")]
    pub engine_repair_base: f64,

    /// Base credits per life support point repaired.
    #[serde(default = "default_life_support_repair_base")]
    pub life_support_repair_base: f64,

    /// Credits per percentage point of fuel.
    #[serde(default = "default_fuel_price_per_percent")]
    pub fuel_price_per_percent: f64,

    /// Fuel percentage burned per light-year before modifiers.
    #[serde(default = "default_fuel_per_light_year")]
    pub fuel_per_light_year: f64,

    /// Hull condition lost per wormhole jump before modifiers.
    #[serde(default = "default_hull_wear_per_jump")]
    pub hull_wear_per_jump: f64,

    /// Light-years covered per day of travel.
    #[serde(default = "default_light_years_per_day")]
    pub light_years_per_day: f64,

    /// Conditions below this raise a warning.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,

    /// Conditions below this raise a critical warning.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,
}

impl Default for ShipEconomyConfig {
    fn default() -> Self {
        Self {
            hull_decay_per_day: default_hull_decay_per_day(),
            engine_decay_per_day: default_engine_decay_per_day(),
            life_support_decay_per_day: default_life_support_decay_per_day(),
            hull_repair_base: default_hull_repair_base(),
            engine_repair_base: default_engine_repair_base(),
            life_support_repair_base: default_life_support_repair_base(),
            fuel_price_per_percent: default_fuel_price_per_percent(),
            fuel_per_light_year: default_fuel_per_light_year(),
            hull_wear_per_jump: default_hull_wear_per_jump(),
            light_years_per_day: default_light_years_per_day(),
            warning_threshold: default_warning_threshold(),
            critical_threshold: default_critical_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Player-driven market pressure.
///
/// Values are integral per-mille and percent figures so that the price
/// factor they produce is an exact decimal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketConfig {
    /// Price drop per unit of surplus, in thousandths.
    #[serde(default = "default_sale_pressure_per_mille")]
    pub sale_pressure_per_mille: u32,

    /// Lowest market factor surplus can push a price to, in thousandths.
    #[serde(default = "default_min_market_factor_per_mille")]
    pub min_market_factor_per_mille: u32,

    /// Share of the surplus that remains after each day, in percent.
    #[serde(default = "default_daily_retention_percent")]
    pub daily_retention_percent: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            sale_pressure_per_mille: default_sale_pressure_per_mille(),
            min_market_factor_per_mille: default_min_market_factor_per_mille(),
            daily_retention_percent: default_daily_retention_percent(),
        }
    }
}

// ---------------------------------------------------------------------------
// Intelligence
// ---------------------------------------------------------------------------

/// Staleness bands and intelligence prices.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntelligenceConfig {
    /// Data at most this many days old counts as recent.
    #[serde(default = "default_recent_threshold_days")]
    pub recent_threshold_days: u32,

    /// Price for a system never observed.
    #[serde(default = "default_unknown_cost")]
    pub unknown_cost: u64,

    /// Price for a system with stale data.
    #[serde(default = "default_stale_cost")]
    pub stale_cost: u64,

    /// Price for a system with recent data.
    #[serde(default = "default_recent_cost")]
    pub recent_cost: u64,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            recent_threshold_days: default_recent_threshold_days(),
            unknown_cost: default_unknown_cost(),
            stale_cost: default_stale_cost(),
            recent_cost: default_recent_cost(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_hull_decay_per_day() -> f64 {
    0.5
}

const fn default_engine_decay_per_day() -> f64 {
    0.3
}

const fn default_life_support_decay_per_day() -> f64 {
    0.5
}

const fn default_hull_repair_base() -> f64 {
    5.0
}

const fn default_engine_repair_base() -> f64 {
    6.0
}

const fn default_life_support_repair_base() -> f64 {
    4.0
}

const fn default_fuel_price_per_percent() -> f64 {
    2.0
}

const fn default_fuel_per_light_year() -> f64 {
    2.0
}

const fn default_hull_wear_per_jump() -> f64 {
    2.0
}

const fn default_light_years_per_day() -> f64 {
    5.0
}

const fn default_warning_threshold() -> f64 {
    50.0
}

const fn default_critical_threshold() -> f64 {
    20.0
}

const fn default_sale_pressure_per_mille() -> u32 {
    5
}

const fn default_min_market_factor_per_mille() -> u32 {
    700
}

const fn default_daily_retention_percent() -> u32 {
    90
}

const fn default_recent_threshold_days() -> u32 {
    30
}

const fn default_unknown_cost() -> u64 {
    100
}

const fn default_stale_cost() -> u64 {
    75
}

const fn default_recent_cost() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_defaults() {
        let config = ShipEconomyConfig::default();
        assert!((config.hull_repair_base - 5.0).abs() < f64::EPSILON);
        assert!((config.warning_threshold - 50.0).abs() < f64::EPSILON);
        assert!((config.critical_threshold - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn market_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.sale_pressure_per_mille, 5);
        assert_eq!(config.min_market_factor_per_mille, 700);
        assert_eq!(config.daily_retention_percent, 90);
    }

    #[test]
    fn intelligence_partial_json_fills_defaults() {
        let config: IntelligenceConfig =
            serde_json::from_str(r#"{"stale_cost": 80}"#).unwrap_or_default();
        assert_eq!(config.stale_cost, 80);
        assert_eq!(config.unknown_cost, 100);
        assert_eq!(config.recent_threshold_days, 30);
    }
}
