//! Ship economy: wear, repairs, fuel, upgrades and quirks.
//!
//! Upgrades and quirks are closed [`ShipEffect`] lists. [`ShipModifiers`]
//! folds every installed effect into one set of factors that the rest of
//! the economy reads. Factors multiply, capacity deltas and visibility
//! ranges add, and the largest hidden compartment wins.
//!
//! All condition and fuel writes go through the clamping setters on
//! [`ShipState`], so percentages never leave `[0, 100]`.

use std::collections::BTreeSet;

use serde::Serialize;
use starlane_types::{
    MAX_PERCENT, QuirkId, ShipEffect, ShipState, ShipSystem, UpgradeDefinition, WarningSeverity,
};
use tracing::debug;

use crate::config::ShipEconomyConfig;
use crate::error::Rejection;
use crate::reference::ReferenceData;
use crate::rng::SeededRng;

/// Slack allowed when comparing a float target against 100%.
const PERCENT_TOLERANCE: f64 = 1e-9;

/// Repair cost curve divisor: each point above the current condition adds
/// `1 / REPAIR_CURVE` of a base cost.
const REPAIR_CURVE: f64 = 200.0;

/// Smallest main hold a quirk or upgrade can leave.
const MIN_CARGO_CAPACITY: u32 = 1;

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Combined effect of every installed upgrade and quirk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipModifiers {
    /// Tank size multiplier.
    pub fuel_capacity: f64,
    /// Main-hold delta in units.
    pub cargo_capacity: i64,
    /// Largest hidden compartment installed, if any.
    pub hidden_cargo: Option<u32>,
    /// Fuel burn multiplier.
    pub fuel_consumption: f64,
    /// Hull wear multiplier.
    pub hull_degradation: f64,
    /// Engine wear multiplier.
    pub engine_degradation: f64,
    /// Life support wear multiplier.
    pub life_support_degradation: f64,
    /// Jumps away at which market events are visible.
    pub event_visibility: u32,
}

impl Default for ShipModifiers {
    fn default() -> Self {
        Self {
            fuel_capacity: 1.0,
            cargo_capacity: 0,
            hidden_cargo: None,
            fuel_consumption: 1.0,
            hull_degradation: 1.0,
            engine_degradation: 1.0,
            life_support_degradation: 1.0,
            event_visibility: 0,
        }
    }
}

impl ShipModifiers {
    /// Fold a single effect in.
    pub fn apply(&mut self, effect: ShipEffect) {
        match effect {
            ShipEffect::FuelCapacity(f) => self.fuel_capacity *= f,
            ShipEffect::CargoCapacity(delta) => {
                self.cargo_capacity = self.cargo_capacity.saturating_add(i64::from(delta));
            }
            ShipEffect::HiddenCargo(units) => {
                self.hidden_cargo = Some(self.hidden_cargo.map_or(units, |u| u.max(units)));
            }
            ShipEffect::FuelConsumption(f) => self.fuel_consumption *= f,
            ShipEffect::HullDegradation(f) => self.hull_degradation *= f,
            ShipEffect::EngineDegradation(f) => self.engine_degradation *= f,
            ShipEffect::LifeSupportDegradation(f) => self.life_support_degradation *= f,
            ShipEffect::EventVisibility(jumps) => {
                self.event_visibility = self.event_visibility.saturating_add(jumps);
            }
        }
    }

    /// Fold a list of effects into neutral modifiers.
    pub fn from_effects<'a>(effects: impl IntoIterator<Item = &'a ShipEffect>) -> Self {
        let mut modifiers = Self::default();
        for effect in effects {
            modifiers.apply(*effect);
        }
        modifiers
    }

    /// Modifiers of a ship from its installed upgrades and quirks.
    ///
    /// Ids missing from the reference data contribute nothing.
    pub fn for_ship(ship: &ShipState, reference: &ReferenceData) -> Self {
        let upgrade_effects = ship
            .upgrades
            .iter()
            .filter_map(|id| reference.upgrade(id))
            .flat_map(|u| u.effects.iter());
        let quirk_effects = ship
            .quirks
            .iter()
            .filter_map(|id| reference.quirk(id))
            .flat_map(|q| q.effects.iter());
        Self::from_effects(upgrade_effects.chain(quirk_effects))
    }

    /// Wear multiplier of one ship system.
    pub const fn degradation(&self, system: ShipSystem) -> f64 {
        match system {
            ShipSystem::Hull => self.hull_degradation,
            ShipSystem::Engine => self.engine_degradation,
            ShipSystem::LifeSupport => self.life_support_degradation,
        }
    }
}

// ---------------------------------------------------------------------------
// Wear
// ---------------------------------------------------------------------------

/// Unmodified daily wear of a ship system.
pub const fn base_daily_decay(system: ShipSystem, config: &ShipEconomyConfig) -> f64 {
    match system {
        ShipSystem::Hull => config.hull_decay_per_day,
        ShipSystem::Engine => config.engine_decay_per_day,
        ShipSystem::LifeSupport => config.life_support_decay_per_day,
    }
}

/// Apply one day of wear to every ship system.
pub fn apply_daily_decay(ship: &mut ShipState, modifiers: &ShipModifiers, config: &ShipEconomyConfig) {
    for system in ShipSystem::ALL {
        let loss = base_daily_decay(system, config) * modifiers.degradation(system);
        ship.set_condition(system, ship.condition(system) - loss);
    }
}

/// Apply the hull wear of one wormhole jump.
pub fn apply_jump_wear(ship: &mut ShipState, modifiers: &ShipModifiers, config: &ShipEconomyConfig) {
    let loss = config.hull_wear_per_jump * modifiers.hull_degradation;
    ship.set_condition(ShipSystem::Hull, ship.hull - loss);
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// A ship system running low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionWarning {
    /// The system affected.
    pub system: ShipSystem,
    /// Its condition.
    pub condition: f64,
    /// How bad it is.
    pub severity: WarningSeverity,
}

/// Every ship system below the warning or critical threshold.
pub fn condition_warnings(ship: &ShipState, config: &ShipEconomyConfig) -> Vec<ConditionWarning> {
    ShipSystem::ALL
        .into_iter()
        .filter_map(|system| {
            let condition = ship.condition(system);
            let severity = if condition < config.critical_threshold {
                WarningSeverity::Critical
            } else if condition < config.warning_threshold {
                WarningSeverity::Warning
            } else {
                return None;
            };
            Some(ConditionWarning {
                system,
                condition,
                severity,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Repair and refuel
// ---------------------------------------------------------------------------

/// Base credits per point of a ship system.
pub const fn repair_base(system: ShipSystem, config: &ShipEconomyConfig) -> f64 {
    match system {
        ShipSystem::Hull => config.hull_repair_base,
        ShipSystem::Engine => config.engine_repair_base,
        ShipSystem::LifeSupport => config.life_support_repair_base,
    }
}

/// Cost of raising a system from `current` by `amount` points.
///
/// `ceil(base * (amount + ((current + amount)^2 - current^2) / 200))`: each
/// extra point costs more than the last, and points near 100% cost most.
///
/// # Errors
///
/// - [`Rejection::NonPositiveAmount`] for zero, negative or `NaN` amounts.
/// - [`Rejection::RepairExceedsMaximum`] if the result would pass 100%.
pub fn repair_cost(
    system: ShipSystem,
    current: f64,
    amount: f64,
    config: &ShipEconomyConfig,
) -> Result<u64, Rejection> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(Rejection::NonPositiveAmount);
    }
    let target = current + amount;
    if target > MAX_PERCENT + PERCENT_TOLERANCE {
        return Err(Rejection::RepairExceedsMaximum { system });
    }
    let curve = target.mul_add(target, -(current * current)) / REPAIR_CURVE;
    Ok(credits_ceil(repair_base(system, config) * (amount + curve)))
}

/// Repair a ship system, returning the credits to charge.
///
/// The ship is only touched when every check passes.
///
/// # Errors
///
/// As [`repair_cost`], plus [`Rejection::InsufficientCredits`].
pub fn repair(
    ship: &mut ShipState,
    system: ShipSystem,
    amount: f64,
    credits: u64,
    config: &ShipEconomyConfig,
) -> Result<u64, Rejection> {
    let current = ship.condition(system);
    let cost = repair_cost(system, current, amount, config)?;
    if cost > credits {
        return Err(Rejection::InsufficientCredits {
            required: cost,
            available: credits,
        });
    }
    ship.set_condition(system, current + amount);
    debug!(?system, amount, cost, "Ship system repaired");
    Ok(cost)
}

/// Cost of `amount` percentage points of fuel.
pub fn refuel_cost(amount: f64, config: &ShipEconomyConfig) -> u64 {
    credits_ceil(amount * config.fuel_price_per_percent)
}

/// Refuel the ship, returning the credits to charge.
///
/// # Errors
///
/// - [`Rejection::NonPositiveAmount`] for zero, negative or `NaN` amounts.
/// - [`Rejection::RefuelExceedsCapacity`] if the tank would overflow.
/// - [`Rejection::InsufficientCredits`] if the player cannot pay.
pub fn refuel(
    ship: &mut ShipState,
    amount: f64,
    credits: u64,
    config: &ShipEconomyConfig,
) -> Result<u64, Rejection> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(Rejection::NonPositiveAmount);
    }
    if ship.fuel + amount > MAX_PERCENT + PERCENT_TOLERANCE {
        return Err(Rejection::RefuelExceedsCapacity);
    }
    let cost = refuel_cost(amount, config);
    if cost > credits {
        return Err(Rejection::InsufficientCredits {
            required: cost,
            available: credits,
        });
    }
    ship.set_fuel(ship.fuel + amount);
    debug!(amount, cost, fuel = ship.fuel, "Ship refuelled");
    Ok(cost)
}

// ---------------------------------------------------------------------------
// Upgrades and quirks
// ---------------------------------------------------------------------------

/// Apply capacity effects to a ship's stored capacities.
///
/// Rate effects need no write: they are read through [`ShipModifiers`].
pub fn apply_capacity_effects(ship: &mut ShipState, effects: &[ShipEffect]) {
    for effect in effects {
        match *effect {
            ShipEffect::CargoCapacity(delta) => {
                let adjusted = i64::from(ship.cargo_capacity)
                    .saturating_add(i64::from(delta))
                    .max(i64::from(MIN_CARGO_CAPACITY));
                ship.cargo_capacity = u32::try_from(adjusted).unwrap_or(u32::MAX);
            }
            ShipEffect::HiddenCargo(units) => {
                let current = ship.hidden_cargo_capacity.unwrap_or(0);
                ship.hidden_cargo_capacity = Some(current.max(units));
            }
            ShipEffect::FuelCapacity(_)
            | ShipEffect::FuelConsumption(_)
            | ShipEffect::HullDegradation(_)
            | ShipEffect::EngineDegradation(_)
            | ShipEffect::LifeSupportDegradation(_)
            | ShipEffect::EventVisibility(_) => {}
        }
    }
}

/// Install an upgrade, returning the credits to charge.
///
/// # Errors
///
/// - [`Rejection::UpgradeAlreadyInstalled`] if the ship already has it.
/// - [`Rejection::InsufficientCredits`] if the player cannot pay.
pub fn purchase_upgrade(
    ship: &mut ShipState,
    upgrade: &UpgradeDefinition,
    credits: u64,
) -> Result<u64, Rejection> {
    if ship.upgrades.contains(&upgrade.id) {
        return Err(Rejection::UpgradeAlreadyInstalled(upgrade.id.clone()));
    }
    if upgrade.cost > credits {
        return Err(Rejection::InsufficientCredits {
            required: upgrade.cost,
            available: credits,
        });
    }
    ship.upgrades.insert(upgrade.id.clone());
    apply_capacity_effects(ship, &upgrade.effects);
    debug!(upgrade = %upgrade.id, cost = upgrade.cost, "Upgrade installed");
    Ok(upgrade.cost)
}

/// Pick `count` distinct quirks for a new ship.
///
/// Draws from a [`SeededRng`] seeded with `ship_quirks_{seed}`, removing
/// each pick from the pool, so the same seed always yields the same ship.
pub fn assign_quirks(seed: &str, available: &[QuirkId], count: usize) -> BTreeSet<QuirkId> {
    let mut pool: Vec<QuirkId> = available.to_vec();
    pool.sort();
    pool.dedup();
    let mut rng = SeededRng::new(&format!("ship_quirks_{seed}"));
    let mut chosen = BTreeSet::new();
    while chosen.len() < count {
        let Some(index) = rng.next_index(pool.len()) else {
            break;
        };
        if index < pool.len() {
            chosen.insert(pool.remove(index));
        }
    }
    chosen
}

// ---------------------------------------------------------------------------
// Travel
// ---------------------------------------------------------------------------

/// Fuel percentage burned travelling `distance` light-years.
pub fn jump_fuel_cost(distance: f64, modifiers: &ShipModifiers, config: &ShipEconomyConfig) -> f64 {
    let capacity = if modifiers.fuel_capacity > 0.0 {
        modifiers.fuel_capacity
    } else {
        1.0
    };
    distance * config.fuel_per_light_year * modifiers.fuel_consumption / capacity
}

/// Whole days spent travelling `distance` light-years. At least one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn travel_days(distance: f64, config: &ShipEconomyConfig) -> u32 {
    if !distance.is_finite() || config.light_years_per_day <= 0.0 {
        return 1;
    }
    let days = (distance / config.light_years_per_day).ceil();
    if days >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (days.max(1.0)) as u32
    }
}

/// Round a credit amount up to whole credits.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn credits_ceil(amount: f64) -> u64 {
    if amount.is_nan() || amount <= 0.0 {
        return 0;
    }
    let rounded = amount.ceil();
    if rounded >= u64::MAX as f64 {
        u64::MAX
    } else {
        rounded as u64
    }
}
