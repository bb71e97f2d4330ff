//! The game state tree and its records.
//!
//! [`GameState`] is the single mutable document owned by the state manager.
//! Its shape is exactly what the persistence collaborator serializes, so
//! every type here derives `Serialize`/`Deserialize` and exports a
//! TypeScript binding.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CargoHold, Commodity, MarketEventKind, ShipSystem};
use crate::ids::{GameId, QuirkId, SystemId, UpgradeId};

/// Current version of the persisted state shape.
pub const SCHEMA_VERSION: u32 = 1;

/// Lower bound for fuel and condition percentages.
pub const MIN_PERCENT: f64 = 0.0;

/// Upper bound for fuel and condition percentages.
pub const MAX_PERCENT: f64 = 100.0;

/// Clamp a percentage into `[0, 100]`. `NaN` collapses to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PERCENT;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Root of the mutable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// The trader.
    pub player: PlayerState,
    /// The trader's ship.
    pub ship: ShipState,
    /// Galaxy-wide mutable state.
    pub world: WorldState,
    /// Bookkeeping about the save itself.
    pub meta: Meta,
}

/// Player finances, position and the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerState {
    /// Spendable credits. Never negative.
    pub credits: u64,
    /// Outstanding debt.
    pub debt: u64,
    /// The system the ship is docked at.
    pub current_system: SystemId,
    /// Days since the game started. Never decreases.
    pub days_elapsed: u32,
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// Ship condition, capacity and cargo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShipState {
    /// Player-chosen ship name.
    pub name: String,
    /// Fuel as a percentage of the tank, `[0, 100]`.
    pub fuel: f64,
    /// Units the main hold can carry. Always positive.
    pub cargo_capacity: u32,
    /// Main-hold lots, oldest first.
    pub cargo: Vec<CargoStack>,
    /// Units the smuggling compartment can carry, if one is installed.
    pub hidden_cargo_capacity: Option<u32>,
    /// Hidden-compartment lots, oldest first.
    pub hidden_cargo: Vec<CargoStack>,
    /// Hull condition, `[0, 100]`.
    pub hull: f64,
    /// Engine condition, `[0, 100]`.
    pub engine: f64,
    /// Life support condition, `[0, 100]`.
    pub life_support: f64,
    /// Installed upgrades. Each at most once.
    pub upgrades: BTreeSet<UpgradeId>,
    /// Quirks rolled when the ship was created.
    pub quirks: BTreeSet<QuirkId>,
}

impl ShipState {
    /// Read the condition of a ship system.
    pub const fn condition(&self, system: ShipSystem) -> f64 {
        match system {
            ShipSystem::Hull => self.hull,
            ShipSystem::Engine => self.engine,
            ShipSystem::LifeSupport => self.life_support,
        }
    }

    /// Set the condition of a ship system, clamped to `[0, 100]`.
    pub fn set_condition(&mut self, system: ShipSystem, value: f64) {
        let value = clamp_percent(value);
        match system {
            ShipSystem::Hull => self.hull = value,
            ShipSystem::Engine => self.engine = value,
            ShipSystem::LifeSupport => self.life_support = value,
        }
    }

    /// Set fuel, clamped to `[0, 100]`.
    pub fn set_fuel(&mut self, value: f64) {
        self.fuel = clamp_percent(value);
    }

    /// Borrow the lots of a hold.
    pub fn hold(&self, hold: CargoHold) -> &[CargoStack] {
        match hold {
            CargoHold::Main => &self.cargo,
            CargoHold::Hidden => &self.hidden_cargo,
        }
    }

    /// Mutably borrow the lots of a hold.
    pub fn hold_mut(&mut self, hold: CargoHold) -> &mut Vec<CargoStack> {
        match hold {
            CargoHold::Main => &mut self.cargo,
            CargoHold::Hidden => &mut self.hidden_cargo,
        }
    }

    /// Capacity of a hold. The hidden hold has zero capacity when absent.
    pub fn hold_capacity(&self, hold: CargoHold) -> u32 {
        match hold {
            CargoHold::Main => self.cargo_capacity,
            CargoHold::Hidden => self.hidden_cargo_capacity.unwrap_or(0),
        }
    }
}

/// A single purchase lot in a cargo hold.
///
/// The purchase price is fixed at creation; it is what profit is measured
/// against when the lot is sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CargoStack {
    /// The good carried.
    pub commodity: Commodity,
    /// Units in the lot. Always positive.
    pub quantity: u32,
    /// Credits paid per unit. Always positive.
    pub purchase_price: u32,
    /// Where the lot was bought.
    pub purchase_system: SystemId,
    /// Day the lot was bought.
    pub purchase_day: u32,
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Galaxy-wide mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldState {
    /// Systems the ship has docked at.
    pub visited_systems: BTreeSet<SystemId>,
    /// Running market events, at most one per system.
    pub active_events: Vec<MarketEvent>,
    /// Last observed prices per system.
    pub price_knowledge: BTreeMap<SystemId, PriceSnapshot>,
    /// Player-driven market pressure.
    pub market_conditions: MarketConditions,
}

impl WorldState {
    /// Return the active event at a system, if any.
    pub fn event_at(&self, system: SystemId) -> Option<&MarketEvent> {
        self.active_events.iter().find(|e| e.system_id == system)
    }
}

/// A time-bounded set of price multipliers at one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarketEvent {
    /// `{type}_{system}_{day}`.
    pub id: String,
    /// Which registry entry produced this event.
    #[serde(rename = "type")]
    pub kind: MarketEventKind,
    /// The affected system.
    pub system_id: SystemId,
    /// First day the event is active.
    pub start_day: u32,
    /// Last day the event is active. Strictly after `start_day`.
    pub end_day: u32,
    /// Multiplicative price factors per commodity.
    #[ts(type = "Partial<Record<Commodity, string>>")]
    pub modifiers: BTreeMap<Commodity, Decimal>,
}

impl MarketEvent {
    /// Whether the event is in effect on `day`.
    pub const fn is_active_on(&self, day: u32) -> bool {
        self.start_day <= day && day <= self.end_day
    }
}

/// Prices observed at a system on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PriceSnapshot {
    /// Price per commodity at observation time.
    pub prices: BTreeMap<Commodity, u32>,
    /// Day the snapshot was taken.
    pub recorded_day: u32,
}

/// Units the player has sold into each market, recovering daily.
///
/// Positive surplus depresses the local price of that commodity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct MarketConditions(pub BTreeMap<SystemId, BTreeMap<Commodity, u32>>);

impl MarketConditions {
    /// Surplus of `commodity` at `system` (0 when untouched).
    pub fn surplus(&self, system: SystemId, commodity: Commodity) -> u32 {
        self.0
            .get(&system)
            .and_then(|goods| goods.get(&commodity))
            .copied()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

/// Save bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Meta {
    /// Version of this state shape.
    pub schema_version: u32,
    /// Identifier of the game.
    pub game_id: GameId,
    /// Wall-clock creation time.
    pub created_at: DateTime<Utc>,
}

impl Meta {
    /// Metadata for a game created now.
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            game_id: GameId::new(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn ship() -> ShipState {
        ShipState {
            name: String::from("Serendipity"),
            fuel: 100.0,
            cargo_capacity: 50,
            cargo: Vec::new(),
            hidden_cargo_capacity: None,
            hidden_cargo: Vec::new(),
            hull: 100.0,
            engine: 100.0,
            life_support: 100.0,
            upgrades: BTreeSet::new(),
            quirks: BTreeSet::new(),
        }
    }

    #[test]
    fn clamp_percent_bounds() {
        assert!((clamp_percent(-5.0) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_percent(140.0) - 100.0).abs() < f64::EPSILON);
        assert!((clamp_percent(42.5) - 42.5).abs() < f64::EPSILON);
        assert!((clamp_percent(f64::NAN) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_condition_clamps() {
        let mut s = ship();
        s.set_condition(ShipSystem::Engine, 250.0);
        assert!((s.engine - 100.0).abs() < f64::EPSILON);
        s.set_condition(ShipSystem::LifeSupport, -1.0);
        assert!(s.life_support.abs() < f64::EPSILON);
        assert!((s.condition(ShipSystem::Hull) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hidden_hold_capacity_zero_when_absent() {
        let mut s = ship();
        assert_eq!(s.hold_capacity(CargoHold::Hidden), 0);
        s.hidden_cargo_capacity = Some(10);
        assert_eq!(s.hold_capacity(CargoHold::Hidden), 10);
        assert_eq!(s.hold_capacity(CargoHold::Main), 50);
    }

    #[test]
    fn event_active_window_is_inclusive() {
        let event = MarketEvent {
            id: String::from("festival_0_3"),
            kind: MarketEventKind::Festival,
            system_id: SystemId(0),
            start_day: 3,
            end_day: 5,
            modifiers: BTreeMap::from([(Commodity::Electronics, dec!(1.75))]),
        };
        assert!(!event.is_active_on(2));
        assert!(event.is_active_on(3));
        assert!(event.is_active_on(5));
        assert!(!event.is_active_on(6));
    }

    #[test]
    fn market_event_serializes_type_field() {
        let event = MarketEvent {
            id: String::from("festival_0_3"),
            kind: MarketEventKind::Festival,
            system_id: SystemId(0),
            start_day: 3,
            end_day: 5,
            modifiers: BTreeMap::new(),
        };
        let value = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(value["type"], "festival");
        assert_eq!(value["system_id"], 0);
    }

    #[test]
    fn market_conditions_default_surplus_is_zero() {
        let conditions = MarketConditions::default();
        assert_eq!(conditions.surplus(SystemId(4), Commodity::Ore), 0);
    }
}
