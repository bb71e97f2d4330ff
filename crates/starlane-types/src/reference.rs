//! Static reference data shapes: star systems, upgrades, and quirks.
//!
//! These records are supplied to the core read-only at construction time.
//! Game state only ever refers to them by id.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::SpectralClass;
use crate::ids::{QuirkId, SystemId, UpgradeId};

/// A star system in the catalog.
///
/// Coordinates are light-years relative to Sol, which sits at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StarSystem {
    /// Catalog id.
    pub id: SystemId,
    /// Display name.
    pub name: String,
    /// X coordinate in light-years.
    pub x: f64,
    /// Y coordinate in light-years.
    pub y: f64,
    /// Z coordinate in light-years.
    pub z: f64,
    /// Spectral type string, e.g. `"G2"` or `"M3.5"`.
    pub spectral_type: String,
    /// Whether the system has a trading station.
    pub has_station: bool,
}

impl StarSystem {
    /// The spectral class (first letter of the spectral type), if recognised.
    pub fn spectral_class(&self) -> Option<SpectralClass> {
        SpectralClass::from_spectral_type(&self.spectral_type)
    }

    /// Straight-line distance from the origin in light-years.
    pub fn distance_from_origin(&self) -> f64 {
        self.x.mul_add(self.x, self.y.mul_add(self.y, self.z * self.z)).sqrt()
    }

    /// Straight-line distance to another system in light-years.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }
}

/// A single effect an upgrade or quirk has on the ship.
///
/// Factors multiply the baseline (`0.8` means 20% less), deltas add.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ShipEffect {
    /// Multiplies effective tank size; jumps burn a smaller share of it.
    FuelCapacity(f64),
    /// Adds (or removes) main-hold units.
    CargoCapacity(i32),
    /// Installs a hidden compartment of this many units.
    HiddenCargo(u32),
    /// Multiplies fuel burned per light-year.
    FuelConsumption(f64),
    /// Multiplies hull wear.
    HullDegradation(f64),
    /// Multiplies engine wear.
    EngineDegradation(f64),
    /// Multiplies life support wear.
    LifeSupportDegradation(f64),
    /// Reveals market events this many jumps away.
    EventVisibility(u32),
}

impl ShipEffect {
    /// Human-readable summary of the effect.
    pub fn describe(&self) -> String {
        match *self {
            Self::FuelCapacity(factor) => format!("{} fuel capacity", signed_percent(factor)),
            Self::CargoCapacity(delta) => format!("{delta:+} cargo capacity"),
            Self::HiddenCargo(units) => format!("{units} unit hidden compartment"),
            Self::FuelConsumption(factor) => {
                format!("{} fuel consumption", signed_percent(factor))
            }
            Self::HullDegradation(factor) => {
                format!("{} hull degradation", signed_percent(factor))
            }
            Self::EngineDegradation(factor) => {
                format!("{} engine degradation", signed_percent(factor))
            }
            Self::LifeSupportDegradation(factor) => {
                format!("{} life support degradation", signed_percent(factor))
            }
            Self::EventVisibility(jumps) => {
                format!("see market events up to {jumps} jump(s) away")
            }
        }
    }
}

/// Format a multiplicative factor as a signed percentage change (`1.5` -> `+50%`).
fn signed_percent(factor: f64) -> String {
    let pct = ((factor - 1.0) * 100.0).round();
    format!("{pct:+}%")
}

/// A purchasable ship upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeDefinition {
    /// Stable key.
    pub id: UpgradeId,
    /// Display name.
    pub name: String,
    /// Price in credits.
    pub cost: u64,
    /// Effects applied while installed.
    pub effects: Vec<ShipEffect>,
    /// Downside the player should know about, if any.
    pub tradeoff: Option<String>,
}

/// A permanent ship trait rolled at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuirkDefinition {
    /// Stable key.
    pub id: QuirkId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Effects applied for the life of the ship.
    pub effects: Vec<ShipEffect>,
}
