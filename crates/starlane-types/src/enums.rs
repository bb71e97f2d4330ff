//! Enumeration types for the Starlane trading core.
//!
//! Every enum here is a closed set: commodities, spectral classes, market
//! event kinds, ship systems, and the change notifications published by the
//! state manager. Serialized names are `snake_case` so the UI and persisted
//! saves use the same keys the seeds are built from.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Commodities
// ---------------------------------------------------------------------------

/// A tradeable good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Commodity {
    /// Foodstuffs.
    Grain,
    /// Unrefined metal ore.
    Ore,
    /// Fusion fuel isotope.
    Tritium,
    /// Machine parts.
    Parts,
    /// Pharmaceuticals.
    Medicine,
    /// Consumer and industrial electronics.
    Electronics,
}

impl Commodity {
    /// All commodities in canonical order.
    ///
    /// The order is load-bearing: random commodity selection indexes into it.
    pub const ALL: [Self; 6] = [
        Self::Grain,
        Self::Ore,
        Self::Tritium,
        Self::Parts,
        Self::Medicine,
        Self::Electronics,
    ];

    /// Return the stable lowercase key (`"grain"`, `"ore"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Grain => "grain",
            Self::Ore => "ore",
            Self::Tritium => "tritium",
            Self::Parts => "parts",
            Self::Medicine => "medicine",
            Self::Electronics => "electronics",
        }
    }

    /// Whether the good is manufactured (as opposed to a raw material).
    pub const fn is_manufactured(self) -> bool {
        matches!(self, Self::Parts | Self::Medicine | Self::Electronics)
    }
}

impl core::fmt::Display for Commodity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Spectral classes
// ---------------------------------------------------------------------------

/// Star classification letter, the first character of a spectral type
/// such as `"G2"` or `"M3.5V"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SpectralClass {
    /// Yellow dwarf.
    G,
    /// Orange dwarf.
    K,
    /// Red dwarf.
    M,
    /// White main-sequence.
    A,
    /// Yellow-white.
    F,
    /// Blue giant.
    O,
    /// Blue-white.
    B,
    /// Brown dwarf (L).
    L,
    /// Brown dwarf (T).
    T,
    /// White dwarf.
    D,
}

impl SpectralClass {
    /// Parse the class from the first letter of a spectral type string.
    ///
    /// The letter is matched as written, so lowercase types are unknown.
    /// Returns `None` for empty strings and unknown letters.
    pub fn from_spectral_type(spectral_type: &str) -> Option<Self> {
        match spectral_type.chars().next()? {
            'G' => Some(Self::G),
            'K' => Some(Self::K),
            'M' => Some(Self::M),
            'A' => Some(Self::A),
            'F' => Some(Self::F),
            'O' => Some(Self::O),
            'B' => Some(Self::B),
            'L' => Some(Self::L),
            'T' => Some(Self::T),
            'D' => Some(Self::D),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Market events
// ---------------------------------------------------------------------------

/// The fixed registry of economic event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MarketEventKind {
    /// Miners walk out; ore and tritium become scarce.
    MiningStrike,
    /// Outbreak drives medicine demand up.
    MedicalEmergency,
    /// Celebrations at the core worlds.
    Festival,
    /// One commodity floods the market.
    SupplyGlut,
}

impl MarketEventKind {
    /// Every kind in registry (roll) order.
    pub const ALL: [Self; 4] = [
        Self::MiningStrike,
        Self::MedicalEmergency,
        Self::Festival,
        Self::SupplyGlut,
    ];

    /// Return the key used in event ids and seeds.
    pub const fn key(self) -> &'static str {
        match self {
            Self::MiningStrike => "mining_strike",
            Self::MedicalEmergency => "medical_emergency",
            Self::Festival => "festival",
            Self::SupplyGlut => "supply_glut",
        }
    }
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// A ship subsystem with a condition percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ShipSystem {
    /// Structural integrity.
    Hull,
    /// Drive and jump engine.
    Engine,
    /// Atmosphere and recycling.
    LifeSupport,
}

impl ShipSystem {
    /// All ship systems in display order.
    pub const ALL: [Self; 3] = [Self::Hull, Self::Engine, Self::LifeSupport];
}

/// Which cargo compartment a stack lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CargoHold {
    /// The regular, inspectable cargo bay.
    Main,
    /// The smuggling compartment.
    Hidden,
}

/// Severity of a ship condition warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum WarningSeverity {
    /// Below the warning threshold.
    Warning,
    /// Below the critical threshold.
    Critical,
}

// ---------------------------------------------------------------------------
// Market knowledge
// ---------------------------------------------------------------------------

/// How outdated the player's price information for a system is.
///
/// The declaration order is the purchase priority: never-visited systems
/// first, then stale, recent, and current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StalenessBand {
    /// Prices were never observed.
    Unknown,
    /// Older than the recent threshold.
    Stale,
    /// Observed within the recent threshold.
    Recent,
    /// Observed today.
    Current,
}

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

/// Named state changes published by the state manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ChangeEvent {
    /// Player credits changed.
    Credits,
    /// Player debt changed.
    Debt,
    /// Ship fuel changed.
    Fuel,
    /// Either cargo hold changed.
    Cargo,
    /// The current system changed.
    Location,
    /// Days elapsed changed.
    Time,
    /// Hull, engine or life support changed.
    ShipCondition,
    /// The ship was renamed.
    ShipName,
    /// One or more systems are below a warning threshold.
    ConditionWarnings,
}

impl ChangeEvent {
    /// Every notification kind.
    pub const ALL: [Self; 9] = [
        Self::Credits,
        Self::Debt,
        Self::Fuel,
        Self::Cargo,
        Self::Location,
        Self::Time,
        Self::ShipCondition,
        Self::ShipName,
        Self::ConditionWarnings,
    ];

    /// Return the subscription name of this notification.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Credits => "credits",
            Self::Debt => "debt",
            Self::Fuel => "fuel",
            Self::Cargo => "cargo",
            Self::Location => "location",
            Self::Time => "time",
            Self::ShipCondition => "ship_condition",
            Self::ShipName => "ship_name",
            Self::ConditionWarnings => "condition_warnings",
        }
    }
}

/// Error returned when parsing an unknown [`ChangeEvent`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChangeEvent(pub String);

impl core::fmt::Display for UnknownChangeEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown change event: {}", self.0)
    }
}

impl std::error::Error for UnknownChangeEvent {}

impl core::str::FromStr for ChangeEvent {
    type Err = UnknownChangeEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownChangeEvent(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commodity_serializes_snake_case() {
        let json = serde_json::to_string(&Commodity::Electronics).ok();
        assert_eq!(json.as_deref(), Some("\"electronics\""));
    }

    #[test]
    fn commodity_keys_match_serde_names() {
        for commodity in Commodity::ALL {
            let json = serde_json::to_string(&commodity).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", commodity.key()));
        }
    }

    #[test]
    fn spectral_class_uses_first_letter() {
        assert_eq!(SpectralClass::from_spectral_type("M3"), Some(SpectralClass::M));
        assert_eq!(SpectralClass::from_spectral_type("G2V"), Some(SpectralClass::G));
        assert_eq!(SpectralClass::from_spectral_type("g2V"), None);
        assert_eq!(SpectralClass::from_spectral_type("m3"), None);
        assert_eq!(SpectralClass::from_spectral_type("DZ7"), Some(SpectralClass::D));
        assert_eq!(SpectralClass::from_spectral_type("Y1"), None);
        assert_eq!(SpectralClass::from_spectral_type(""), None);
    }

    #[test]
    fn event_kind_keys() {
        let keys: Vec<&str> = MarketEventKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(
            keys,
            vec!["mining_strike", "medical_emergency", "festival", "supply_glut"]
        );
    }

    #[test]
    fn change_event_parses_known_names() {
        for event in ChangeEvent::ALL {
            assert_eq!(event.name().parse::<ChangeEvent>(), Ok(event));
        }
        assert!("warp_core".parse::<ChangeEvent>().is_err());
    }

    #[test]
    fn staleness_priority_order() {
        let mut bands = vec![
            StalenessBand::Current,
            StalenessBand::Recent,
            StalenessBand::Unknown,
            StalenessBand::Stale,
        ];
        bands.sort();
        assert_eq!(
            bands,
            vec![
                StalenessBand::Unknown,
                StalenessBand::Stale,
                StalenessBand::Recent,
                StalenessBand::Current,
            ]
        );
    }
}
