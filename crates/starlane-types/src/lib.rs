//! Shared type definitions for the Starlane trading core.
//!
//! This crate is the single source of truth for the game state shape and the
//! static reference data consumed by the economy and the state manager.
//! Types flow downstream to `TypeScript` via `ts-rs` for the UI and the
//! persistence layer, which serialize exactly these structures.
//!
//! # Modules
//!
//! - [`ids`] -- System ids, game ids, upgrade and quirk keys
//! - [`enums`] -- Commodities, spectral classes, event kinds, change events
//! - [`structs`] -- The [`GameState`] tree and its records
//! - [`reference`] -- Star systems, upgrade and quirk definitions

pub mod enums;
pub mod ids;
pub mod reference;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    CargoHold, ChangeEvent, Commodity, MarketEventKind, ShipSystem, SpectralClass, StalenessBand,
    UnknownChangeEvent, WarningSeverity,
};
pub use ids::{GameId, QuirkId, SystemId, UpgradeId};
pub use reference::{QuirkDefinition, ShipEffect, StarSystem, UpgradeDefinition};
pub use structs::{
    CargoStack, GameState, MAX_PERCENT, MIN_PERCENT, MarketConditions, MarketEvent, Meta,
    PlayerState, PriceSnapshot, SCHEMA_VERSION, ShipState, WorldState, clamp_percent,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::SystemId::export_all();
        let _ = crate::ids::GameId::export_all();
        let _ = crate::ids::UpgradeId::export_all();
        let _ = crate::ids::QuirkId::export_all();

        // Enums
        let _ = crate::enums::Commodity::export_all();
        let _ = crate::enums::SpectralClass::export_all();
        let _ = crate::enums::MarketEventKind::export_all();
        let _ = crate::enums::ShipSystem::export_all();
        let _ = crate::enums::CargoHold::export_all();
        let _ = crate::enums::WarningSeverity::export_all();
        let _ = crate::enums::StalenessBand::export_all();
        let _ = crate::enums::ChangeEvent::export_all();

        // State
        let _ = crate::structs::GameState::export_all();
        let _ = crate::structs::PlayerState::export_all();
        let _ = crate::structs::ShipState::export_all();
        let _ = crate::structs::CargoStack::export_all();
        let _ = crate::structs::WorldState::export_all();
        let _ = crate::structs::MarketEvent::export_all();
        let _ = crate::structs::PriceSnapshot::export_all();
        let _ = crate::structs::MarketConditions::export_all();
        let _ = crate::structs::Meta::export_all();

        // Reference data
        let _ = crate::reference::StarSystem::export_all();
        let _ = crate::reference::ShipEffect::export_all();
        let _ = crate::reference::UpgradeDefinition::export_all();
        let _ = crate::reference::QuirkDefinition::export_all();
    }
}
