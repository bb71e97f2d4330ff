//! Read-only reference data handed to the state manager at construction.
//!
//! [`ReferenceData`] bundles the star catalog with the upgrade and quirk
//! definitions. The stock definitions live here too.

use std::collections::BTreeMap;

use starlane_types::{QuirkDefinition, QuirkId, ShipEffect, UpgradeDefinition, UpgradeId};

use crate::catalog::StarCatalog;
use crate::error::CatalogError;
use crate::starting_catalog::default_catalog;

/// Static inputs of the economy.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Star systems and wormholes.
    pub catalog: StarCatalog,
    /// Purchasable upgrades keyed by id.
    pub upgrades: BTreeMap<UpgradeId, UpgradeDefinition>,
    /// Possible ship quirks keyed by id.
    pub quirks: BTreeMap<QuirkId, QuirkDefinition>,
}

impl ReferenceData {
    /// Bundle a catalog with upgrade and quirk lists.
    pub fn new(
        catalog: StarCatalog,
        upgrades: Vec<UpgradeDefinition>,
        quirks: Vec<QuirkDefinition>,
    ) -> Self {
        Self {
            catalog,
            upgrades: upgrades.into_iter().map(|u| (u.id.clone(), u)).collect(),
            quirks: quirks.into_iter().map(|q| (q.id.clone(), q)).collect(),
        }
    }

    /// The stock catalog, upgrades and quirks.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] only if the built-in tables are inconsistent.
    pub fn standard() -> Result<Self, CatalogError> {
        Ok(Self::new(
            default_catalog()?,
            default_upgrades(),
            default_quirks(),
        ))
    }

    /// Look up an upgrade definition.
    pub fn upgrade(&self, id: &UpgradeId) -> Option<&UpgradeDefinition> {
        self.upgrades.get(id)
    }

    /// Look up a quirk definition.
    pub fn quirk(&self, id: &QuirkId) -> Option<&QuirkDefinition> {
        self.quirks.get(id)
    }
}

/// Helper to build an [`UpgradeDefinition`].
fn upgrade(
    id: &str,
    name: &str,
    cost: u64,
    effects: Vec<ShipEffect>,
    tradeoff: Option<&str>,
) -> UpgradeDefinition {
    UpgradeDefinition {
        id: UpgradeId::new(id),
        name: name.to_string(),
        cost,
        effects,
        tradeoff: tradeoff.map(str::to_string),
    }
}

/// Helper to build a [`QuirkDefinition`].
fn quirk(id: &str, name: &str, description: &str, effects: Vec<ShipEffect>) -> QuirkDefinition {
    QuirkDefinition {
        id: QuirkId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        effects,
    }
}

/// The stock upgrade list.
pub fn default_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "extended_tank",
            "Extended Fuel Tank",
            3000,
            vec![ShipEffect::FuelCapacity(1.5)],
            None,
        ),
        upgrade(
            "reinforced_hull",
            "Reinforced Hull Plating",
            2500,
            vec![ShipEffect::HullDegradation(0.5)],
            None,
        ),
        upgrade(
            "efficient_coils",
            "Efficient Drive Coils",
            2000,
            vec![ShipEffect::FuelConsumption(0.8)],
            None,
        ),
        upgrade(
            "medical_bay",
            "Medical Bay",
            1500,
            vec![ShipEffect::LifeSupportDegradation(0.5)],
            None,
        ),
        upgrade(
            "advanced_sensors",
            "Advanced Sensor Array",
            3500,
            vec![ShipEffect::EventVisibility(1)],
            None,
        ),
        upgrade(
            "smuggler_hold",
            "Smuggler's Hold",
            4000,
            vec![ShipEffect::HiddenCargo(10)],
            None,
        ),
        upgrade(
            "expanded_hold",
            "Expanded Cargo Hold",
            2800,
            vec![
                ShipEffect::CargoCapacity(25),
                ShipEffect::FuelConsumption(1.1),
            ],
            Some("heavier ship burns 10% more fuel"),
        ),
    ]
}

/// The stock quirk list.
pub fn default_quirks() -> Vec<QuirkDefinition> {
    vec![
        quirk(
            "fuel_sipper",
            "Fuel Sipper",
            "The drive runs lean and burns less fuel.",
            vec![ShipEffect::FuelConsumption(0.85)],
        ),
        quirk(
            "leaky_seals",
            "Leaky Seals",
            "Atmosphere seeps out; life support works harder.",
            vec![ShipEffect::LifeSupportDegradation(1.25)],
        ),
        quirk(
            "hot_engines",
            "Hot Engines",
            "The engines run hot and wear faster.",
            vec![ShipEffect::EngineDegradation(1.2)],
        ),
        quirk(
            "reinforced_frame",
            "Reinforced Frame",
            "An over-engineered frame shrugs off wear.",
            vec![ShipEffect::HullDegradation(0.8)],
        ),
        quirk(
            "cramped_hold",
            "Cramped Hold",
            "Bulkheads eat into the cargo bay.",
            vec![ShipEffect::CargoCapacity(-5)],
        ),
        quirk(
            "sensitive_sensors",
            "Sensitive Sensors",
            "Picks up chatter from neighbouring systems.",
            vec![ShipEffect::EventVisibility(1)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_reference_data() {
        let data = ReferenceData::standard().unwrap_or_default();
        assert_eq!(data.catalog.len(), 16);
        assert_eq!(data.upgrades.len(), 7);
        assert_eq!(data.quirks.len(), 6);
    }

    #[test]
    fn upgrade_lookup() {
        let data = ReferenceData::standard().unwrap_or_default();
        let hold = data.upgrade(&UpgradeId::new("smuggler_hold"));
        assert!(hold.is_some_and(|u| u.effects == vec![ShipEffect::HiddenCargo(10)]));
        assert!(data.upgrade(&UpgradeId::new("warp_drive")).is_none());
    }

    #[test]
    fn only_expanded_hold_has_tradeoff() {
        let with_tradeoff: Vec<String> = default_upgrades()
            .into_iter()
            .filter(|u| u.tradeoff.is_some())
            .map(|u| u.id.as_str().to_string())
            .collect();
        assert_eq!(with_tradeoff, vec![String::from("expanded_hold")]);
    }
}
