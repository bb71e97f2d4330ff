//! Market knowledge: how old the player's price data is, and what fresh
//! data costs.
//!
//! Staleness is `current_day - recorded_day` of the last snapshot. Systems
//! never observed have no staleness and fall in the `Unknown` band.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use starlane_types::{Commodity, PriceSnapshot, StalenessBand, StarSystem, SystemId};

use crate::config::IntelligenceConfig;
use crate::error::Rejection;

/// Price knowledge keyed by system.
pub type PriceKnowledge = BTreeMap<SystemId, PriceSnapshot>;

/// Days since prices at `system` were last observed, if ever.
pub fn staleness(knowledge: &PriceKnowledge, system: SystemId, current_day: u32) -> Option<u32> {
    knowledge
        .get(&system)
        .map(|snapshot| current_day.saturating_sub(snapshot.recorded_day))
}

/// Classify a staleness value.
pub const fn band(staleness: Option<u32>, config: &IntelligenceConfig) -> StalenessBand {
    match staleness {
        None => StalenessBand::Unknown,
        Some(0) => StalenessBand::Current,
        Some(days) if days <= config.recent_threshold_days => StalenessBand::Recent,
        Some(_) => StalenessBand::Stale,
    }
}

/// Price of intelligence for a band. Current data is not for sale.
pub const fn cost(band: StalenessBand, config: &IntelligenceConfig) -> Option<u64> {
    match band {
        StalenessBand::Unknown => Some(config.unknown_cost),
        StalenessBand::Stale => Some(config.stale_cost),
        StalenessBand::Recent => Some(config.recent_cost),
        StalenessBand::Current => None,
    }
}

/// Price of intelligence for a system today.
///
/// # Errors
///
/// Returns [`Rejection::IntelligenceCurrent`] when the data is already
/// current.
pub fn quote(
    knowledge: &PriceKnowledge,
    system: SystemId,
    current_day: u32,
    config: &IntelligenceConfig,
) -> Result<u64, Rejection> {
    let band = band(staleness(knowledge, system, current_day), config);
    cost(band, config).ok_or(Rejection::IntelligenceCurrent(system))
}

/// Record observed prices for a system, resetting its staleness.
pub fn observe(
    knowledge: &mut PriceKnowledge,
    system: SystemId,
    prices: BTreeMap<Commodity, u32>,
    current_day: u32,
) {
    knowledge.insert(
        system,
        PriceSnapshot {
            prices,
            recorded_day: current_day,
        },
    );
}

/// A purchasable intelligence report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntelligenceOffer {
    /// The system the report covers.
    pub system_id: SystemId,
    /// How outdated the current data is.
    pub band: StalenessBand,
    /// Days since last observation, if ever observed.
    pub staleness: Option<u32>,
    /// Price in credits.
    pub cost: u64,
}

/// Every system whose data is not current, most valuable first.
///
/// Systems never docked at come first, whatever data was bought for them.
/// Within each group offers are ordered by band (unknown, stale, recent),
/// then oldest data first, then system id.
pub fn available_intelligence(
    knowledge: &PriceKnowledge,
    systems: &[StarSystem],
    visited: &BTreeSet<SystemId>,
    current_day: u32,
    config: &IntelligenceConfig,
) -> Vec<IntelligenceOffer> {
    let mut offers: Vec<IntelligenceOffer> = systems
        .iter()
        .filter_map(|system| {
            let age = staleness(knowledge, system.id, current_day);
            let band = band(age, config);
            cost(band, config).map(|cost| IntelligenceOffer {
                system_id: system.id,
                band,
                staleness: age,
                cost,
            })
        })
        .collect();
    offers.sort_by(|a, b| {
        visited
            .contains(&a.system_id)
            .cmp(&visited.contains(&b.system_id))
            .then_with(|| a.band.cmp(&b.band))
            .then_with(|| b.staleness.cmp(&a.staleness))
            .then_with(|| a.system_id.cmp(&b.system_id))
    });
    offers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: u32) -> StarSystem {
        StarSystem {
            id: SystemId(id),
            name: format!("S{id}"),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            spectral_type: String::from("G2"),
            has_station: true,
        }
    }

    fn knowledge_with(entries: &[(u32, u32)]) -> PriceKnowledge {
        let mut knowledge = PriceKnowledge::new();
        for &(system, day) in entries {
            observe(&mut knowledge, SystemId(system), BTreeMap::new(), day);
        }
        knowledge
    }

    #[test]
    fn bands_by_age() {
        let config = IntelligenceConfig::default();
        assert_eq!(band(None, &config), StalenessBand::Unknown);
        assert_eq!(band(Some(0), &config), StalenessBand::Current);
        assert_eq!(band(Some(1), &config), StalenessBand::Recent);
        assert_eq!(band(Some(30), &config), StalenessBand::Recent);
        assert_eq!(band(Some(31), &config), StalenessBand::Stale);
    }

    #[test]
    fn costs_by_band() {
        let config = IntelligenceConfig::default();
        assert_eq!(cost(StalenessBand::Unknown, &config), Some(100));
        assert_eq!(cost(StalenessBand::Stale, &config), Some(75));
        assert_eq!(cost(StalenessBand::Recent, &config), Some(50));
        assert_eq!(cost(StalenessBand::Current, &config), None);
    }

    #[test]
    fn quote_rejects_current_data() {
        let config = IntelligenceConfig::default();
        let knowledge = knowledge_with(&[(3, 12)]);
        assert_eq!(
            quote(&knowledge, SystemId(3), 12, &config),
            Err(Rejection::IntelligenceCurrent(SystemId(3)))
        );
        assert_eq!(quote(&knowledge, SystemId(3), 20, &config), Ok(50));
        assert_eq!(quote(&knowledge, SystemId(4), 20, &config), Ok(100));
    }

    #[test]
    fn observe_resets_staleness() {
        let mut knowledge = knowledge_with(&[(1, 2)]);
        assert_eq!(staleness(&knowledge, SystemId(1), 40), Some(38));
        observe(&mut knowledge, SystemId(1), BTreeMap::from([(Commodity::Ore, 14)]), 40);
        assert_eq!(staleness(&knowledge, SystemId(1), 40), Some(0));
        assert_eq!(
            knowledge.get(&SystemId(1)).and_then(|s| s.prices.get(&Commodity::Ore)),
            Some(&14)
        );
    }

    #[test]
    fn offers_sorted_by_priority() {
        let config = IntelligenceConfig::default();
        let systems: Vec<StarSystem> = (0..5).map(star).collect();
        // 0 current, 1 recent (10), 2 stale (50), 3 stale (35), 4 unknown
        let knowledge = knowledge_with(&[(0, 60), (1, 50), (2, 10), (3, 25)]);
        let visited = BTreeSet::from([SystemId(0), SystemId(1), SystemId(2), SystemId(3)]);
        let offers = available_intelligence(&knowledge, &systems, &visited, 60, &config);
        let order: Vec<u32> = offers.iter().map(|o| o.system_id.0).collect();
        assert_eq!(order, vec![4, 2, 3, 1]);
        assert_eq!(offers.first().map(|o| o.cost), Some(100));
        assert!(offers.iter().all(|o| o.band != StalenessBand::Current));
    }

    #[test]
    fn unvisited_systems_outrank_visited_ones() {
        let config = IntelligenceConfig::default();
        let systems: Vec<StarSystem> = (0..4).map(star).collect();
        // 0 visited and stale (41), 1 never visited but bought yesterday,
        // 2 visited and recent (5), 3 never visited and unknown.
        let knowledge = knowledge_with(&[(0, 0), (1, 40), (2, 36)]);
        let visited = BTreeSet::from([SystemId(0), SystemId(2)]);
        let offers = available_intelligence(&knowledge, &systems, &visited, 41, &config);
        let order: Vec<u32> = offers.iter().map(|o| o.system_id.0).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
        assert_eq!(
            offers.iter().find(|o| o.system_id == SystemId(1)).map(|o| o.band),
            Some(StalenessBand::Recent)
        );
    }
}
