//! Market conditions: sales surplus and its daily recovery.
//!
//! Selling goods into a market adds to that market's surplus for the
//! commodity, which depresses its price (see [`crate::pricing::market_factor`]).
//! Buying does not move prices. Each day every surplus shrinks to the
//! configured retention share, rounding toward zero, and empty entries are
//! dropped so the map only holds live pressure.

use starlane_types::{Commodity, MarketConditions, SystemId};
use tracing::debug;

use crate::config::MarketConfig;

/// Add sold units to the surplus of a commodity at a system.
pub fn record_sale(
    conditions: &mut MarketConditions,
    system: SystemId,
    commodity: Commodity,
    quantity: u32,
) {
    if quantity == 0 {
        return;
    }
    let surplus = conditions
        .0
        .entry(system)
        .or_default()
        .entry(commodity)
        .or_insert(0);
    *surplus = surplus.saturating_add(quantity);
    debug!(%system, %commodity, surplus = *surplus, "Market surplus increased");
}

/// Apply one day of recovery to every surplus.
pub fn recover(conditions: &mut MarketConditions, config: &MarketConfig) {
    let retention = u64::from(config.daily_retention_percent.min(100));
    for goods in conditions.0.values_mut() {
        for surplus in goods.values_mut() {
            let kept = u64::from(*surplus)
                .saturating_mul(retention)
                .checked_div(100)
                .unwrap_or(0);
            *surplus = u32::try_from(kept).unwrap_or(*surplus);
        }
        goods.retain(|_, surplus| *surplus > 0);
    }
    conditions.0.retain(|_, goods| !goods.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_accumulate() {
        let mut conditions = MarketConditions::default();
        record_sale(&mut conditions, SystemId(2), Commodity::Ore, 10);
        record_sale(&mut conditions, SystemId(2), Commodity::Ore, 5);
        assert_eq!(conditions.surplus(SystemId(2), Commodity::Ore), 15);
        assert_eq!(conditions.surplus(SystemId(2), Commodity::Grain), 0);
    }

    #[test]
    fn zero_quantity_leaves_no_entry() {
        let mut conditions = MarketConditions::default();
        record_sale(&mut conditions, SystemId(2), Commodity::Ore, 0);
        assert!(conditions.0.is_empty());
    }

    #[test]
    fn recovery_decays_toward_zero_and_prunes() {
        let mut conditions = MarketConditions::default();
        record_sale(&mut conditions, SystemId(0), Commodity::Grain, 100);
        record_sale(&mut conditions, SystemId(1), Commodity::Parts, 1);
        let config = MarketConfig::default();

        recover(&mut conditions, &config);
        assert_eq!(conditions.surplus(SystemId(0), Commodity::Grain), 90);
        // 1 * 90 / 100 = 0, entry and system dropped
        assert!(!conditions.0.contains_key(&SystemId(1)));

        for _ in 0..100 {
            recover(&mut conditions, &config);
        }
        assert!(conditions.0.is_empty());
    }
}
