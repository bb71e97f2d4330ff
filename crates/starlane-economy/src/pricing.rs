//! Commodity pricing.
//!
//! A price is the base price of the commodity multiplied by four factors:
//!
//! 1. the spectral modifier of the system's star class,
//! 2. the technology factor derived from the system's distance to Sol,
//! 3. the modifier of an active market event at the system, if any,
//! 4. the market factor from player sales at the system.
//!
//! The product is rounded half away from zero with a floor of 1. All
//! multiplication happens in [`Decimal`] so the rounding is exact.
//!
//! # Technology factor
//!
//! Technology level runs linearly from 10.0 at Sol to 1.0 at 21 light-years
//! and beyond. Advanced worlds make manufactured goods cheaper and raw
//! goods dearer:
//!
//! ```text
//! raw:          1 + 0.03 * (tech - 5.5)
//! manufactured: 1 - 0.04 * (tech - 5.5)
//! ```

use std::collections::BTreeMap;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use starlane_types::{Commodity, MarketConditions, MarketEvent, SpectralClass, StarSystem};

use crate::config::MarketConfig;

/// Technology level at the origin.
pub const MAX_TECH_LEVEL: f64 = 10.0;

/// Technology level at or beyond [`TECH_FALLOFF_DISTANCE`].
pub const MIN_TECH_LEVEL: f64 = 1.0;

/// Distance in light-years at which technology bottoms out.
pub const TECH_FALLOFF_DISTANCE: f64 = 21.0;

/// Technology level at which the technology factor is neutral.
const TECH_MIDPOINT: f64 = 5.5;

/// Raw-goods price change per technology level.
const RAW_TECH_SLOPE: f64 = 0.03;

/// Manufactured-goods price change per technology level.
const MANUFACTURED_TECH_SLOPE: f64 = 0.04;

/// Decimal places kept in the technology factor.
const TECH_FACTOR_PRECISION: u32 = 4;

/// Lowest price any commodity can have.
const PRICE_FLOOR: u32 = 1;

// ---------------------------------------------------------------------------
// Static tables
// ---------------------------------------------------------------------------

/// Base price of a commodity in credits.
pub const fn base_price(commodity: Commodity) -> u32 {
    match commodity {
        Commodity::Grain => 10,
        Commodity::Ore => 15,
        Commodity::Tritium => 50,
        Commodity::Parts => 30,
        Commodity::Medicine => 40,
        Commodity::Electronics => 35,
    }
}

/// Spectral multipliers in tenths, columns in [`Commodity::ALL`] order.
const fn spectral_row(class: SpectralClass) -> [i64; 6] {
    match class {
        SpectralClass::G => [8, 10, 10, 10, 10, 10],
        SpectralClass::K => [9, 11, 10, 10, 9, 10],
        SpectralClass::M => [12, 8, 11, 11, 11, 12],
        SpectralClass::A => [11, 10, 8, 9, 10, 9],
        SpectralClass::F => [9, 10, 9, 10, 9, 10],
        SpectralClass::O => [13, 11, 7, 10, 12, 9],
        SpectralClass::B => [12, 11, 7, 10, 11, 9],
        SpectralClass::L => [14, 7, 12, 12, 13, 13],
        SpectralClass::T => [15, 7, 13, 12, 13, 14],
        SpectralClass::D => [13, 9, 12, 11, 12, 11],
    }
}

/// Spectral multiplier for a commodity. Unrecognised classes are neutral.
pub fn spectral_modifier(class: Option<SpectralClass>, commodity: Commodity) -> Decimal {
    let Some(class) = class else {
        return Decimal::ONE;
    };
    let column = Commodity::ALL
        .iter()
        .position(|c| *c == commodity)
        .unwrap_or(0);
    spectral_row(class)
        .get(column)
        .map_or(Decimal::ONE, |tenths| Decimal::new(*tenths, 1))
}

// ---------------------------------------------------------------------------
// Technology
// ---------------------------------------------------------------------------

/// Technology level for a distance from Sol, in `[1.0, 10.0]`.
pub fn tech_level(distance: f64) -> f64 {
    let distance = if distance.is_nan() {
        TECH_FALLOFF_DISTANCE
    } else {
        distance.clamp(0.0, TECH_FALLOFF_DISTANCE)
    };
    (MAX_TECH_LEVEL - MIN_TECH_LEVEL).mul_add(-distance / TECH_FALLOFF_DISTANCE, MAX_TECH_LEVEL)
}

/// Price multiplier from technology level, rounded to four decimal places.
pub fn tech_factor(tech: f64, commodity: Commodity) -> Decimal {
    let delta = tech - TECH_MIDPOINT;
    let factor = if commodity.is_manufactured() {
        MANUFACTURED_TECH_SLOPE.mul_add(-delta, 1.0)
    } else {
        RAW_TECH_SLOPE.mul_add(delta, 1.0)
    };
    Decimal::from_f64(factor)
        .unwrap_or(Decimal::ONE)
        .round_dp(TECH_FACTOR_PRECISION)
}

// ---------------------------------------------------------------------------
// Market pressure
// ---------------------------------------------------------------------------

/// Price multiplier from accumulated sales surplus.
///
/// `1 - pressure * surplus`, never below the configured minimum.
pub fn market_factor(surplus: u32, config: &MarketConfig) -> Decimal {
    let drop = config.sale_pressure_per_mille.saturating_mul(surplus);
    let per_mille = 1000_u32
        .saturating_sub(drop)
        .max(config.min_market_factor_per_mille)
        .min(1000);
    Decimal::new(i64::from(per_mille), 3)
}

/// Event multiplier for a commodity at a system on a day (1 when none applies).
pub fn event_modifier(
    commodity: Commodity,
    system: &StarSystem,
    current_day: u32,
    active_events: &[MarketEvent],
) -> Decimal {
    active_events
        .iter()
        .filter(|e| e.system_id == system.id && e.is_active_on(current_day))
        .find_map(|e| e.modifiers.get(&commodity).copied())
        .unwrap_or(Decimal::ONE)
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Current price of a commodity at a system.
///
/// Pure: identical arguments always yield the identical price.
pub fn calculate_price(
    commodity: Commodity,
    system: &StarSystem,
    current_day: u32,
    active_events: &[MarketEvent],
    conditions: &MarketConditions,
    config: &MarketConfig,
) -> u32 {
    let factors = [
        spectral_modifier(system.spectral_class(), commodity),
        tech_factor(tech_level(system.distance_from_origin()), commodity),
        event_modifier(commodity, system, current_day, active_events),
        market_factor(conditions.surplus(system.id, commodity), config),
    ];
    let raw = factors
        .iter()
        .try_fold(Decimal::from(base_price(commodity)), |acc, factor| {
            acc.checked_mul(*factor)
        })
        .unwrap_or(Decimal::MAX);
    round_price(raw)
}

/// Prices of every commodity at a system.
pub fn price_table(
    system: &StarSystem,
    current_day: u32,
    active_events: &[MarketEvent],
    conditions: &MarketConditions,
    config: &MarketConfig,
) -> BTreeMap<Commodity, u32> {
    Commodity::ALL
        .into_iter()
        .map(|commodity| {
            let price = calculate_price(
                commodity,
                system,
                current_day,
                active_events,
                conditions,
                config,
            );
            (commodity, price)
        })
        .collect()
}

/// Round half away from zero to a whole credit, with the price floor.
fn round_price(raw: Decimal) -> u32 {
    raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(if raw.is_sign_negative() { PRICE_FLOOR } else { u32::MAX })
        .max(PRICE_FLOOR)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use starlane_types::{MarketEventKind, SystemId};

    use super::*;

    fn system(id: u32, spectral: &str, coords: (f64, f64, f64)) -> StarSystem {
        StarSystem {
            id: SystemId(id),
            name: format!("S{id}"),
            x: coords.0,
            y: coords.1,
            z: coords.2,
            spectral_type: spectral.to_string(),
            has_station: true,
        }
    }

    fn sol() -> StarSystem {
        system(0, "G2", (0.0, 0.0, 0.0))
    }

    fn event(system_id: u32, start: u32, end: u32, commodity: Commodity, factor: Decimal) -> MarketEvent {
        MarketEvent {
            id: format!("festival_{system_id}_{start}"),
            kind: MarketEventKind::Festival,
            system_id: SystemId(system_id),
            start_day: start,
            end_day: end,
            modifiers: BTreeMap::from([(commodity, factor)]),
        }
    }

    fn price(commodity: Commodity, s: &StarSystem, day: u32, events: &[MarketEvent]) -> u32 {
        calculate_price(
            commodity,
            s,
            day,
            events,
            &MarketConditions::default(),
            &MarketConfig::default(),
        )
    }

    #[test]
    fn tech_level_bounds() {
        assert!((tech_level(0.0) - 10.0).abs() < 1e-12);
        assert!((tech_level(21.0) - 1.0).abs() < 1e-12);
        assert!((tech_level(100.0) - 1.0).abs() < 1e-12);
        assert!((tech_level(10.5) - 5.5).abs() < 1e-12);
        assert!((tech_level(f64::NAN) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tech_factor_directions() {
        assert_eq!(tech_factor(10.0, Commodity::Grain), dec!(1.135));
        assert_eq!(tech_factor(10.0, Commodity::Electronics), dec!(0.82));
        assert_eq!(tech_factor(5.5, Commodity::Parts), dec!(1));
        assert_eq!(tech_factor(1.0, Commodity::Ore), dec!(0.865));
        assert_eq!(tech_factor(1.0, Commodity::Medicine), dec!(1.18));
    }

    #[test]
    fn sol_grain_price_is_fixed() {
        // 10 * 0.8 * 1.135 = 9.08
        assert_eq!(price(Commodity::Grain, &sol(), 0, &[]), 9);
    }

    #[test]
    fn sol_full_table() {
        let table = price_table(
            &sol(),
            0,
            &[],
            &MarketConditions::default(),
            &MarketConfig::default(),
        );
        // ore 15 * 1.135 = 17.025, tritium 50 * 1.135 = 56.75,
        // parts 30 * 0.82 = 24.6, medicine 40 * 0.82 = 32.8,
        // electronics 35 * 0.82 = 28.7
        assert_eq!(table.get(&Commodity::Grain), Some(&9));
        assert_eq!(table.get(&Commodity::Ore), Some(&17));
        assert_eq!(table.get(&Commodity::Tritium), Some(&57));
        assert_eq!(table.get(&Commodity::Parts), Some(&25));
        assert_eq!(table.get(&Commodity::Medicine), Some(&33));
        assert_eq!(table.get(&Commodity::Electronics), Some(&29));
    }

    #[test]
    fn unknown_spectral_class_is_neutral() {
        let odd = system(3, "Y0", (0.0, 0.0, 0.0));
        // 15 * 1 * 1.135 = 17.025
        assert_eq!(price(Commodity::Ore, &odd, 0, &[]), 17);
        assert_eq!(spectral_modifier(None, Commodity::Tritium), Decimal::ONE);
    }

    #[test]
    fn distant_red_dwarf() {
        // Beyond 21 ly: tech 1.0, raw factor 0.865, manufactured 1.18.
        let far = system(4, "M3", (30.0, 0.0, 0.0));
        // grain 10 * 1.2 * 0.865 = 10.38
        assert_eq!(price(Commodity::Grain, &far, 0, &[]), 10);
        // electronics 35 * 1.2 * 1.18 = 49.56
        assert_eq!(price(Commodity::Electronics, &far, 0, &[]), 50);
    }

    #[test]
    fn event_applies_only_to_its_system_commodity_and_window() {
        let events = vec![event(0, 3, 5, Commodity::Electronics, dec!(1.75))];
        // 28.7 * 1.75 = 50.225
        assert_eq!(price(Commodity::Electronics, &sol(), 4, &events), 50);
        assert_eq!(price(Commodity::Electronics, &sol(), 2, &events), 29);
        assert_eq!(price(Commodity::Electronics, &sol(), 6, &events), 29);
        assert_eq!(price(Commodity::Grain, &sol(), 4, &events), 9);
        let other = system(1, "G2", (0.0, 0.0, 0.0));
        assert_eq!(price(Commodity::Electronics, &other, 4, &events), 29);
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(round_price(dec!(2.5)), 3);
        assert_eq!(round_price(dec!(2.4999)), 2);
        assert_eq!(round_price(dec!(0.2)), 1);
        assert_eq!(round_price(dec!(-4)), 1);
    }

    #[test]
    fn market_factor_clamps() {
        let config = MarketConfig::default();
        assert_eq!(market_factor(0, &config), Decimal::ONE);
        assert_eq!(market_factor(20, &config), dec!(0.9));
        assert_eq!(market_factor(60, &config), dec!(0.7));
        assert_eq!(market_factor(u32::MAX, &config), dec!(0.7));
    }

    #[test]
    fn surplus_depresses_price() {
        let mut conditions = MarketConditions::default();
        conditions
            .0
            .entry(SystemId(0))
            .or_default()
            .insert(Commodity::Tritium, 20);
        let depressed = calculate_price(
            Commodity::Tritium,
            &sol(),
            0,
            &[],
            &conditions,
            &MarketConfig::default(),
        );
        // 56.75 * 0.9 = 51.075
        assert_eq!(depressed, 51);
    }

    #[test]
    fn pricing_is_pure() {
        let events = vec![event(0, 0, 9, Commodity::Grain, dec!(1.2))];
        let conditions = MarketConditions::default();
        let config = MarketConfig::default();
        let first = price_table(&sol(), 3, &events, &conditions, &config);
        let second = price_table(&sol(), 3, &events, &conditions, &config);
        assert_eq!(first, second);
        // 9.08 * 1.2 = 10.896
        assert_eq!(first.get(&Commodity::Grain), Some(&11));
    }
}
