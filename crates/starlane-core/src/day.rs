//! The day cycle.
//!
//! Advancing one day is the unit of atomic time progression. The phases
//! always run in this order:
//!
//! 1. **Calendar** -- `days_elapsed` increases by one
//! 2. **Wear** -- hull, engine and life support decay (clamped)
//! 3. **Expiry** -- events whose `end_day` has passed are removed
//! 4. **Triggers** -- new events are rolled per kind and system
//! 5. **Recovery** -- market surplus shrinks
//! 6. **Observation** -- a docked ship records local prices
//!
//! Because every random draw is seeded from the kind, system and day,
//! re-running a day from the same state gives the same result.

use serde::Serialize;
use starlane_economy::intelligence::observe;
use starlane_economy::ship::{ConditionWarning, ShipModifiers, apply_daily_decay, condition_warnings};
use starlane_economy::{ReferenceData, market, price_table, update_events};
use starlane_types::{GameState, SystemId};
use tracing::info;

use crate::config::GameConfig;
use crate::error::CoreError;

/// What happened during one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    /// The day that began.
    pub day: u32,
    /// Ids of events that ended.
    pub expired_events: Vec<String>,
    /// Ids of events that began.
    pub created_events: Vec<String>,
    /// System whose prices were observed, if docked at a station.
    pub observed: Option<SystemId>,
    /// Ship systems below a threshold after wear.
    pub warnings: Vec<ConditionWarning>,
}

/// Run one day against the state.
///
/// `docked` is false while the ship is in transit; no prices are observed
/// then.
///
/// # Errors
///
/// Returns [`CoreError::UnknownSystem`] if the current system is not in the
/// catalog, or [`CoreError::ArithmeticOverflow`] if the calendar overflows.
/// Both are detected before anything changes.
pub fn run_day(
    state: &mut GameState,
    reference: &ReferenceData,
    config: &GameConfig,
    docked: bool,
) -> Result<DaySummary, CoreError> {
    let here = reference.catalog.get(state.player.current_system)?;
    let day = state
        .player
        .days_elapsed
        .checked_add(1)
        .ok_or_else(|| CoreError::overflow("days_elapsed increment"))?;

    // 1. Calendar
    state.player.days_elapsed = day;

    // 2. Wear
    let modifiers = ShipModifiers::for_ship(&state.ship, reference);
    apply_daily_decay(&mut state.ship, &modifiers, &config.ship);

    // 3-4. Expiry and triggers
    let update = update_events(
        &mut state.world.active_events,
        reference.catalog.systems(),
        day,
    );

    // 5. Recovery
    market::recover(&mut state.world.market_conditions, &config.market);

    // 6. Observation
    let observed = if docked && here.has_station {
        let prices = price_table(
            here,
            day,
            &state.world.active_events,
            &state.world.market_conditions,
            &config.market,
        );
        observe(&mut state.world.price_knowledge, here.id, prices, day);
        Some(here.id)
    } else {
        None
    };

    let warnings = condition_warnings(&state.ship, &config.ship);
    info!(
        day,
        created = update.created.len(),
        expired = update.expired.len(),
        warnings = warnings.len(),
        "Day advanced"
    );

    Ok(DaySummary {
        day,
        expired_events: update.expired.into_iter().map(|e| e.id).collect(),
        created_events: update.created.into_iter().map(|e| e.id).collect(),
        observed,
        warnings,
    })
}
