//! A greedy trading strategy.
//!
//! Each turn the trader sells everything it carries, keeps the ship
//! fuelled and patched, then looks at what it knows about neighbouring
//! markets. If some commodity is cheaper here than the last price seen
//! next door, it fills the hold and jumps there. Otherwise it jumps to the
//! neighbour with the oldest price data. When no jump is possible it waits
//! a day.
//!
//! Refused actions are expected (prices move, credits run short) and are
//! logged and skipped. Contract errors stop the run.

use serde::Serialize;
use starlane_core::{CoreError, StateManager};
use starlane_economy::cargo;
use starlane_types::{CargoHold, Commodity, ShipSystem, SystemId};
use tracing::{debug, info};

/// Refuel when the tank drops below this percentage.
const REFUEL_BELOW: f64 = 60.0;

/// Repair a system when it drops below this percentage.
const REPAIR_BELOW: f64 = 40.0;

/// Points restored per repair visit.
const REPAIR_STEP: f64 = 20.0;

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Days elapsed at the end.
    pub days: u32,
    /// Final credits.
    pub credits: u64,
    /// Final debt.
    pub debt: u64,
    /// Completed buys and sells.
    pub trades: u32,
    /// Completed jumps.
    pub jumps: u32,
    /// Sum of sale profits against purchase prices.
    pub realised_profit: i64,
    /// Distinct systems docked at.
    pub systems_visited: usize,
    /// Events active at the end.
    pub active_events: Vec<String>,
}

/// A buy-here, sell-there opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TradePlan {
    commodity: Commodity,
    destination: SystemId,
    margin: i64,
    unit_price: u32,
}

/// Convert a refusal into `None`, propagating contract errors.
fn soft<T>(result: Result<T, CoreError>) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_rejection() => {
            debug!(reason = %err, "Trader action refused");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Greedy trader driving a [`StateManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trader {
    days: u32,
    reserve: u64,
}

impl Trader {
    /// A trader that stops after `days` and keeps `reserve` credits back.
    pub const fn new(days: u32, reserve: u64) -> Self {
        Self { days, reserve }
    }

    /// Play until the day limit.
    pub fn run(&self, manager: &mut StateManager) -> Result<RunReport, CoreError> {
        let mut report = RunReport::default();
        while manager.state()?.player.days_elapsed < self.days {
            let has_station = manager.current_system()?.has_station;
            if has_station {
                Self::sell_all(manager, &mut report)?;
                Self::service_ship(manager)?;
            }

            let plan = if has_station { Self::plan_trade(manager)? } else { None };
            if let Some(plan) = plan {
                self.buy_for(manager, &plan, &mut report)?;
            }

            let destination = match plan {
                Some(plan) => Some(plan.destination),
                None => Self::explore_target(manager)?,
            };
            let jumped = match destination {
                Some(target) => soft(manager.jump_to(target))?.is_some(),
                None => false,
            };
            if jumped {
                report.jumps = report.jumps.saturating_add(1);
            } else {
                manager.advance_day()?;
            }
        }

        let state = manager.state()?;
        report.days = state.player.days_elapsed;
        report.credits = state.player.credits;
        report.debt = state.player.debt;
        report.systems_visited = state.world.visited_systems.len();
        report.active_events = state
            .world
            .active_events
            .iter()
            .map(|e| e.id.clone())
            .collect();
        info!(
            days = report.days,
            credits = report.credits,
            trades = report.trades,
            jumps = report.jumps,
            "Run finished"
        );
        Ok(report)
    }

    fn sell_all(manager: &mut StateManager, report: &mut RunReport) -> Result<(), CoreError> {
        let holdings: Vec<(Commodity, u32)> = {
            let lots = &manager.state()?.ship.cargo;
            Commodity::ALL
                .into_iter()
                .map(|c| (c, cargo::quantity_of(lots, c)))
                .filter(|(_, quantity)| *quantity > 0)
                .collect()
        };
        for (commodity, quantity) in holdings {
            if let Some(receipt) = soft(manager.sell(commodity, quantity))? {
                report.trades = report.trades.saturating_add(1);
                report.realised_profit = report.realised_profit.saturating_add(receipt.profit);
            }
        }
        Ok(())
    }

    fn service_ship(manager: &mut StateManager) -> Result<(), CoreError> {
        let condition = manager.ship_condition()?;
        if condition.fuel < REFUEL_BELOW {
            soft(manager.refuel(100.0 - condition.fuel))?;
        }
        for system in ShipSystem::ALL {
            let current = manager.state()?.ship.condition(system);
            if current < REPAIR_BELOW {
                soft(manager.repair(system, REPAIR_STEP))?;
            }
        }
        Ok(())
    }

    /// Best positive margin between local prices and the last known prices
    /// of neighbouring markets.
    fn plan_trade(manager: &StateManager) -> Result<Option<TradePlan>, CoreError> {
        let state = manager.state()?;
        let here = state.player.current_system;
        let local = manager.prices(here)?;
        let mut best: Option<TradePlan> = None;
        for neighbor in manager.reference().catalog.neighbors(here)? {
            let Some(snapshot) = state.world.price_knowledge.get(&neighbor) else {
                continue;
            };
            for (commodity, sell_price) in &snapshot.prices {
                let Some(buy_price) = local.get(commodity).copied() else {
                    continue;
                };
                let margin = i64::from(*sell_price).saturating_sub(i64::from(buy_price));
                if margin > 0 && best.is_none_or(|b| margin > b.margin) {
                    best = Some(TradePlan {
                        commodity: *commodity,
                        destination: neighbor,
                        margin,
                        unit_price: buy_price,
                    });
                }
            }
        }
        Ok(best)
    }

    fn buy_for(&self, manager: &mut StateManager, plan: &TradePlan, report: &mut RunReport) -> Result<(), CoreError> {
        let budget = manager.state()?.player.credits.saturating_sub(self.reserve);
        let affordable = budget.checked_div(u64::from(plan.unit_price)).unwrap_or(0);
        let space = u64::from(manager.cargo_usage(CargoHold::Main)?.remaining);
        let quantity = u32::try_from(affordable.min(space)).unwrap_or(0);
        if quantity == 0 {
            return Ok(());
        }
        if soft(manager.buy(plan.commodity, quantity))?.is_some() {
            report.trades = report.trades.saturating_add(1);
            debug!(
                commodity = %plan.commodity,
                quantity,
                destination = %plan.destination,
                margin = plan.margin,
                "Cargo bought for resale"
            );
        }
        Ok(())
    }

    /// The neighbouring market with the oldest price data, never-seen first.
    fn explore_target(manager: &StateManager) -> Result<Option<SystemId>, CoreError> {
        let state = manager.state()?;
        let catalog = &manager.reference().catalog;
        let neighbors = catalog.neighbors(state.player.current_system)?;
        let target = neighbors
            .into_iter()
            .filter(|id| catalog.get(*id).is_ok_and(|s| s.has_station))
            .min_by_key(|id| {
                (
                    state.world.price_knowledge.get(id).map(|s| s.recorded_day),
                    *id,
                )
            });
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use starlane_core::GameConfig;

    use super::*;

    fn manager() -> Option<StateManager> {
        let mut config = GameConfig::default();
        config.new_game.quirk_count = 0;
        let mut manager = StateManager::with_standard_reference(config).ok()?;
        manager.new_game().ok()?;
        Some(manager)
    }

    #[test]
    fn run_stops_at_day_limit() {
        let Some(mut manager) = manager() else {
            return;
        };
        let report = Trader::new(20, 100).run(&mut manager).unwrap_or_default();
        assert!(report.days >= 20);
        assert!(report.systems_visited > 1);
    }

    #[test]
    fn runs_are_reproducible() {
        let (Some(mut a), Some(mut b)) = (manager(), manager()) else {
            return;
        };
        let trader = Trader::new(40, 100);
        let first = trader.run(&mut a).unwrap_or_default();
        let second = trader.run(&mut b).unwrap_or_default();
        assert_eq!(first, second);
    }

    #[test]
    fn refusals_are_soft() {
        let refused: Result<(), CoreError> =
            Err(CoreError::Rejected(starlane_economy::Rejection::NonPositiveAmount));
        assert_eq!(soft(refused), Ok(None));
        let broken: Result<(), CoreError> = Err(CoreError::NotInitialized);
        assert_eq!(soft(broken), Err(CoreError::NotInitialized));
    }
}
