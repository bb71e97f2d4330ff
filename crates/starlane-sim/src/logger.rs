//! Change observer that writes game events to the log.

use starlane_core::{Observer, ObserverError, StateManager};
use starlane_types::{ChangeEvent, GameState};
use tracing::{debug, info, warn};

/// Logs every change notification it receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeLogger;

impl Observer for ChangeLogger {
    fn on_change(&mut self, event: ChangeEvent, state: &GameState) -> Result<(), ObserverError> {
        let day = state.player.days_elapsed;
        match event {
            ChangeEvent::Location => {
                info!(day, system = %state.player.current_system, "Docked");
            }
            ChangeEvent::ConditionWarnings => {
                warn!(
                    day,
                    hull = state.ship.hull,
                    engine = state.ship.engine,
                    life_support = state.ship.life_support,
                    "Ship condition low"
                );
            }
            ChangeEvent::Credits | ChangeEvent::Debt => {
                debug!(day, credits = state.player.credits, debt = state.player.debt, "Finances changed");
            }
            ChangeEvent::Fuel
            | ChangeEvent::Cargo
            | ChangeEvent::Time
            | ChangeEvent::ShipCondition
            | ChangeEvent::ShipName => {
                debug!(day, event = event.name(), "State changed");
            }
        }
        Ok(())
    }
}

/// Subscribe a [`ChangeLogger`] to every change event.
pub fn attach(manager: &mut StateManager) {
    for event in ChangeEvent::ALL {
        manager.subscribe(event, ChangeLogger);
    }
}
