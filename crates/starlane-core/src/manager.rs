//! The state manager.
//!
//! [`StateManager`] exclusively owns the [`GameState`] tree. Every mutation
//! validates first and changes state only when all checks pass, then
//! notifies observers. Numeric work is delegated to `starlane-economy`.
//!
//! Mutations return `Result<_, CoreError>`. A [`CoreError::Rejected`] is a
//! refused player action with a reason string; any other error is a broken
//! caller contract such as operating before [`StateManager::new_game`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use starlane_economy::intelligence::{self, IntelligenceOffer};
use starlane_economy::ship::{self, ConditionWarning, ShipModifiers};
use starlane_economy::{ReferenceData, Rejection, cargo, calculate_price, market, price_table};
use starlane_types::{
    CargoHold, CargoStack, ChangeEvent, Commodity, GameState, MarketEvent, Meta, PlayerState,
    ShipState, ShipSystem, StarSystem, SystemId, UpgradeId, WorldState, clamp_percent,
};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::day::{DaySummary, run_day};
use crate::error::CoreError;
use crate::observer::{Observer, ObserverRegistry, SubscriptionId};

/// Slack allowed when comparing fuel against a jump's cost.
const FUEL_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Views and receipts
// ---------------------------------------------------------------------------

/// Space used in one cargo hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CargoUsage {
    /// Units stored.
    pub used: u32,
    /// Units the hold can take.
    pub capacity: u32,
    /// Units still free.
    pub remaining: u32,
}

/// Fuel and condition percentages of the ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionReport {
    /// Fuel, `[0, 100]`.
    pub fuel: f64,
    /// Hull, `[0, 100]`.
    pub hull: f64,
    /// Engine, `[0, 100]`.
    pub engine: f64,
    /// Life support, `[0, 100]`.
    pub life_support: f64,
}

/// Outcome of a buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradeReceipt {
    /// The good traded.
    pub commodity: Commodity,
    /// Units traded.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: u32,
    /// Credits paid or received.
    pub total: u64,
    /// For sales, the revenue minus what the sold lots cost. Zero for buys.
    pub profit: i64,
}

/// Outcome of a wormhole jump.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JumpSummary {
    /// Departure system.
    pub from: SystemId,
    /// Arrival system.
    pub to: SystemId,
    /// Distance travelled in light-years.
    pub distance: f64,
    /// Fuel percentage burned.
    pub fuel_used: f64,
    /// The days that passed in transit.
    pub days: Vec<DaySummary>,
}

/// A raw field write for debugging and administration.
///
/// Percentages are clamped; system ids are checked against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum DebugField {
    /// Set credits.
    Credits(u64),
    /// Set debt.
    Debt(u64),
    /// Set fuel.
    Fuel(f64),
    /// Set a ship system's condition.
    Condition(ShipSystem, f64),
    /// Teleport to a system.
    CurrentSystem(SystemId),
    /// Rename the ship.
    ShipName(String),
}

/// Log a refused action and wrap it.
fn rejected(operation: &'static str, rejection: Rejection) -> CoreError {
    debug!(operation, reason = %rejection, "Action rejected");
    CoreError::Rejected(rejection)
}

/// Reject unless the system has a station.
fn require_station(system: &StarSystem, operation: &'static str) -> Result<(), CoreError> {
    if system.has_station {
        Ok(())
    } else {
        Err(rejected(operation, Rejection::NoStation(system.id)))
    }
}

/// Reject unless the player can pay `cost`; returns the remaining balance.
fn charge(credits: u64, cost: u64, operation: &'static str) -> Result<u64, CoreError> {
    credits.checked_sub(cost).ok_or_else(|| {
        rejected(
            operation,
            Rejection::InsufficientCredits {
                required: cost,
                available: credits,
            },
        )
    })
}

// ---------------------------------------------------------------------------
// State manager
// ---------------------------------------------------------------------------

/// Owner of the game state and its change notifications.
#[derive(Debug)]
pub struct StateManager {
    reference: ReferenceData,
    config: GameConfig,
    state: Option<GameState>,
    observers: ObserverRegistry,
}

impl StateManager {
    /// Build a manager over reference data. No game is running yet.
    pub fn new(reference: ReferenceData, config: GameConfig) -> Self {
        Self {
            reference,
            config,
            state: None,
            observers: ObserverRegistry::new(),
        }
    }

    /// A manager over the stock catalog, upgrades and quirks.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Catalog`] if the built-in catalog is inconsistent.
    pub fn with_standard_reference(config: GameConfig) -> Result<Self, CoreError> {
        Ok(Self::new(ReferenceData::standard()?, config))
    }

    /// The reference data.
    pub const fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// The configuration.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether a game is running.
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start a new game from the `new_game` configuration.
    ///
    /// Replaces any running game. Every change event is published except
    /// `condition_warnings`, which a fresh ship never raises.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSystem`] if the starting system is not in
    /// the catalog.
    pub fn new_game(&mut self) -> Result<(), CoreError> {
        let setup = &self.config.new_game;
        let start = self.reference.catalog.get(setup.starting_system)?;

        let quirk_pool: Vec<_> = self.reference.quirks.keys().cloned().collect();
        let quirks = ship::assign_quirks(&setup.seed, &quirk_pool, setup.quirk_count);

        let mut new_ship = ShipState {
            name: setup.ship_name.clone(),
            fuel: clamp_percent(setup.starting_fuel),
            cargo_capacity: setup.cargo_capacity.max(1),
            cargo: Vec::new(),
            hidden_cargo_capacity: None,
            hidden_cargo: Vec::new(),
            hull: 100.0,
            engine: 100.0,
            life_support: 100.0,
            upgrades: BTreeSet::new(),
            quirks,
        };
        for definition in new_ship
            .quirks
            .iter()
            .filter_map(|id| self.reference.quirk(id))
            .collect::<Vec<_>>()
        {
            ship::apply_capacity_effects(&mut new_ship, &definition.effects);
        }

        let mut world = WorldState::default();
        world.visited_systems.insert(start.id);
        if start.has_station {
            let prices = price_table(
                start,
                0,
                &world.active_events,
                &world.market_conditions,
                &self.config.market,
            );
            intelligence::observe(&mut world.price_knowledge, start.id, prices, 0);
        }

        let state = GameState {
            player: PlayerState {
                credits: setup.starting_credits,
                debt: setup.starting_debt,
                current_system: start.id,
                days_elapsed: 0,
            },
            ship: new_ship,
            world,
            meta: Meta::new(),
        };
        info!(
            game_id = %state.meta.game_id,
            seed = %setup.seed,
            system = %start.name,
            quirks = ?state.ship.quirks,
            "New game started"
        );
        self.state = Some(state);
        let events: Vec<ChangeEvent> = ChangeEvent::ALL
            .into_iter()
            .filter(|e| *e != ChangeEvent::ConditionWarnings)
            .collect();
        self.emit(&events);
        Ok(())
    }

    /// Adopt a state restored by the persistence layer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSystem`] if the state refers to a system
    /// outside the catalog.
    pub fn load_state(&mut self, state: GameState) -> Result<(), CoreError> {
        self.reference.catalog.get(state.player.current_system)?;
        if let Some(unknown) = state
            .world
            .visited_systems
            .iter()
            .find(|id| !self.reference.catalog.contains(**id))
        {
            return Err(CoreError::UnknownSystem(*unknown));
        }
        info!(game_id = %state.meta.game_id, day = state.player.days_elapsed, "Game state loaded");
        self.state = Some(state);
        self.emit(&ChangeEvent::ALL);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The current state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotInitialized`] before a game starts.
    pub fn state(&self) -> Result<&GameState, CoreError> {
        self.state.as_ref().ok_or(CoreError::NotInitialized)
    }

    /// The system the ship is at.
    pub fn current_system(&self) -> Result<&StarSystem, CoreError> {
        let state = self.state()?;
        Ok(self.reference.catalog.get(state.player.current_system)?)
    }

    /// Space used in a hold.
    pub fn cargo_usage(&self, hold: CargoHold) -> Result<CargoUsage, CoreError> {
        let ship = &self.state()?.ship;
        let capacity = ship.hold_capacity(hold);
        let used = cargo::used_space(ship.hold(hold));
        Ok(CargoUsage {
            used,
            capacity,
            remaining: capacity.saturating_sub(used),
        })
    }

    /// Fuel and condition of the ship.
    pub fn ship_condition(&self) -> Result<ConditionReport, CoreError> {
        let ship = &self.state()?.ship;
        Ok(ConditionReport {
            fuel: ship.fuel,
            hull: ship.hull,
            engine: ship.engine,
            life_support: ship.life_support,
        })
    }

    /// Ship systems below a warning threshold.
    pub fn condition_warnings(&self) -> Result<Vec<ConditionWarning>, CoreError> {
        Ok(ship::condition_warnings(&self.state()?.ship, &self.config.ship))
    }

    /// Combined upgrade and quirk effects.
    pub fn modifiers(&self) -> Result<ShipModifiers, CoreError> {
        Ok(ShipModifiers::for_ship(&self.state()?.ship, &self.reference))
    }

    /// Systems the ship has docked at.
    pub fn visited_systems(&self) -> Result<&BTreeSet<SystemId>, CoreError> {
        Ok(&self.state()?.world.visited_systems)
    }

    /// Intelligence reports for sale, most valuable first.
    ///
    /// Never-visited systems lead the list. Systems without a station have no market and are never offered.
    pub fn available_intelligence(&self) -> Result<Vec<IntelligenceOffer>, CoreError> {
        let state = self.state()?;
        let markets: Vec<StarSystem> = self
            .reference
            .catalog
            .systems()
            .iter()
            .filter(|s| s.has_station)
            .cloned()
            .collect();
        Ok(intelligence::available_intelligence(
            &state.world.price_knowledge,
            &markets,
            &state.world.visited_systems,
            state.player.days_elapsed,
            &self.config.intelligence,
        ))
    }

    /// The active event at a system, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSystem`] for ids outside the catalog.
    pub fn active_event(&self, system: SystemId) -> Result<Option<&MarketEvent>, CoreError> {
        let state = self.state()?;
        self.reference.catalog.get(system)?;
        Ok(state.world.event_at(system))
    }

    /// Active events the ship's sensors can see: the current system plus
    /// systems within the event-visibility range in jumps.
    pub fn visible_events(&self) -> Result<Vec<&MarketEvent>, CoreError> {
        let state = self.state()?;
        let range = ShipModifiers::for_ship(&state.ship, &self.reference).event_visibility;
        let in_range = self
            .reference
            .catalog
            .within_jumps(state.player.current_system, range)?;
        Ok(state
            .world
            .active_events
            .iter()
            .filter(|e| in_range.contains(&e.system_id))
            .collect())
    }

    /// Live price of a commodity at a system.
    pub fn price(&self, system: SystemId, commodity: Commodity) -> Result<u32, CoreError> {
        let state = self.state()?;
        let star = self.reference.catalog.get(system)?;
        Ok(calculate_price(
            commodity,
            star,
            state.player.days_elapsed,
            &state.world.active_events,
            &state.world.market_conditions,
            &self.config.market,
        ))
    }

    /// Live prices of every commodity at a system.
    pub fn prices(&self, system: SystemId) -> Result<BTreeMap<Commodity, u32>, CoreError> {
        let state = self.state()?;
        let star = self.reference.catalog.get(system)?;
        Ok(price_table(
            star,
            state.player.days_elapsed,
            &state.world.active_events,
            &state.world.market_conditions,
            &self.config.market,
        ))
    }

    /// Fuel percentage a jump to `destination` would burn.
    pub fn jump_fuel_cost(&self, destination: SystemId) -> Result<f64, CoreError> {
        let state = self.state()?;
        let distance = self
            .reference
            .catalog
            .distance_between(state.player.current_system, destination)?;
        let modifiers = ShipModifiers::for_ship(&state.ship, &self.reference);
        Ok(ship::jump_fuel_cost(distance, &modifiers, &self.config.ship))
    }

    // -----------------------------------------------------------------------
    // Trading
    // -----------------------------------------------------------------------

    /// Buy units of a commodity at the current system.
    ///
    /// Checks, in order: positive quantity, a station, credits, cargo space.
    pub fn buy(&mut self, commodity: Commodity, quantity: u32) -> Result<TradeReceipt, CoreError> {
        let (state, reference, config) = self.parts()?;
        let here = reference.catalog.get(state.player.current_system)?;
        if quantity == 0 {
            return Err(rejected("buy", Rejection::NonPositiveAmount));
        }
        require_station(here, "buy")?;

        let day = state.player.days_elapsed;
        let unit_price = calculate_price(
            commodity,
            here,
            day,
            &state.world.active_events,
            &state.world.market_conditions,
            &config.market,
        );
        let total = u64::from(unit_price)
            .checked_mul(u64::from(quantity))
            .ok_or_else(|| CoreError::overflow("purchase total"))?;
        let remaining = charge(state.player.credits, total, "buy")?;

        let lot = CargoStack {
            commodity,
            quantity,
            purchase_price: unit_price,
            purchase_system: here.id,
            purchase_day: day,
        };
        cargo::add_lot(&mut state.ship.cargo, state.ship.cargo_capacity, lot)
            .map_err(|r| rejected("buy", r))?;
        state.player.credits = remaining;
        info!(%commodity, quantity, unit_price, total, "Bought cargo");

        self.emit(&[ChangeEvent::Credits, ChangeEvent::Cargo]);
        Ok(TradeReceipt {
            commodity,
            quantity,
            unit_price,
            total,
            profit: 0,
        })
    }

    /// Sell units of a commodity from the main hold, oldest lots first.
    ///
    /// The sale adds to the local market surplus.
    pub fn sell(&mut self, commodity: Commodity, quantity: u32) -> Result<TradeReceipt, CoreError> {
        let (state, reference, config) = self.parts()?;
        let here = reference.catalog.get(state.player.current_system)?;
        if quantity == 0 {
            return Err(rejected("sell", Rejection::NonPositiveAmount));
        }
        require_station(here, "sell")?;

        let unit_price = calculate_price(
            commodity,
            here,
            state.player.days_elapsed,
            &state.world.active_events,
            &state.world.market_conditions,
            &config.market,
        );
        let total = u64::from(unit_price)
            .checked_mul(u64::from(quantity))
            .ok_or_else(|| CoreError::overflow("sale total"))?;
        let credits = state
            .player
            .credits
            .checked_add(total)
            .ok_or_else(|| CoreError::overflow("credits after sale"))?;

        let sold = cargo::remove_fifo(&mut state.ship.cargo, commodity, quantity)
            .map_err(|r| rejected("sell", r))?;
        state.player.credits = credits;
        market::record_sale(&mut state.world.market_conditions, here.id, commodity, quantity);

        let basis = sold.iter().fold(0_u64, |sum, lot| {
            sum.saturating_add(u64::from(lot.purchase_price).saturating_mul(u64::from(lot.quantity)))
        });
        let profit = i64::try_from(total)
            .unwrap_or(i64::MAX)
            .saturating_sub(i64::try_from(basis).unwrap_or(i64::MAX));
        info!(%commodity, quantity, unit_price, total, profit, "Sold cargo");

        self.emit(&[ChangeEvent::Credits, ChangeEvent::Cargo]);
        Ok(TradeReceipt {
            commodity,
            quantity,
            unit_price,
            total,
            profit,
        })
    }

    /// Move units from the main hold into the hidden compartment.
    pub fn move_to_hidden(&mut self, commodity: Commodity, quantity: u32) -> Result<(), CoreError> {
        self.transfer(CargoHold::Main, CargoHold::Hidden, commodity, quantity)
    }

    /// Move units from the hidden compartment back into the main hold.
    pub fn move_from_hidden(&mut self, commodity: Commodity, quantity: u32) -> Result<(), CoreError> {
        self.transfer(CargoHold::Hidden, CargoHold::Main, commodity, quantity)
    }

    fn transfer(
        &mut self,
        from: CargoHold,
        to: CargoHold,
        commodity: Commodity,
        quantity: u32,
    ) -> Result<(), CoreError> {
        let (state, _, _) = self.parts()?;
        cargo::transfer(&mut state.ship, from, to, commodity, quantity)
            .map_err(|r| rejected("transfer", r))?;
        debug!(?from, ?to, %commodity, quantity, "Cargo transferred");
        self.emit(&[ChangeEvent::Cargo]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Ship services
    // -----------------------------------------------------------------------

    /// Repair a ship system by `amount` points. Returns the credits charged.
    pub fn repair(&mut self, system: ShipSystem, amount: f64) -> Result<u64, CoreError> {
        let (state, _, config) = self.parts()?;
        let cost = ship::repair(&mut state.ship, system, amount, state.player.credits, &config.ship)
            .map_err(|r| rejected("repair", r))?;
        state.player.credits = state.player.credits.saturating_sub(cost);
        self.emit(&[ChangeEvent::Credits, ChangeEvent::ShipCondition]);
        Ok(cost)
    }

    /// Buy `amount` percentage points of fuel. Returns the credits charged.
    pub fn refuel(&mut self, amount: f64) -> Result<u64, CoreError> {
        let (state, _, config) = self.parts()?;
        let cost = ship::refuel(&mut state.ship, amount, state.player.credits, &config.ship)
            .map_err(|r| rejected("refuel", r))?;
        state.player.credits = state.player.credits.saturating_sub(cost);
        self.emit(&[ChangeEvent::Credits, ChangeEvent::Fuel]);
        Ok(cost)
    }

    /// Install an upgrade. Returns the credits charged.
    pub fn purchase_upgrade(&mut self, upgrade: &UpgradeId) -> Result<u64, CoreError> {
        let (state, reference, _) = self.parts()?;
        let definition = reference
            .upgrade(upgrade)
            .ok_or_else(|| rejected("upgrade", Rejection::UnknownUpgrade(upgrade.clone())))?;
        let cost = ship::purchase_upgrade(&mut state.ship, definition, state.player.credits)
            .map_err(|r| rejected("upgrade", r))?;
        state.player.credits = state.player.credits.saturating_sub(cost);
        info!(%upgrade, cost, "Upgrade purchased");
        self.emit(&[ChangeEvent::Credits, ChangeEvent::Cargo]);
        Ok(cost)
    }

    /// Buy fresh prices for a system. Returns the credits charged.
    ///
    /// # Errors
    ///
    /// Rejected when the system has no station, its data is already
    /// current, or the player cannot pay. Unknown ids are an integrity
    /// error.
    pub fn purchase_intelligence(&mut self, system: SystemId) -> Result<u64, CoreError> {
        let (state, reference, config) = self.parts()?;
        let target = reference.catalog.get(system)?;
        require_station(target, "intelligence")?;
        let day = state.player.days_elapsed;
        let cost = intelligence::quote(
            &state.world.price_knowledge,
            system,
            day,
            &config.intelligence,
        )
        .map_err(|r| rejected("intelligence", r))?;
        let remaining = charge(state.player.credits, cost, "intelligence")?;

        let prices = price_table(
            target,
            day,
            &state.world.active_events,
            &state.world.market_conditions,
            &config.market,
        );
        intelligence::observe(&mut state.world.price_knowledge, system, prices, day);
        state.player.credits = remaining;
        info!(%system, cost, "Intelligence purchased");

        self.emit(&[ChangeEvent::Credits]);
        Ok(cost)
    }

    /// Pay down debt.
    pub fn pay_debt(&mut self, amount: u64) -> Result<(), CoreError> {
        let (state, _, _) = self.parts()?;
        if amount == 0 {
            return Err(rejected("pay_debt", Rejection::NonPositiveAmount));
        }
        if amount > state.player.debt {
            return Err(rejected(
                "pay_debt",
                Rejection::PaymentExceedsDebt {
                    amount,
                    debt: state.player.debt,
                },
            ));
        }
        let remaining = charge(state.player.credits, amount, "pay_debt")?;
        state.player.credits = remaining;
        state.player.debt = state.player.debt.saturating_sub(amount);
        info!(amount, debt = state.player.debt, "Debt paid");
        self.emit(&[ChangeEvent::Credits, ChangeEvent::Debt]);
        Ok(())
    }

    /// Rename the ship.
    pub fn rename_ship(&mut self, name: &str) -> Result<(), CoreError> {
        let (state, _, _) = self.parts()?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(rejected("rename", Rejection::EmptyShipName));
        }
        state.ship.name = trimmed.to_string();
        self.emit(&[ChangeEvent::ShipName]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Time and travel
    // -----------------------------------------------------------------------

    /// Advance one day while docked.
    pub fn advance_day(&mut self) -> Result<DaySummary, CoreError> {
        let (state, reference, config) = self.parts()?;
        let summary = run_day(state, reference, config, true)?;
        self.emit(&[ChangeEvent::Time, ChangeEvent::ShipCondition]);
        Ok(summary)
    }

    /// Jump through a wormhole to a neighbouring system.
    ///
    /// Burns fuel, wears the hull, lets the travel days pass, then docks
    /// and records local prices.
    ///
    /// # Errors
    ///
    /// Rejected when already there, when no wormhole connects the systems,
    /// or when fuel is short. Unknown ids are an integrity error.
    pub fn jump_to(&mut self, destination: SystemId) -> Result<JumpSummary, CoreError> {
        let (state, reference, config) = self.parts()?;
        let from = state.player.current_system;
        let target = reference.catalog.get(destination)?;
        if destination == from {
            return Err(rejected("jump", Rejection::AlreadyAtDestination));
        }
        if !reference.catalog.are_connected(from, destination) {
            return Err(rejected(
                "jump",
                Rejection::NoWormhole {
                    from,
                    to: destination,
                },
            ));
        }

        let distance = reference.catalog.distance_between(from, destination)?;
        let modifiers = ShipModifiers::for_ship(&state.ship, reference);
        let fuel_used = ship::jump_fuel_cost(distance, &modifiers, &config.ship);
        if fuel_used > state.ship.fuel + FUEL_TOLERANCE {
            return Err(rejected(
                "jump",
                Rejection::InsufficientFuel {
                    required: fuel_used,
                    available: state.ship.fuel,
                },
            ));
        }
        let travel_days = ship::travel_days(distance, &config.ship);
        state
            .player
            .days_elapsed
            .checked_add(travel_days)
            .ok_or_else(|| CoreError::overflow("days_elapsed after jump"))?;

        state.ship.set_fuel(state.ship.fuel - fuel_used);
        ship::apply_jump_wear(&mut state.ship, &modifiers, &config.ship);

        let mut days = Vec::new();
        for _ in 0..travel_days {
            days.push(run_day(state, reference, config, false)?);
        }

        state.player.current_system = destination;
        state.world.visited_systems.insert(destination);
        if target.has_station {
            let day = state.player.days_elapsed;
            let prices = price_table(
                target,
                day,
                &state.world.active_events,
                &state.world.market_conditions,
                &config.market,
            );
            intelligence::observe(&mut state.world.price_knowledge, destination, prices, day);
        }
        info!(%from, to = %destination, distance, fuel_used, days = travel_days, "Jump completed");

        self.emit(&[
            ChangeEvent::Fuel,
            ChangeEvent::Location,
            ChangeEvent::Time,
            ChangeEvent::ShipCondition,
        ]);
        Ok(JumpSummary {
            from,
            to: destination,
            distance,
            fuel_used,
            days,
        })
    }

    // -----------------------------------------------------------------------
    // Debug surface
    // -----------------------------------------------------------------------

    /// Write a raw value, bypassing game rules other than bounds.
    pub fn set_raw(&mut self, field: DebugField) -> Result<(), CoreError> {
        let (state, reference, _) = self.parts()?;
        let event = match field {
            DebugField::Credits(value) => {
                state.player.credits = value;
                ChangeEvent::Credits
            }
            DebugField::Debt(value) => {
                state.player.debt = value;
                ChangeEvent::Debt
            }
            DebugField::Fuel(value) => {
                state.ship.set_fuel(value);
                ChangeEvent::Fuel
            }
            DebugField::Condition(system, value) => {
                state.ship.set_condition(system, value);
                ChangeEvent::ShipCondition
            }
            DebugField::CurrentSystem(system) => {
                reference.catalog.get(system)?;
                state.player.current_system = system;
                state.world.visited_systems.insert(system);
                ChangeEvent::Location
            }
            DebugField::ShipName(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(rejected("set_raw", Rejection::EmptyShipName));
                }
                state.ship.name = trimmed.to_string();
                ChangeEvent::ShipName
            }
        };
        debug!(event = event.name(), "Raw value written");
        self.emit(&[event]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    /// Subscribe a handler to a change event.
    pub fn subscribe(&mut self, event: ChangeEvent, observer: impl Observer + 'static) -> SubscriptionId {
        self.observers.subscribe(event, Box::new(observer))
    }

    /// Subscribe by event name. Unknown names log a warning and return
    /// `None`.
    pub fn subscribe_named(
        &mut self,
        name: &str,
        observer: impl Observer + 'static,
    ) -> Option<SubscriptionId> {
        self.observers.subscribe_named(name, Box::new(observer))
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Split borrows of the running state and the read-only inputs.
    fn parts(&mut self) -> Result<(&mut GameState, &ReferenceData, &GameConfig), CoreError> {
        let state = self.state.as_mut().ok_or(CoreError::NotInitialized)?;
        Ok((state, &self.reference, &self.config))
    }

    /// Publish committed changes.
    ///
    /// A `ship_condition` change is followed by `condition_warnings` when
    /// any system is below a threshold.
    fn emit(&mut self, events: &[ChangeEvent]) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        for event in events {
            self.observers.notify(*event, state);
            if *event == ChangeEvent::ShipCondition
                && !ship::condition_warnings(&state.ship, &self.config.ship).is_empty()
            {
                self.observers.notify(ChangeEvent::ConditionWarnings, state);
            }
        }
    }
}
