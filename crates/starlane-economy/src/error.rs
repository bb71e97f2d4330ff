//! Error types for the `starlane-economy` crate.
//!
//! Two families are kept apart on purpose:
//!
//! - [`Rejection`] is a player-facing validation failure. The operation that
//!   produced it made no change. Its `Display` text is the reason string
//!   shown to the player.
//! - [`CatalogError`] is an integrity failure: the caller referenced data
//!   that does not exist in the static catalog.

use starlane_types::{Commodity, ShipSystem, SystemId, UpgradeId};

/// A validation failure that leaves state unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The player cannot afford the transaction.
    #[error("insufficient credits")]
    InsufficientCredits {
        /// Credits the transaction costs.
        required: u64,
        /// Credits the player holds.
        available: u64,
    },

    /// The hold does not have room for the requested units.
    #[error("insufficient cargo capacity")]
    InsufficientCargoSpace {
        /// Units requested.
        requested: u32,
        /// Free units in the hold.
        available: u32,
    },

    /// The ship has no smuggling compartment.
    #[error("no hidden cargo compartment installed")]
    NoHiddenCompartment,

    /// The hold does not contain enough of the commodity.
    #[error("not enough {commodity} in cargo")]
    InsufficientCargo {
        /// The commodity requested.
        commodity: Commodity,
        /// Units requested.
        requested: u32,
        /// Units held.
        available: u32,
    },

    /// Quantities and amounts must be strictly positive.
    #[error("amount must be positive")]
    NonPositiveAmount,

    /// The repair would push a system above 100%.
    #[error("repair would exceed maximum condition")]
    RepairExceedsMaximum {
        /// The system being repaired.
        system: ShipSystem,
    },

    /// The refuel would overfill the tank.
    #[error("refuel would exceed tank capacity")]
    RefuelExceedsCapacity,

    /// The upgrade is already installed.
    #[error("upgrade already installed")]
    UpgradeAlreadyInstalled(UpgradeId),

    /// No upgrade with this id exists.
    #[error("unknown upgrade")]
    UnknownUpgrade(UpgradeId),

    /// Price data for the system is already current.
    #[error("intelligence already current")]
    IntelligenceCurrent(SystemId),

    /// The current system has no station to trade with.
    #[error("no station in this system")]
    NoStation(SystemId),

    /// There is no wormhole between the two systems.
    #[error("no wormhole connection")]
    NoWormhole {
        /// Departure system.
        from: SystemId,
        /// Requested destination.
        to: SystemId,
    },

    /// The ship is already at the requested destination.
    #[error("already at destination")]
    AlreadyAtDestination,

    /// Not enough fuel for the jump.
    #[error("insufficient fuel")]
    InsufficientFuel {
        /// Fuel the jump needs, in percent.
        required: f64,
        /// Fuel in the tank, in percent.
        available: f64,
    },

    /// Ship names must contain something other than whitespace.
    #[error("ship name must not be empty")]
    EmptyShipName,

    /// A debt payment larger than the outstanding debt.
    #[error("payment exceeds debt")]
    PaymentExceedsDebt {
        /// The attempted payment.
        amount: u64,
        /// The outstanding debt.
        debt: u64,
    },
}

impl Rejection {
    /// The player-facing reason string.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Errors raised when the static catalog is queried or built incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A system id that is not in the catalog.
    #[error("unknown system: {0}")]
    UnknownSystem(SystemId),

    /// Two catalog entries share an id.
    #[error("duplicate system id: {0}")]
    DuplicateSystem(SystemId),

    /// A wormhole references a system that does not exist.
    #[error("wormhole {from} -> {to} references an unknown system")]
    DanglingWormhole {
        /// One end of the wormhole.
        from: SystemId,
        /// The other end.
        to: SystemId,
    },
}
