//! Cargo-hold operations.
//!
//! A hold is an ordered list of purchase lots ([`CargoStack`]), oldest
//! first. New units merge into an existing lot only when commodity, price,
//! purchase system and purchase day all match, so per-lot profit stays
//! visible. Removal is first-in-first-out. Every operation validates before
//! it mutates: a rejected call leaves the hold untouched.

use starlane_types::{CargoHold, CargoStack, Commodity, ShipState};

use crate::error::Rejection;

/// Total units across all lots. Saturates at `u32::MAX`.
pub fn used_space(lots: &[CargoStack]) -> u32 {
    lots.iter()
        .fold(0_u32, |total, lot| total.saturating_add(lot.quantity))
}

/// Units left in a hold of the given capacity.
pub fn free_space(lots: &[CargoStack], capacity: u32) -> u32 {
    capacity.saturating_sub(used_space(lots))
}

/// Units of one commodity across all lots.
pub fn quantity_of(lots: &[CargoStack], commodity: Commodity) -> u32 {
    lots.iter()
        .filter(|lot| lot.commodity == commodity)
        .fold(0_u32, |total, lot| total.saturating_add(lot.quantity))
}

/// Whether two lots share commodity, price, origin and day.
fn same_lot(a: &CargoStack, b: &CargoStack) -> bool {
    a.commodity == b.commodity
        && a.purchase_price == b.purchase_price
        && a.purchase_system == b.purchase_system
        && a.purchase_day == b.purchase_day
}

/// Add a lot to a hold, merging into an identical lot if one exists.
///
/// # Errors
///
/// - [`Rejection::NonPositiveAmount`] if the lot is empty.
/// - [`Rejection::InsufficientCargoSpace`] if the hold cannot take it.
pub fn add_lot(lots: &mut Vec<CargoStack>, capacity: u32, lot: CargoStack) -> Result<(), Rejection> {
    if lot.quantity == 0 {
        return Err(Rejection::NonPositiveAmount);
    }
    let available = free_space(lots, capacity);
    if lot.quantity > available {
        return Err(Rejection::InsufficientCargoSpace {
            requested: lot.quantity,
            available,
        });
    }
    if let Some(existing) = lots.iter_mut().find(|existing| same_lot(existing, &lot)) {
        existing.quantity = existing.quantity.saturating_add(lot.quantity);
    } else {
        lots.push(lot);
    }
    Ok(())
}

/// Remove `quantity` units of a commodity, oldest lots first.
///
/// Returns the removed portions with their original purchase metadata.
///
/// # Errors
///
/// - [`Rejection::NonPositiveAmount`] if `quantity` is zero.
/// - [`Rejection::InsufficientCargo`] if the hold holds fewer units.
pub fn remove_fifo(
    lots: &mut Vec<CargoStack>,
    commodity: Commodity,
    quantity: u32,
) -> Result<Vec<CargoStack>, Rejection> {
    if quantity == 0 {
        return Err(Rejection::NonPositiveAmount);
    }
    let available = quantity_of(lots, commodity);
    if available < quantity {
        return Err(Rejection::InsufficientCargo {
            commodity,
            requested: quantity,
            available,
        });
    }

    let mut remaining = quantity;
    let mut taken = Vec::new();
    for lot in lots.iter_mut().filter(|lot| lot.commodity == commodity) {
        if remaining == 0 {
            break;
        }
        let take = lot.quantity.min(remaining);
        lot.quantity = lot.quantity.saturating_sub(take);
        remaining = remaining.saturating_sub(take);
        taken.push(CargoStack {
            quantity: take,
            ..lot.clone()
        });
    }
    lots.retain(|lot| lot.quantity > 0);
    Ok(taken)
}

/// Move units of a commodity between the main hold and the hidden
/// compartment, oldest lots first, keeping purchase metadata.
///
/// # Errors
///
/// - [`Rejection::NoHiddenCompartment`] if the ship has none.
/// - [`Rejection::NonPositiveAmount`] if `quantity` is zero.
/// - [`Rejection::InsufficientCargo`] if the source holds fewer units.
/// - [`Rejection::InsufficientCargoSpace`] if the destination lacks room.
pub fn transfer(
    ship: &mut ShipState,
    from: CargoHold,
    to: CargoHold,
    commodity: Commodity,
    quantity: u32,
) -> Result<(), Rejection> {
    if ship.hidden_cargo_capacity.is_none() {
        return Err(Rejection::NoHiddenCompartment);
    }
    if quantity == 0 {
        return Err(Rejection::NonPositiveAmount);
    }
    let held = quantity_of(ship.hold(from), commodity);
    if held < quantity {
        return Err(Rejection::InsufficientCargo {
            commodity,
            requested: quantity,
            available: held,
        });
    }
    if from == to {
        return Ok(());
    }
    let room = free_space(ship.hold(to), ship.hold_capacity(to));
    if quantity > room {
        return Err(Rejection::InsufficientCargoSpace {
            requested: quantity,
            available: room,
        });
    }

    let moved = remove_fifo(ship.hold_mut(from), commodity, quantity)?;
    let capacity = ship.hold_capacity(to);
    for lot in moved {
        add_lot(ship.hold_mut(to), capacity, lot)?;
    }
    Ok(())
}
