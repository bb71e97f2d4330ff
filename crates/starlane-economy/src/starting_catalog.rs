//! Default star catalog: sixteen nearby stars linked by eighteen wormholes.
//!
//! Sol (id 0) and Alpha Centauri (id 1) are the core systems. Two brown
//! dwarfs (Luhman 16 and Epsilon Indi Ba) have no station.

use starlane_types::{StarSystem, SystemId};

use crate::catalog::StarCatalog;
use crate::error::CatalogError;

/// Helper to build a [`StarSystem`].
fn star(id: u32, name: &str, coords: (f64, f64, f64), spectral: &str, station: bool) -> StarSystem {
    StarSystem {
        id: SystemId(id),
        name: name.to_string(),
        x: coords.0,
        y: coords.1,
        z: coords.2,
        spectral_type: spectral.to_string(),
        has_station: station,
    }
}

/// The stock systems, in catalog order.
pub fn default_systems() -> Vec<StarSystem> {
    vec![
        star(0, "Sol", (0.0, 0.0, 0.0), "G2", true),
        star(1, "Alpha Centauri", (-1.6, -1.4, -3.8), "G2", true),
        star(2, "Barnard's Star", (-0.06, -5.94, 0.49), "M4", true),
        star(3, "Wolf 359", (-7.4, 2.1, 1.0), "M6", true),
        star(4, "Lalande 21185", (-6.5, 1.6, 4.9), "M2", true),
        star(5, "Sirius", (-1.6, 8.1, -2.5), "A1", true),
        star(6, "Luyten 726-8", (7.5, 3.4, -2.7), "M5", true),
        star(7, "Ross 154", (1.9, -8.6, -3.9), "M3", true),
        star(8, "Epsilon Eridani", (6.2, 8.3, -1.7), "K2", true),
        star(9, "Procyon", (-4.8, 10.3, 1.0), "F5", true),
        star(10, "Luhman 16", (-3.4, -1.9, -5.5), "L8", false),
        star(11, "Epsilon Indi Ba", (5.7, -3.2, -9.4), "T1", false),
        star(12, "Tau Ceti", (10.3, 5.0, -3.3), "G8", true),
        star(13, "Van Maanen's Star", (13.7, 2.9, 1.3), "DZ7", true),
        star(14, "Vega", (3.0, -19.7, 15.4), "A0", true),
        star(15, "Altair", (7.7, -14.6, 2.6), "A7", true),
    ]
}

/// The stock wormhole pairs.
pub fn default_wormholes() -> Vec<(SystemId, SystemId)> {
    [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 5),
        (1, 2),
        (1, 10),
        (2, 7),
        (3, 4),
        (4, 9),
        (5, 9),
        (5, 6),
        (6, 8),
        (8, 12),
        (12, 13),
        (11, 10),
        (7, 11),
        (13, 15),
        (15, 14),
    ]
    .into_iter()
    .map(|(a, b)| (SystemId(a), SystemId(b)))
    .collect()
}

/// Build the default catalog.
///
/// # Errors
///
/// Returns a [`CatalogError`] only if the built-in tables are inconsistent.
pub fn default_catalog() -> Result<StarCatalog, CatalogError> {
    StarCatalog::new(default_systems(), &default_wormholes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_builds_and_is_connected() {
        let catalog = default_catalog();
        assert!(catalog.is_ok());
        let catalog = catalog.unwrap_or_default();
        assert_eq!(catalog.len(), 16);
        assert!(catalog.is_connected());
    }

    #[test]
    fn sol_is_origin_and_core_systems_linked() {
        let catalog = default_catalog().unwrap_or_default();
        let sol = catalog.distance_from_origin(SystemId(0)).unwrap_or(f64::MAX);
        assert!(sol.abs() < f64::EPSILON);
        assert!(catalog.are_connected(SystemId(0), SystemId(1)));
    }

    #[test]
    fn stationless_systems() {
        let catalog = default_catalog().unwrap_or_default();
        let without: Vec<SystemId> = catalog
            .systems()
            .iter()
            .filter(|s| !s.has_station)
            .map(|s| s.id)
            .collect();
        assert_eq!(without, vec![SystemId(10), SystemId(11)]);
    }

    #[test]
    fn vega_is_the_long_way_round() {
        let catalog = default_catalog().unwrap_or_default();
        let route = catalog
            .shortest_route(SystemId(0), SystemId(14))
            .ok()
            .flatten()
            .unwrap_or_default();
        assert_eq!(route.first(), Some(&SystemId(0)));
        assert_eq!(route.last(), Some(&SystemId(14)));
        assert!(route.contains(&SystemId(15)));
    }
}
