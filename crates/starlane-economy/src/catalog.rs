//! The static star catalog and its wormhole graph.
//!
//! [`StarCatalog`] holds every [`StarSystem`] in catalog order (the order
//! market events are rolled in) plus an undirected adjacency index built
//! from wormhole pairs. Distances are straight-line light-years computed
//! from catalog coordinates.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use starlane_types::{StarSystem, SystemId};

use crate::error::CatalogError;

/// Distance scale used to turn light-years into integer path weights.
const PATH_WEIGHT_SCALE: f64 = 1000.0;

/// Immutable catalog of star systems and wormholes.
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    /// Systems in catalog order.
    systems: Vec<StarSystem>,
    /// System id -> position in `systems`.
    index: BTreeMap<SystemId, usize>,
    /// Undirected adjacency: system -> wormhole neighbours.
    adjacency: BTreeMap<SystemId, BTreeSet<SystemId>>,
}

impl StarCatalog {
    /// Build a catalog from systems and wormhole pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSystem`] if two systems share an id,
    /// or [`CatalogError::DanglingWormhole`] if a wormhole references a
    /// system that is not in the list.
    pub fn new(
        systems: Vec<StarSystem>,
        wormholes: &[(SystemId, SystemId)],
    ) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();
        let mut adjacency: BTreeMap<SystemId, BTreeSet<SystemId>> = BTreeMap::new();
        for (position, system) in systems.iter().enumerate() {
            if index.insert(system.id, position).is_some() {
                return Err(CatalogError::DuplicateSystem(system.id));
            }
            adjacency.entry(system.id).or_default();
        }

        for &(from, to) in wormholes {
            if !index.contains_key(&from) || !index.contains_key(&to) {
                return Err(CatalogError::DanglingWormhole { from, to });
            }
            adjacency.entry(from).or_default().insert(to);
            adjacency.entry(to).or_default().insert(from);
        }

        Ok(Self {
            systems,
            index,
            adjacency,
        })
    }

    /// Look up a system by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSystem`] if the id is not in the catalog.
    pub fn get(&self, id: SystemId) -> Result<&StarSystem, CatalogError> {
        self.index
            .get(&id)
            .and_then(|&position| self.systems.get(position))
            .ok_or(CatalogError::UnknownSystem(id))
    }

    /// Whether the id is in the catalog.
    pub fn contains(&self, id: SystemId) -> bool {
        self.index.contains_key(&id)
    }

    /// All systems in catalog order.
    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    /// Number of systems.
    pub const fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the catalog has no systems.
    pub const fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Wormhole neighbours of a system, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSystem`] if the id is not in the catalog.
    pub fn neighbors(&self, id: SystemId) -> Result<Vec<SystemId>, CatalogError> {
        self.adjacency
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .ok_or(CatalogError::UnknownSystem(id))
    }

    /// Whether a wormhole links the two systems directly.
    pub fn are_connected(&self, a: SystemId, b: SystemId) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Straight-line distance between two systems in light-years.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSystem`] for either unknown id.
    pub fn distance_between(&self, a: SystemId, b: SystemId) -> Result<f64, CatalogError> {
        Ok(self.get(a)?.distance_to(self.get(b)?))
    }

    /// Distance of a system from Sol (the origin) in light-years.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSystem`] if the id is not in the catalog.
    pub fn distance_from_origin(&self, id: SystemId) -> Result<f64, CatalogError> {
        Ok(self.get(id)?.distance_from_origin())
    }

    /// Systems reachable from `start` within `max_jumps` wormhole jumps,
    /// including `start` itself.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSystem`] if `start` is not in the catalog.
    pub fn within_jumps(
        &self,
        start: SystemId,
        max_jumps: u32,
    ) -> Result<BTreeSet<SystemId>, CatalogError> {
        if !self.contains(start) {
            return Err(CatalogError::UnknownSystem(start));
        }
        let mut reached = BTreeSet::from([start]);
        let mut queue = VecDeque::from([(start, 0_u32)]);
        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_jumps {
                continue;
            }
            let next_depth = depth.saturating_add(1);
            for neighbor in self.adjacency.get(&current).into_iter().flatten() {
                if reached.insert(*neighbor) {
                    queue.push_back((*neighbor, next_depth));
                }
            }
        }
        Ok(reached)
    }

    /// Shortest wormhole route by travelled distance, inclusive of both ends.
    ///
    /// Returns `Ok(None)` when `goal` cannot be reached.
    ///
    /// Uses Dijkstra with a `BTreeSet` as the priority queue, weighting each
    /// jump by its distance in thousandths of a light-year.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSystem`] for either unknown id.
    pub fn shortest_route(
        &self,
        start: SystemId,
        goal: SystemId,
    ) -> Result<Option<Vec<SystemId>>, CatalogError> {
        self.get(start)?;
        self.get(goal)?;
        if start == goal {
            return Ok(Some(vec![start]));
        }

        let mut dist: BTreeMap<SystemId, u64> = BTreeMap::new();
        let mut prev: BTreeMap<SystemId, SystemId> = BTreeMap::new();
        let mut queue: BTreeSet<(u64, SystemId)> = BTreeSet::new();

        dist.insert(start, 0);
        queue.insert((0, start));

        while let Some((current_dist, current)) = queue.pop_first() {
            if current == goal {
                break;
            }
            for neighbor in self.adjacency.get(&current).into_iter().flatten() {
                let weight = path_weight(self.distance_between(current, *neighbor)?);
                let Some(new_dist) = current_dist.checked_add(weight) else {
                    continue;
                };
                let is_shorter = dist
                    .get(neighbor)
                    .is_none_or(|&existing| new_dist < existing);
                if is_shorter {
                    if let Some(&old) = dist.get(neighbor) {
                        queue.remove(&(old, *neighbor));
                    }
                    dist.insert(*neighbor, new_dist);
                    prev.insert(*neighbor, current);
                    queue.insert((new_dist, *neighbor));
                }
            }
        }

        if !prev.contains_key(&goal) {
            return Ok(None);
        }

        let mut path = VecDeque::from([goal]);
        let mut current = goal;
        while let Some(&predecessor) = prev.get(&current) {
            path.push_front(predecessor);
            current = predecessor;
            if current == start {
                break;
            }
        }
        Ok(Some(path.into_iter().collect()))
    }

    /// Whether every system is reachable from every other.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.systems.first() else {
            return true;
        };
        let mut visited = BTreeSet::from([first.id]);
        let mut queue = VecDeque::from([first.id]);
        while let Some(current) = queue.pop_front() {
            for neighbor in self.adjacency.get(&current).into_iter().flatten() {
                if visited.insert(*neighbor) {
                    queue.push_back(*neighbor);
                }
            }
        }
        visited.len() == self.systems.len()
    }
}

/// Convert a light-year distance into an integer path weight.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn path_weight(distance: f64) -> u64 {
    (distance * PATH_WEIGHT_SCALE).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: u32, x: f64, y: f64, z: f64) -> StarSystem {
        StarSystem {
            id: SystemId(id),
            name: format!("S{id}"),
            x,
            y,
            z,
            spectral_type: String::from("G2"),
            has_station: true,
        }
    }

    /// Square 0-1-2-3 with a long diagonal 0-2.
    fn square() -> StarCatalog {
        let systems = vec![
            star(0, 0.0, 0.0, 0.0),
            star(1, 3.0, 0.0, 0.0),
            star(2, 3.0, 3.0, 0.0),
            star(3, 0.0, 3.0, 0.0),
            star(4, 50.0, 50.0, 50.0),
        ];
        let wormholes = [
            (SystemId(0), SystemId(1)),
            (SystemId(1), SystemId(2)),
            (SystemId(2), SystemId(3)),
            (SystemId(3), SystemId(0)),
        ];
        StarCatalog::new(systems, &wormholes).unwrap_or_default()
    }

    #[test]
    fn lookup_and_unknown() {
        let catalog = square();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.get(SystemId(2)).is_ok());
        assert_eq!(
            catalog.get(SystemId(99)).err(),
            Some(CatalogError::UnknownSystem(SystemId(99)))
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = StarCatalog::new(vec![star(1, 0.0, 0.0, 0.0), star(1, 1.0, 0.0, 0.0)], &[]);
        assert_eq!(result.err(), Some(CatalogError::DuplicateSystem(SystemId(1))));
    }

    #[test]
    fn dangling_wormhole_rejected() {
        let result = StarCatalog::new(vec![star(0, 0.0, 0.0, 0.0)], &[(SystemId(0), SystemId(7))]);
        assert!(matches!(result, Err(CatalogError::DanglingWormhole { .. })));
    }

    #[test]
    fn wormholes_are_undirected() {
        let catalog = square();
        assert!(catalog.are_connected(SystemId(0), SystemId(1)));
        assert!(catalog.are_connected(SystemId(1), SystemId(0)));
        assert!(!catalog.are_connected(SystemId(0), SystemId(2)));
        assert_eq!(
            catalog.neighbors(SystemId(0)).unwrap_or_default(),
            vec![SystemId(1), SystemId(3)]
        );
    }

    #[test]
    fn distances() {
        let catalog = square();
        let d = catalog.distance_between(SystemId(0), SystemId(2)).unwrap_or_default();
        assert!((d - 18.0_f64.sqrt()).abs() < 1e-9);
        let o = catalog.distance_from_origin(SystemId(1)).unwrap_or_default();
        assert!((o - 3.0).abs() < 1e-9);
    }

    #[test]
    fn within_jumps_counts_hops() {
        let catalog = square();
        let zero = catalog.within_jumps(SystemId(0), 0).unwrap_or_default();
        assert_eq!(zero, BTreeSet::from([SystemId(0)]));
        let one = catalog.within_jumps(SystemId(0), 1).unwrap_or_default();
        assert_eq!(one, BTreeSet::from([SystemId(0), SystemId(1), SystemId(3)]));
        let two = catalog.within_jumps(SystemId(0), 2).unwrap_or_default();
        assert_eq!(two.len(), 4);
    }

    #[test]
    fn shortest_route_and_unreachable() {
        let catalog = square();
        let route = catalog.shortest_route(SystemId(0), SystemId(2)).ok().flatten();
        let route = route.unwrap_or_default();
        assert_eq!(route.len(), 3);
        assert_eq!(route.first(), Some(&SystemId(0)));
        assert_eq!(route.last(), Some(&SystemId(2)));

        let none = catalog.shortest_route(SystemId(0), SystemId(4));
        assert!(matches!(none, Ok(None)));

        let same = catalog.shortest_route(SystemId(3), SystemId(3));
        assert!(matches!(same, Ok(Some(ref p)) if p == &vec![SystemId(3)]));
    }

    #[test]
    fn connectivity() {
        assert!(!square().is_connected());
        assert!(StarCatalog::default().is_connected());
    }
}
