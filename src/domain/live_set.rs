use std::collections::HashSet;

use super::{CellKey, Coord};

/// The authoritative simulation state: the set of currently live cells,
/// stored as packed [`CellKey`]s.
///
/// There is no grid and no bounding box; memory and step cost scale with the
/// live population alone. Readers receive the set behind an `Arc` snapshot
/// and every engine operation builds a complete replacement, so a renderer
/// can never observe a half-updated generation.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LiveSet {
    cells: HashSet<CellKey>,
}

impl LiveSet {
    /// An empty plane.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(capacity),
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord.key())
    }

    /// Iterate over the live cells in arbitrary order.
    ///
    /// A key that fails to decode is skipped rather than surfaced; it would
    /// mean an encoder bug, not bad user input.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().filter_map(|key| key.decode().ok())
    }

    pub(crate) fn insert(&mut self, coord: Coord) {
        self.cells.insert(coord.key());
    }

    pub(crate) fn remove(&mut self, coord: Coord) {
        self.cells.remove(&coord.key());
    }
}

impl FromIterator<Coord> for LiveSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Coord::key).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_inserts_collapse() {
        let set: LiveSet = [Coord::new(1, 1), Coord::new(1, 1), Coord::new(2, 2)]
            .into_iter()
            .collect();
        assert_eq!(set.population(), 2);
        assert!(set.contains(Coord::new(1, 1)));
    }

    #[test]
    fn test_empty_set() {
        let set = LiveSet::new();
        assert!(set.is_empty());
        assert_eq!(set.population(), 0);
        assert!(!set.contains(Coord::new(0, 0)));
    }

    #[test]
    fn test_iter_round_trips_through_keys() {
        let coords = [Coord::new(-3, 7), Coord::new(0, 0), Coord::new(900_000, -900_000)];
        let set: LiveSet = coords.into_iter().collect();
        let mut seen: Vec<Coord> = set.iter().collect();
        seen.sort();
        let mut expected = coords.to_vec();
        expected.sort();
        assert_eq!(seen, expected);
    }
}
