//! Generation stepping over the sparse live-cell set.
//!
//! Every operation is a pure function from one [`LiveSet`] snapshot to the
//! next. The step pass touches only live cells and their dead neighbors, so
//! cost is proportional to the live population, not to how far the pattern
//! has wandered from the origin.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;
use thiserror::Error;

use super::{Coord, LiveSet, Pattern};

/// Cap on the number of cells a single `randomize` call may sample.
pub const MAX_RANDOMIZE_CELLS: u64 = 1_000_000;

/// Errors surfaced by engine operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A randomize region would require iterating more cells than the cap
    /// allows. The caller decides whether to clamp the radius and retry.
    #[error("randomize region of {cells} cells exceeds the {limit}-cell cap")]
    RegionTooLarge { cells: u64, limit: u64 },
}

/// Compute the next generation under B3/S23.
///
/// Single combined pass: each live cell membership-tests its 8 neighbors,
/// and every *dead* neighbor touched gets an entry in a candidate tally map.
/// Survivors are live cells with 2 or 3 live neighbors; births are dead
/// candidates tallied exactly 3 times.
///
/// Returns a clone of the input `Arc` when the generation is a fixed point,
/// so callers can skip redundant downstream work via pointer comparison.
pub fn step(current: &Arc<LiveSet>) -> Arc<LiveSet> {
    let mut next = LiveSet::with_capacity(current.population());
    let mut candidates: HashMap<Coord, u8> = HashMap::with_capacity(current.population() * 4);

    for cell in current.iter() {
        let mut live = 0u8;
        for n in cell.neighbors() {
            if n == cell {
                // Clamp fold at the coordinate bound.
                continue;
            }
            if current.contains(n) {
                live += 1;
            } else {
                *candidates.entry(n).or_insert(0) += 1;
            }
        }
        if live == 2 || live == 3 {
            next.insert(cell);
        }
    }

    for (cell, tally) in candidates {
        if tally == 3 {
            next.insert(cell);
        }
    }

    publish(current, next)
}

/// Parallel variant of [`step`] with identical semantics.
///
/// Splits the live cells across rayon workers; each worker builds a partial
/// survivor list and candidate tally, merged in the reduce step. Worthwhile
/// once the population reaches the tens of thousands.
pub fn step_parallel(current: &Arc<LiveSet>) -> Arc<LiveSet> {
    let cells: Vec<Coord> = current.iter().collect();

    let (survivors, candidates) = cells
        .par_iter()
        .fold(
            || (Vec::new(), HashMap::new()),
            |(mut alive, mut cand), &cell| {
                let mut live = 0u8;
                for n in cell.neighbors() {
                    if n == cell {
                        continue;
                    }
                    if current.contains(n) {
                        live += 1;
                    } else {
                        *cand.entry(n).or_insert(0u8) += 1;
                    }
                }
                if live == 2 || live == 3 {
                    alive.push(cell);
                }
                (alive, cand)
            },
        )
        .reduce(
            || (Vec::new(), HashMap::new()),
            |(mut alive, mut cand), (alive_rhs, cand_rhs)| {
                alive.extend(alive_rhs);
                for (cell, tally) in cand_rhs {
                    *cand.entry(cell).or_insert(0) += tally;
                }
                (alive, cand)
            },
        );

    let mut next = LiveSet::with_capacity(survivors.len());
    for cell in survivors {
        next.insert(cell);
    }
    for (cell, tally) in candidates {
        if tally == 3 {
            next.insert(cell);
        }
    }

    publish(current, next)
}

/// Flip the liveness of a single cell, leaving every other cell untouched.
pub fn toggle(current: &LiveSet, coord: Coord) -> LiveSet {
    let mut next = current.clone();
    if next.contains(coord) {
        next.remove(coord);
    } else {
        next.insert(coord);
    }
    next
}

/// Stamp a pattern's relative offsets onto the set at the given origin,
/// returning the union.
pub fn stamp(current: &LiveSet, pattern: &Pattern, origin: Coord) -> LiveSet {
    let mut next = current.clone();
    for &(d_row, d_col) in &pattern.cells {
        next.insert(origin.offset(d_row, d_col));
    }
    next
}

/// Replace the working set with an independent sample over the square
/// region `[center - radius, center + radius]²` at per-cell probability
/// `density`.
///
/// Rejects regions over [`MAX_RANDOMIZE_CELLS`] instead of hanging on an
/// absurd radius; the previous set is untouched on rejection.
pub fn randomize(
    center: Coord,
    radius: i32,
    density: f64,
    rng: &mut impl Rng,
) -> Result<LiveSet, EngineError> {
    let radius = radius.max(0);
    let side = 2 * radius as u64 + 1;
    let cells = side * side;
    if cells > MAX_RANDOMIZE_CELLS {
        return Err(EngineError::RegionTooLarge {
            cells,
            limit: MAX_RANDOMIZE_CELLS,
        });
    }

    let density = density.clamp(0.0, 1.0);
    let mut next = LiveSet::with_capacity((cells as f64 * density) as usize);
    for d_row in -radius..=radius {
        for d_col in -radius..=radius {
            if rng.random_bool(density) {
                next.insert(center.offset(d_row, d_col));
            }
        }
    }
    Ok(next)
}

fn publish(current: &Arc<LiveSet>, next: LiveSet) -> Arc<LiveSet> {
    if next == **current {
        Arc::clone(current)
    } else {
        Arc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn set_of(cells: &[(i32, i32)]) -> Arc<LiveSet> {
        Arc::new(cells.iter().map(|&(r, c)| Coord::new(r, c)).collect())
    }

    fn stamped(pattern: &Pattern, origin: Coord) -> Arc<LiveSet> {
        Arc::new(stamp(&LiveSet::new(), pattern, origin))
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let next = step(&Arc::new(LiveSet::new()));
        assert!(next.is_empty());
    }

    #[test]
    fn test_block_is_stable() {
        let block = set_of(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let mut current = Arc::clone(&block);
        for _ in 0..10 {
            current = step(&current);
        }
        assert_eq!(*current, *block);
    }

    #[test]
    fn test_stable_pattern_short_circuits_to_same_arc() {
        let block = set_of(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let next = step(&block);
        assert!(Arc::ptr_eq(&block, &next));
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let vertical = set_of(&[(-1, 0), (0, 0), (1, 0)]);
        let horizontal = set_of(&[(0, -1), (0, 0), (0, 1)]);

        let gen1 = step(&vertical);
        assert_eq!(*gen1, *horizontal);
        let gen2 = step(&gen1);
        assert_eq!(*gen2, *vertical);
    }

    #[test]
    fn test_glider_translates_by_one_one_every_four_steps() {
        let origin = Coord::new(17, -42);
        let mut current = stamped(&presets::glider(), origin);
        for _ in 0..4 {
            current = step(&current);
            assert_eq!(current.population(), 5);
        }
        let expected = stamped(&presets::glider(), origin.offset(1, 1));
        assert_eq!(*current, *expected);
    }

    #[test]
    fn test_step_is_translation_invariant_at_huge_offsets() {
        let near = stamped(&presets::glider(), Coord::new(0, 0));
        let far = stamped(&presets::glider(), Coord::new(900_000, 900_000));

        let near_next = step(&near);
        let far_next = step(&far);
        assert_eq!(near_next.population(), far_next.population());
        let shifted: LiveSet = far_next.iter().map(|c| c.offset(-900_000, -900_000)).collect();
        assert_eq!(shifted, *near_next);
    }

    #[test]
    fn test_parallel_step_matches_serial() {
        let mut rng = StdRng::seed_from_u64(7);
        let soup = Arc::new(randomize(Coord::new(0, 0), 30, 0.35, &mut rng).unwrap());

        let mut serial = Arc::clone(&soup);
        let mut parallel = soup;
        for _ in 0..8 {
            serial = step(&serial);
            parallel = step_parallel(&parallel);
        }
        assert_eq!(*serial, *parallel);
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let set = stamp(&LiveSet::new(), &presets::r_pentomino(), Coord::new(3, 3));
        for &(r, c) in &[(3, 3), (0, 0), (-5, 9)] {
            let coord = Coord::new(r, c);
            let back = toggle(&toggle(&set, coord), coord);
            assert_eq!(back, set);
        }
    }

    #[test]
    fn test_toggle_affects_only_the_one_cell() {
        let set = set_of(&[(1, 1), (2, 2)]);
        let next = toggle(&set, Coord::new(1, 1));
        assert!(!next.contains(Coord::new(1, 1)));
        assert!(next.contains(Coord::new(2, 2)));
        assert_eq!(next.population(), 1);
    }

    #[test]
    fn test_randomize_rejects_excessive_region() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = randomize(Coord::new(0, 0), 1_000, 0.5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            EngineError::RegionTooLarge {
                cells: 2001 * 2001,
                limit: MAX_RANDOMIZE_CELLS,
            }
        );
    }

    #[test]
    fn test_randomize_density_extremes() {
        let mut rng = StdRng::seed_from_u64(2);
        let none = randomize(Coord::new(0, 0), 10, 0.0, &mut rng).unwrap();
        assert!(none.is_empty());

        let all = randomize(Coord::new(5, 5), 2, 1.0, &mut rng).unwrap();
        assert_eq!(all.population(), 25);
        assert!(all.contains(Coord::new(3, 3)));
        assert!(all.contains(Coord::new(7, 7)));
    }

    #[test]
    fn test_stamp_unions_with_existing_cells() {
        let base = set_of(&[(100, 100)]);
        let next = stamp(&base, &presets::block(), Coord::new(0, 0));
        assert!(next.contains(Coord::new(100, 100)));
        assert_eq!(next.population(), 5);
    }
}
