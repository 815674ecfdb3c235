//! Sparse Game of Life engine
//!
//! The state is only the set of live cells, so the cost of a generation scales with the
//! population rather than with the extent of the grid. Each generation is computed from a
//! frozen reference to the current set and swapped in as a whole.

use super::cell::{Bounds, Cell, LiveSet};
use super::rules::GameOfLifeRules;
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Moore neighborhood offsets, row by row, center excluded
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Owns the live cells of one simulation and advances them generation by generation
#[derive(Debug, Clone, Default)]
pub struct LifeEngine {
    alive: Arc<LiveSet>,
    generation: u64,
}

impl LifeEngine {
    /// Create an engine with an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine seeded with the given cells; duplicates collapse
    pub fn from_cells<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            alive: Arc::new(cells.into_iter().map(Into::into).collect()),
            generation: 0,
        }
    }

    /// Create an engine from raw `(x, y)` pairs
    pub fn from_coords(coords: &[(i64, i64)]) -> Self {
        Self::from_cells(coords.iter().copied())
    }

    /// The cells adjacent to `cell`: all 8, minus any that fall outside `i64`
    pub fn neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| cell.checked_offset(dx, dy))
    }

    /// Advance the grid by exactly one generation
    pub fn step(&mut self) {
        let current = Arc::clone(&self.alive);

        // Only cells adjacent to a live cell are ever materialized here.
        let max_neighbors = usize::from(GameOfLifeRules::max_neighbor_count());
        let mut tally: HashMap<Cell, u8> = HashMap::with_capacity(current.len() * max_neighbors);
        for &cell in current.iter() {
            for neighbor in Self::neighbors(cell) {
                *tally.entry(neighbor).or_insert(0) += 1;
            }
        }

        let next: LiveSet = tally
            .into_iter()
            .filter(|(cell, count)| {
                GameOfLifeRules::should_be_alive(current.contains(cell), *count)
            })
            .map(|(cell, _)| cell)
            .collect();

        self.alive = Arc::new(next);
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.alive.len(),
            "advanced generation"
        );
    }

    /// Advance the grid by `generations` steps
    pub fn step_n(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Smallest rectangle holding every live cell, or `None` when the grid is empty
    pub fn bounds(&self) -> Option<Bounds> {
        let (min_x, max_x) = self.alive.iter().map(|cell| cell.x).minmax().into_option()?;
        let (min_y, max_y) = self.alive.iter().map(|cell| cell.y).minmax().into_option()?;

        Some(Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Immutable handle to the current generation.
    ///
    /// The handle stays valid and unchanged after later calls to [`LifeEngine::step`].
    pub fn snapshot(&self) -> Arc<LiveSet> {
        Arc::clone(&self.alive)
    }

    /// Borrow the current live cells
    pub fn alive(&self) -> &LiveSet {
        &self.alive
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }

    pub fn population(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Number of steps taken since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shift every live cell by the given offset
    pub fn translate(&mut self, dx: i64, dy: i64) {
        if dx == 0 && dy == 0 {
            return;
        }

        let moved: LiveSet = self.alive.iter().map(|cell| cell.offset(dx, dy)).collect();
        self.alive = Arc::new(moved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn cells(coords: &[(i64, i64)]) -> LiveSet {
        coords.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_empty_is_fixed_point() {
        let mut engine = LifeEngine::new();
        engine.step();
        assert!(engine.is_empty());
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.bounds(), None);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut engine = LifeEngine::from_coords(&[(10, -4)]);
        engine.step();
        assert!(engine.is_empty());
    }

    #[test]
    fn test_still_life_block() {
        let block = cells(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let mut engine = LifeEngine::from_cells(block.iter().copied());
        engine.step();
        assert_eq!(*engine.alive(), block);
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = cells(&[(0, 0), (1, 0), (2, 0)]);
        let vertical = cells(&[(1, -1), (1, 0), (1, 1)]);

        let mut engine = LifeEngine::from_cells(horizontal.iter().copied());
        engine.step();
        assert_eq!(*engine.alive(), vertical);

        engine.step();
        assert_eq!(*engine.alive(), horizontal);
    }

    #[test]
    fn test_glider_translates_after_four_steps() {
        let glider = cells(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        let mut engine = LifeEngine::from_cells(glider.iter().copied());
        engine.step_n(4);

        let expected: LiveSet = glider.iter().map(|cell| cell.offset(1, 1)).collect();
        assert_eq!(*engine.alive(), expected);
        assert_eq!(engine.generation(), 4);
    }

    #[test]
    fn test_negative_coordinates() {
        let mut engine = LifeEngine::from_coords(&[(-101, -50), (-100, -50), (-99, -50)]);
        engine.step();
        assert_eq!(*engine.alive(), cells(&[(-100, -51), (-100, -50), (-100, -49)]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let engine = LifeEngine::from_coords(&[(3, 3), (3, 3), (3, 3)]);
        assert_eq!(engine.population(), 1);
    }

    #[test]
    fn test_snapshot_is_stable_across_steps() {
        let mut engine = LifeEngine::from_coords(&[(0, 0), (1, 0), (2, 0)]);
        let before = engine.snapshot();
        engine.step();

        assert_eq!(*before, cells(&[(0, 0), (1, 0), (2, 0)]));
        assert_ne!(*before, *engine.snapshot());
    }

    #[test]
    fn test_bounds() {
        let engine = LifeEngine::from_coords(&[(3, -2), (-1, 4), (0, 0)]);
        assert_eq!(
            engine.bounds(),
            Some(Bounds {
                min_x: -1,
                min_y: -2,
                max_x: 3,
                max_y: 4,
            })
        );
    }

    #[test]
    fn test_translate() {
        let mut engine = LifeEngine::from_coords(&[(5, 7), (6, 9)]);
        engine.translate(-5, -7);
        assert_eq!(*engine.alive(), cells(&[(0, 0), (1, 2)]));
    }

    #[test]
    fn test_neighbors_at_range_edges() {
        assert_eq!(LifeEngine::neighbors(Cell::new(i64::MAX, i64::MAX)).count(), 3);
        assert_eq!(LifeEngine::neighbors(Cell::new(i64::MIN, 0)).count(), 5);
        assert_eq!(LifeEngine::neighbors(Cell::new(0, 0)).count(), 8);
    }

    #[test]
    fn test_step_at_range_edges_does_not_wrap() {
        let mut engine = LifeEngine::from_coords(&[
            (i64::MAX, 0),
            (i64::MIN, i64::MIN),
            (0, i64::MAX),
        ]);
        engine.step();
        assert!(engine.is_empty());

        // A vertical blinker on the right edge loses the cell that would sit past i64::MAX.
        let mut engine =
            LifeEngine::from_coords(&[(i64::MAX, -1), (i64::MAX, 0), (i64::MAX, 1)]);
        engine.step();
        assert_eq!(*engine.alive(), cells(&[(i64::MAX - 1, 0), (i64::MAX, 0)]));
        assert!(engine.alive().iter().all(|cell| cell.x > 0));

        let mut engine =
            LifeEngine::from_coords(&[(-1, i64::MIN), (0, i64::MIN), (1, i64::MIN)]);
        engine.step();
        assert_eq!(*engine.alive(), cells(&[(0, i64::MIN), (0, i64::MIN + 1)]));
    }

    proptest! {
        #[test]
        fn neighbors_are_eight_distinct_cells(
            x in -1_000_000i64..1_000_000,
            y in -1_000_000i64..1_000_000
        ) {
            let center = Cell::new(x, y);
            let around: Vec<Cell> = LifeEngine::neighbors(center).collect();
            let distinct: HashSet<Cell> = around.iter().copied().collect();

            prop_assert_eq!(around.len(), 8);

            prop_assert_eq!(distinct.len(), 8);
            prop_assert!(!distinct.contains(&center));
            for cell in around {
                prop_assert!((cell.x - x).abs() <= 1 && (cell.y - y).abs() <= 1);
            }
        }

        #[test]
        fn bounds_are_tight(
            coords in prop::collection::vec((-500i64..500, -500i64..500), 1..64)
        ) {
            let engine = LifeEngine::from_cells(coords);
            let bounds = engine.bounds().unwrap();
            let live = engine.alive();

            prop_assert!(live.iter().all(|&cell| bounds.contains(cell)));
            prop_assert!(live.iter().any(|cell| cell.x == bounds.min_x));
            prop_assert!(live.iter().any(|cell| cell.x == bounds.max_x));
            prop_assert!(live.iter().any(|cell| cell.y == bounds.min_y));
            prop_assert!(live.iter().any(|cell| cell.y == bounds.max_y));
        }

        #[test]
        fn next_generation_stays_adjacent(
            coords in prop::collection::vec((-20i64..20, -20i64..20), 0..48)
        ) {
            let mut engine = LifeEngine::from_cells(coords);
            let previous = engine.snapshot();
            engine.step();

            for cell in engine.alive() {
                prop_assert!(LifeEngine::neighbors(*cell).any(|n| previous.contains(&n)));
            }
        }
    }
}
