//! Classic B3/S23 rule application

use super::{Cell, Grid};
use rayon::prelude::*;

/// Game of Life rule engine.
///
/// Generation updates are double-buffered: every neighbor count is taken
/// against the frozen previous generation, never against partially updated
/// cells.
pub struct RuleEngine;

impl RuleEngine {
    /// Next state of a single cell under the classic rules.
    ///
    /// Live cells with fewer than two neighbors die of underpopulation, with
    /// two or three they survive, with more than three they die of
    /// overpopulation; dead cells with exactly three neighbors are born.
    #[inline]
    pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
        match (cell, live_neighbors) {
            (Cell::Alive, 2) | (Cell::Alive, 3) | (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }

    /// Advance one generation, reading `current` and writing into `next`.
    ///
    /// The buffers must have identical dimensions; a mismatch is a programming
    /// error, not a recoverable condition.
    pub fn step_into(current: &Grid, next: &mut Grid) {
        assert_eq!(
            (current.width(), current.height()),
            (next.width(), next.height()),
            "step buffers must have identical dimensions",
        );

        let width = current.width();
        next.cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    let neighbors = current.live_neighbors(x, y);
                    *slot = Self::next_state(current.cell(x, y), neighbors);
                }
            });
    }

    /// Allocating convenience wrapper around [`RuleEngine::step_into`].
    pub fn step(current: &Grid) -> Grid {
        let mut next = current.cleared();
        Self::step_into(current, &mut next);
        next
    }
}
