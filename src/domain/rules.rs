//! The B3/S23 rule evaluator.
//!
//! The grid is a bounded plane: neighbors beyond the edge are dead and
//! contribute nothing, there is no wrap-around.

use super::{Cell, Grid};

/// Offsets of the 8 Moore-neighborhood cells, diagonals included
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Count live neighbors, treating off-grid positions as dead
pub fn count_live_neighbors(grid: &Grid, row: isize, col: isize) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dr, dc)| grid.get(row.saturating_add(dr), col.saturating_add(dc)))
        .filter(|cell| cell.is_alive())
        .count() as u8
}

/// Next state of the cell at `(row, col)`, read from `grid` only
pub fn next_state(grid: &Grid, row: isize, col: isize) -> Cell {
    grid.get(row, col).evolve(count_live_neighbors(grid, row, col))
}
