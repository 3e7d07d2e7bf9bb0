use super::{Cell, CellChange};
use crate::error::ConfigError;
use rayon::prelude::*;

/// Grid holds the rectangular array of cell states, stored row-major.
/// Reads outside the grid see dead cells and writes outside it are ignored,
/// so callers never have to bounds-check pointer-derived coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let len = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Number of cells a `width` x `height` grid stores
    pub fn cell_count(width: usize, height: usize) -> Result<usize, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(ConfigError::GridTooLarge { width, height })
    }

    /// Get grid dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Convert signed coordinates to a storage index, `None` when off-grid
    fn index(&self, row: isize, col: isize) -> Option<usize> {
        let (row, col) = (usize::try_from(row).ok()?, usize::try_from(col).ok()?);
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// Get cell at position; anything off-grid reads as dead
    pub fn get(&self, row: isize, col: isize) -> Cell {
        self.index(row, col)
            .map_or(Cell::Dead, |idx| self.cells[idx])
    }

    /// Overwrite one cell. Returns the previous state, or `None` if off-grid.
    pub fn set(&mut self, row: isize, col: isize, cell: Cell) -> Option<Cell> {
        let idx = self.index(row, col)?;
        Some(std::mem::replace(&mut self.cells[idx], cell))
    }

    /// Overwrite every cell from a per-cell value source
    pub fn fill(&mut self, mut generator: impl FnMut(usize, usize) -> Cell) {
        let width = self.width;
        self.cells.iter_mut().enumerate().for_each(|(idx, cell)| {
            *cell = generator(idx / width, idx % width);
        });
    }

    /// Full scan count of alive cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their `(row, col)` positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (idx / width, idx % width, cell))
    }

    /// Cells whose state in `other` differs from this grid, reported with
    /// the state they have in `other`. Both grids must share dimensions.
    pub fn diff(&self, other: &Grid) -> Vec<CellChange> {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        let width = self.width;
        self.cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(idx, (_, &after))| CellChange {
                row: idx / width,
                col: idx % width,
                state: after,
            })
            .collect()
    }

    /// Mutable rows, one slice of `width` cells each
    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Cell> {
        self.cells.chunks_mut(self.width)
    }

    /// Parallel mutable rows for rayon-driven evaluation
    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, Cell> {
        self.cells.par_chunks_mut(self.width)
    }
}
