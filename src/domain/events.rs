//! Notifications the simulation pushes to presentation adapters.

use super::Cell;

/// One cell whose state changed during an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub state: Cell,
}

/// Emitted after every committed advance, manual or scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationAdvanced {
    pub generation: u64,
    pub live_cells: usize,
    /// Only the cells that differ from the previous generation
    pub changes: Vec<CellChange>,
}
