//! Evaluation strategy for a generation advance.
//!
//! Both strategies read only the current buffer and write only the scratch
//! buffer, so they always produce identical generations.

/// How the simulation evaluates cells during an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Evaluation {
    /// Row by row on the calling thread
    #[default]
    Serial,
    /// Rows spread over the rayon thread pool
    Parallel,
}

impl Evaluation {
    /// Grids above this many cells benefit from parallel rows
    const PARALLEL_THRESHOLD: usize = 100 * 100;

    /// Get all available strategies
    pub fn all() -> Vec<Evaluation> {
        vec![Evaluation::Serial, Evaluation::Parallel]
    }

    /// Pick a strategy from the grid size
    pub fn for_size(width: usize, height: usize) -> Self {
        if width.saturating_mul(height) > Self::PARALLEL_THRESHOLD {
            Evaluation::Parallel
        } else {
            Evaluation::Serial
        }
    }

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            Evaluation::Serial => "Serial",
            Evaluation::Parallel => "Parallel",
        }
    }
}
