mod cell;
mod events;
mod evaluation;
mod grid;
mod patterns;
pub mod rules;
mod simulation;

pub use cell::Cell;
pub use events::{CellChange, GenerationAdvanced};
pub use evaluation::Evaluation;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use rules::{count_live_neighbors, next_state};
pub use simulation::Simulation;
