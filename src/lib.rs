// Domain layer - grid, rule evaluator, simulation engine
pub mod domain;

// Application layer - run controller and command surface
pub mod application;

pub mod config;
pub mod error;

// Presentation adapters - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use application::{Camera, GameState, RunState, ScheduledAdvance, Scheduler};
pub use config::LifeConfig;
pub use domain::{presets, Cell, CellChange, Evaluation, GenerationAdvanced, Grid, Pattern, Simulation};
pub use error::ConfigError;
