use std::time::Duration;

use crate::domain::{Evaluation, Grid};
use crate::error::ConfigError;

/// Probability that a seeded cell starts alive. The classic seeding draws
/// `floor(u * 1.3)` for uniform `u`, which is alive about 23% of the time.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3 / 1.3;

/// Everything needed to build a [`GameState`](crate::GameState).
#[derive(Clone, Debug, PartialEq)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    /// Wait between autonomous advances while running
    pub interval: Duration,
    pub alive_probability: f64,
    pub evaluation: Evaluation,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            interval: Duration::from_millis(100),
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            evaluation: Evaluation::Serial,
        }
    }
}

impl LifeConfig {
    /// Default config for a grid of the given size, with the evaluation
    /// strategy picked from the cell count
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            evaluation: Evaluation::for_size(width, height),
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_alive_probability(mut self, alive_probability: f64) -> Self {
        self.alive_probability = alive_probability;
        self
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Reject configurations with no well-defined simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::cell_count(self.width, self.height)?;
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::InvalidProbability(self.alive_probability));
        }
        Ok(())
    }
}
