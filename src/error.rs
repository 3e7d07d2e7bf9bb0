use thiserror::Error;

/// Errors raised while building a simulation from its configuration.
/// Runtime operations never fail; only construction is validated.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Width and height must both be positive.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    /// The cell count does not fit in addressable memory.
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge { width: usize, height: usize },
    /// The autonomous advance interval must be longer than zero.
    #[error("advance interval must be positive")]
    ZeroInterval,
    /// Seeding probability must lie in [0, 1].
    #[error("alive probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}
