mod camera;
mod game_state;
mod scheduler;

pub use camera::Camera;
pub use game_state::GameState;
pub use scheduler::{RunState, ScheduledAdvance, Scheduler};
