use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::Scheduler;
use crate::config::LifeConfig;
use crate::domain::{Evaluation, Pattern, Simulation};
use crate::error::ConfigError;

/// GameState orchestrates the simulation.
/// This is the application layer that coordinates domain logic: it pairs
/// one simulation with its run controller and exposes the command set the
/// front-end binds to keys and buttons.
pub struct GameState {
    simulation: Simulation,
    scheduler: Scheduler,
    alive_probability: f64,
    pub last_advance_time_ms: f32, // Advance performance metric
    pub last_render_time_ms: f32,  // Render performance metric
}

impl GameState {
    /// Build from a validated config and seed the grid randomly
    pub fn new(config: &LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self {
            simulation: Simulation::new(config.width, config.height)?
                .with_evaluation(config.evaluation),
            scheduler: Scheduler::new(config.interval)?,
            alive_probability: config.alive_probability,
            last_advance_time_ms: 0.0,
            last_render_time_ms: 0.0,
        };
        state.simulation.seed_random(state.alive_probability);
        Ok(state)
    }

    /// Build from `config`, falling back to the default config when it is
    /// unusable
    pub fn new_or_default(config: &LifeConfig) -> Result<Self, ConfigError> {
        Self::new(config).or_else(|err| {
            warn!(%err, "invalid configuration, falling back to defaults");
            Self::new(&LifeConfig::default())
        })
    }

    /// Read-only access for rendering and queries
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Mutable access for subscribing and fine-grained edits
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub const fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Toggle run/stop
    pub fn toggle_run(mut self) -> Self {
        let start = Instant::now();
        let was_running = self.scheduler.is_running();
        self.scheduler.toggle_run(&mut self.simulation);
        if !was_running {
            self.record_advance_time(start);
        }
        self
    }

    /// Single advance, allowed while running or stopped
    pub fn step(mut self) -> Self {
        let start = Instant::now();
        self.simulation.step();
        self.record_advance_time(start);
        self
    }

    /// Clear grid and reset counters; run state is left alone
    pub fn clear(mut self) -> Self {
        self.simulation.clear();
        self
    }

    /// Reseed with the configured probability; run state is left alone
    pub fn seed_random(mut self) -> Self {
        self.simulation.seed_random(self.alive_probability);
        self
    }

    /// Flip one cell; off-grid coordinates are ignored
    pub fn toggle(&mut self, row: isize, col: isize) {
        self.simulation.toggle(row, col);
    }

    /// Stamp a pattern centred on `(row, col)`
    pub fn place_pattern(&mut self, pattern: &Pattern, row: isize, col: isize) {
        let top = row.saturating_sub((pattern.height / 2) as isize);
        let left = col.saturating_sub((pattern.width / 2) as isize);
        self.simulation.place(pattern, top, left);
    }

    /// Switch to the next evaluation strategy
    pub fn cycle_evaluation(mut self) -> Self {
        let all = Evaluation::all();
        let current = self.simulation.evaluation();
        let index = all.iter().position(|&e| e == current).unwrap_or(0);
        let next = all[(index + 1) % all.len()];
        self.simulation.set_evaluation(next);
        info!(evaluation = next.name(), "switched evaluation");
        self
    }

    /// Adjust speed in generations per second, clamped to 1..=60
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        let rate = (self.generations_per_second() + delta).clamp(1.0, 60.0);
        if let Err(err) = self.scheduler.set_interval(Duration::from_secs_f32(1.0 / rate)) {
            warn!(%err, rate, "ignoring speed change");
        }
        self
    }

    pub fn generations_per_second(&self) -> f32 {
        1.0 / self.scheduler.interval().as_secs_f32()
    }

    /// Feed frame time to the run controller
    pub fn tick(mut self, elapsed: Duration) -> Self {
        let start = Instant::now();
        if self.scheduler.tick(&mut self.simulation, elapsed).is_some() {
            self.record_advance_time(start);
        }
        self
    }

    fn record_advance_time(&mut self, start: Instant) {
        self.last_advance_time_ms = start.elapsed().as_secs_f32() * 1000.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{presets, Cell};

    fn state() -> GameState {
        GameState::new(&LifeConfig::new(10, 10).with_interval(Duration::from_millis(20)))
            .unwrap()
            .clear()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = LifeConfig::default().with_interval(Duration::ZERO);
        assert_eq!(GameState::new(&config).err(), Some(ConfigError::ZeroInterval));
        assert!(GameState::new(&LifeConfig::new(0, 3)).is_err());
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let config = LifeConfig::new(usize::MAX, 2).with_interval(Duration::ZERO);
        let state = GameState::new_or_default(&config).unwrap();
        assert_eq!(state.simulation().dimensions(), (40, 40));
        assert_eq!(state.scheduler().interval(), Duration::from_millis(100));

        let state = GameState::new_or_default(&LifeConfig::new(12, 8)).unwrap();
        assert_eq!(state.simulation().dimensions(), (12, 8));
    }

    #[test]
    fn test_new_seeds_grid() {
        let config = LifeConfig::new(30, 30).with_alive_probability(1.0);
        let state = GameState::new(&config).unwrap();
        assert_eq!(state.simulation().live_cells(), 900);
        assert_eq!(state.simulation().generation(), 0);
        assert!(!state.is_running());
    }

    #[test]
    fn test_clear_and_seed_keep_run_state() {
        let state = state().toggle_run();
        assert!(state.is_running());

        let state = state.clear();
        assert!(state.is_running());
        assert_eq!(state.simulation().generation(), 0);

        let state = state.seed_random();
        assert!(state.is_running());
        assert_eq!(state.simulation().generation(), 0);
    }

    #[test]
    fn test_step_does_not_change_run_state() {
        let state = state().step();
        assert!(!state.is_running());
        assert_eq!(state.simulation().generation(), 1);
    }

    #[test]
    fn test_tick_drives_generations_while_running() {
        let mut state = state().toggle_run();
        assert_eq!(state.simulation().generation(), 1);

        state = state.tick(Duration::from_millis(20));
        state = state.tick(Duration::from_millis(20));
        assert_eq!(state.simulation().generation(), 3);

        state = state.toggle_run().tick(Duration::from_millis(100));
        assert_eq!(state.simulation().generation(), 3);
    }

    #[test]
    fn test_scheduled_advance_notifies_subscriber() {
        let mut state = state();
        let events = state.simulation_mut().subscribe();
        state.place_pattern(&presets::blinker(), 5, 5);
        state = state.toggle_run().tick(Duration::from_millis(20));

        let received: Vec<_> = events.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[1].generation, 2);
        assert_eq!(received[1].live_cells, 3);
        assert!(state.last_advance_time_ms >= 0.0);
    }

    #[test]
    fn test_place_pattern_at_extreme_coordinates_is_ignored() {
        let mut state = state();
        state.place_pattern(&presets::pulsar(), isize::MIN, isize::MIN);
        state.place_pattern(&presets::pulsar(), isize::MAX, 0);
        assert_eq!(state.simulation().live_cells(), 0);
    }

    #[test]
    fn test_cycle_evaluation_wraps() {
        let state = state();
        assert_eq!(state.simulation().evaluation(), Evaluation::Serial);

        let state = state.cycle_evaluation();
        assert_eq!(state.simulation().evaluation(), Evaluation::Parallel);

        let state = state.cycle_evaluation();
        assert_eq!(state.simulation().evaluation(), Evaluation::Serial);
    }

    #[test]
    fn test_place_pattern_centres_on_point() {
        let mut state = state();
        state.place_pattern(&presets::blinker(), 5, 5);
        let sim = state.simulation();
        assert_eq!(sim.get(5, 4), Cell::Alive);
        assert_eq!(sim.get(5, 5), Cell::Alive);
        assert_eq!(sim.get(5, 6), Cell::Alive);
        assert_eq!(sim.live_cells(), 3);
    }

    #[test]
    fn test_toggle_ignores_off_grid() {
        let mut state = state();
        state.toggle(-3, 2);
        state.toggle(2, 10);
        assert_eq!(state.simulation().live_cells(), 0);
        state.toggle(2, 2);
        assert_eq!(state.simulation().get(2, 2), Cell::Alive);
    }

    #[test]
    fn test_adjust_speed_clamps() {
        let state = state();
        assert!((state.generations_per_second() - 50.0).abs() < 0.01);

        let state = state.adjust_speed(100.0);
        assert!((state.generations_per_second() - 60.0).abs() < 0.01);

        let state = state.adjust_speed(-100.0);
        assert!((state.generations_per_second() - 1.0).abs() < 0.01);
    }
}
