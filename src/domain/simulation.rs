use super::{rules, Cell, Evaluation, GenerationAdvanced, Grid, Pattern};
use crate::error::ConfigError;
use rand::Rng;
use rayon::prelude::*;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, trace};

/// Simulation owns the grid and drives generation advances.
///
/// Two buffers of identical size are kept: `current` is what queries see,
/// `next` is scratch space. An advance reads only `current` and writes only
/// `next`, then swaps them, so every cell of a generation is computed from
/// the same snapshot.
pub struct Simulation {
    current: Grid,
    next: Grid,
    generation: u64,
    live_cells: usize,
    evaluation: Evaluation,
    subscribers: Vec<Sender<GenerationAdvanced>>,
}

impl Simulation {
    /// Create an empty simulation of the given size
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let current = Grid::new(width, height)?;
        Ok(Self {
            next: current.clone(),
            current,
            generation: 0,
            live_cells: 0,
            evaluation: Evaluation::default(),
            subscribers: Vec::new(),
        })
    }

    /// Set the evaluation strategy (builder pattern)
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = evaluation;
    }

    pub const fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Grid dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        self.current.dimensions()
    }

    /// State of one cell; off-grid reads as dead
    pub fn get(&self, row: isize, col: isize) -> Cell {
        self.current.get(row, col)
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn live_cells(&self) -> usize {
        self.live_cells
    }

    /// Read-only view of the current generation
    pub const fn grid(&self) -> &Grid {
        &self.current
    }

    /// Register for a notification after every committed advance.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<GenerationAdvanced> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Compute the next generation and commit it
    pub fn advance(&mut self) -> GenerationAdvanced {
        let current = &self.current;
        let live_cells: usize = match self.evaluation {
            Evaluation::Serial => self
                .next
                .rows_mut()
                .enumerate()
                .map(|(row, cells)| evaluate_row(current, row, cells))
                .sum(),
            Evaluation::Parallel => self
                .next
                .par_rows_mut()
                .enumerate()
                .map(|(row, cells)| evaluate_row(current, row, cells))
                .sum(),
        };

        let changes = self.current.diff(&self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        self.live_cells = live_cells;
        debug_assert_eq!(self.live_cells, self.current.live_count());

        trace!(
            generation = self.generation,
            live_cells = self.live_cells,
            changed = changes.len(),
            "generation advanced"
        );

        let event = GenerationAdvanced {
            generation: self.generation,
            live_cells: self.live_cells,
            changes,
        };
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        event
    }

    /// Single manual advance, independent of run state
    pub fn step(&mut self) -> GenerationAdvanced {
        self.advance()
    }

    /// Reseed every cell from the thread-local RNG
    pub fn seed_random(&mut self, alive_probability: f64) {
        self.seed_random_with(&mut rand::rng(), alive_probability);
    }

    /// Reseed every cell with an independent coin flip from `rng`.
    /// The probability is clamped into `[0, 1]`; NaN seeds nothing.
    pub fn seed_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R, alive_probability: f64) {
        let p = if alive_probability.is_nan() { 0.0 } else { alive_probability.clamp(0.0, 1.0) };
        self.current.fill(|_, _| Cell::from(rng.random_bool(p)));
        self.generation = 0;
        self.live_cells = self.current.live_count();
        info!(probability = p, live_cells = self.live_cells, "seeded grid");
    }

    /// Kill every cell and reset the counters
    pub fn clear(&mut self) {
        self.current.fill(|_, _| Cell::Dead);
        self.generation = 0;
        self.live_cells = 0;
        info!("cleared grid");
    }

    /// Flip one cell, bypassing the rule. Returns the new state, or `None`
    /// when the coordinates are off-grid.
    pub fn toggle(&mut self, row: isize, col: isize) -> Option<Cell> {
        let flipped = self.current.get(row, col).toggle();
        self.set_cell(row, col, flipped)?;
        debug!(row, col, state = flipped.state(), "toggled cell");
        Some(flipped)
    }

    /// Overwrite one cell, keeping the live count exact. Returns the
    /// previous state, or `None` when off-grid.
    pub fn set_cell(&mut self, row: isize, col: isize, cell: Cell) -> Option<Cell> {
        let previous = self.current.set(row, col, cell)?;
        match (previous.is_alive(), cell.is_alive()) {
            (false, true) => self.live_cells += 1,
            (true, false) => self.live_cells -= 1,
            _ => {}
        }
        Some(previous)
    }

    /// Stamp a pattern with its top-left corner at `(row, col)`.
    /// Cells landing off-grid are dropped.
    pub fn place(&mut self, pattern: &Pattern, row: isize, col: isize) {
        for (r, c) in pattern.cells_at(row, col) {
            self.set_cell(r, c, Cell::Alive);
        }
        debug!(pattern = pattern.name, row, col, "placed pattern");
    }
}

/// Fill one scratch row from the current grid; returns its live count
fn evaluate_row(current: &Grid, row: usize, out: &mut [Cell]) -> usize {
    out.iter_mut()
        .enumerate()
        .map(|(col, slot)| {
            *slot = rules::next_state(current, row as isize, col as isize);
            slot.state() as usize
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::{rngs::StdRng, SeedableRng};

    fn simulation_with(width: usize, height: usize, alive: &[(isize, isize)]) -> Simulation {
        let mut sim = Simulation::new(width, height).unwrap();
        for &(row, col) in alive {
            sim.set_cell(row, col, Cell::Alive);
        }
        sim
    }

    fn alive_cells(sim: &Simulation) -> Vec<(usize, usize)> {
        sim.grid()
            .iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    fn assert_count_consistent(sim: &Simulation) {
        assert_eq!(sim.live_cells(), sim.grid().live_count());
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(Simulation::new(0, 10).is_err());
        assert!(Simulation::new(10, 0).is_err());
    }

    #[test]
    fn test_block_is_still_life() {
        let mut sim = simulation_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let before = sim.grid().clone();

        let event = sim.advance();

        assert_eq!(sim.grid(), &before);
        assert_eq!(event.generation, 1);
        assert_eq!(event.live_cells, 4);
        assert!(event.changes.is_empty());
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut sim = simulation_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);

        sim.advance();
        assert_eq!(alive_cells(&sim), vec![(1, 2), (2, 2), (3, 2)]);

        sim.advance();
        assert_eq!(alive_cells(&sim), vec![(2, 1), (2, 2), (2, 3)]);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut sim = simulation_with(3, 3, &[(1, 1)]);
        sim.advance();
        assert_eq!(sim.get(1, 1), Cell::Dead);
        assert_eq!(sim.live_cells(), 0);
    }

    #[test]
    fn test_update_is_synchronous() {
        // Updating in place would let (2, 1) see (1, 2) born earlier in the
        // same generation and survive with two neighbors.
        let mut sim = simulation_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        sim.advance();
        assert_eq!(sim.get(2, 1), Cell::Dead);
        assert_eq!(sim.get(2, 3), Cell::Dead);
    }

    #[test]
    fn test_blinker_at_edge_uses_bounded_plane() {
        // Vertical blinker on the left edge: the horizontal phase loses the
        // off-grid cell, so it decays instead of oscillating.
        let mut sim = simulation_with(5, 5, &[(1, 0), (2, 0), (3, 0)]);
        sim.advance();
        assert_eq!(alive_cells(&sim), vec![(2, 0), (2, 1)]);
        sim.advance();
        assert!(alive_cells(&sim).is_empty());
    }

    #[test]
    fn test_delta_matches_snapshots() {
        let mut sim = Simulation::new(12, 9).unwrap();
        sim.place(&presets::glider(), 1, 1);

        for _ in 0..6 {
            let before = sim.grid().clone();
            let event = sim.advance();
            assert_eq!(event.changes, before.diff(sim.grid()));
            for change in &event.changes {
                assert_eq!(sim.get(change.row as isize, change.col as isize), change.state);
            }
        }
    }

    #[test]
    fn test_glider_translates_diagonally() {
        let mut sim = Simulation::new(12, 12).unwrap();
        sim.place(&presets::glider(), 1, 1);
        let start = alive_cells(&sim);

        for _ in 0..4 {
            sim.advance();
        }

        let shifted: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(alive_cells(&sim), shifted);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut serial = Simulation::new(64, 48).unwrap();
        serial.seed_random_with(&mut rng, 0.35);
        let mut parallel = Simulation::new(64, 48).unwrap().with_evaluation(Evaluation::Parallel);
        for (row, col, cell) in serial.grid().iter_cells() {
            parallel.set_cell(row as isize, col as isize, cell);
        }

        for _ in 0..20 {
            assert_eq!(serial.advance(), parallel.advance());
            assert_eq!(serial.grid(), parallel.grid());
        }
    }

    #[test]
    fn test_live_count_consistent_across_operations() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sim = Simulation::new(20, 15).unwrap();

        sim.seed_random_with(&mut rng, 0.4);
        assert_count_consistent(&sim);

        for i in 0..50 {
            match rng.random_range(0..4) {
                0 => {
                    sim.advance();
                }
                1 => {
                    let row = rng.random_range(-2i64..17) as isize;
                    let col = rng.random_range(-2i64..22) as isize;
                    sim.toggle(row, col);
                    sim.toggle(row, col);
                    sim.toggle(row, col);
                }
                2 => sim.seed_random_with(&mut rng, 0.25),
                _ if i % 7 == 0 => sim.clear(),
                _ => {
                    let row = rng.random_range(-3i64..16) as isize;
                    let col = rng.random_range(-3i64..21) as isize;
                    sim.place(&presets::r_pentomino(), row, col);
                }
            }
            assert_count_consistent(&sim);
        }
    }

    #[test]
    fn test_seed_resets_generation_without_advancing() {
        let mut sim = simulation_with(8, 8, &[(1, 1), (1, 2), (1, 3)]);
        sim.advance();
        sim.advance();

        sim.seed_random_with(&mut StdRng::seed_from_u64(1), 0.5);

        assert_eq!(sim.generation(), 0);
        assert_count_consistent(&sim);
    }

    #[test]
    fn test_seed_probability_extremes() {
        let mut sim = Simulation::new(10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        sim.seed_random_with(&mut rng, 1.0);
        assert_eq!(sim.live_cells(), 100);

        sim.seed_random_with(&mut rng, 0.0);
        assert_eq!(sim.live_cells(), 0);

        sim.seed_random_with(&mut rng, 7.5);
        assert_eq!(sim.live_cells(), 100);

        sim.seed_random_with(&mut rng, f64::NAN);
        assert_eq!(sim.live_cells(), 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut sim = Simulation::new(10, 10).unwrap();
        sim.seed_random_with(&mut StdRng::seed_from_u64(9), 0.5);
        sim.advance();

        sim.clear();
        let once = sim.grid().clone();
        sim.clear();

        assert_eq!(sim.grid(), &once);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.live_cells(), 0);
        assert_eq!(sim.grid().live_count(), 0);
    }

    #[test]
    fn test_toggle_updates_count_not_generation() {
        let mut sim = Simulation::new(4, 4).unwrap();
        sim.advance();

        assert_eq!(sim.toggle(1, 2), Some(Cell::Alive));
        assert_eq!(sim.live_cells(), 1);
        assert_eq!(sim.toggle(1, 2), Some(Cell::Dead));
        assert_eq!(sim.live_cells(), 0);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let mut sim = simulation_with(4, 4, &[(0, 0)]);
        let before = sim.grid().clone();

        assert_eq!(sim.toggle(-1, 0), None);
        assert_eq!(sim.toggle(0, 4), None);
        assert_eq!(sim.toggle(4, 0), None);

        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.live_cells(), 1);
    }

    #[test]
    fn test_toggle_while_paused_affects_next_advance() {
        let mut sim = simulation_with(5, 5, &[(2, 1), (2, 2)]);
        sim.toggle(2, 3);
        sim.advance();
        assert_eq!(alive_cells(&sim), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_place_clips_at_edges() {
        let mut sim = Simulation::new(5, 5).unwrap();
        sim.place(&presets::block(), 4, 4);
        assert_eq!(alive_cells(&sim), vec![(4, 4)]);
        assert_eq!(sim.live_cells(), 1);

        // Stamping over existing cells does not double count
        sim.place(&presets::block(), 3, 3);
        assert_eq!(sim.live_cells(), 4);
    }

    #[test]
    fn test_subscribers_receive_every_advance() {
        let mut sim = simulation_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let rx = sim.subscribe();

        sim.step();
        sim.advance();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].generation, 1);
        assert_eq!(events[1].generation, 2);
        assert_eq!(events[1].live_cells, 3);
        assert_eq!(events[0].changes.len(), 4);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut sim = Simulation::new(3, 3).unwrap();
        let rx = sim.subscribe();
        let kept = sim.subscribe();
        drop(rx);

        sim.advance();

        assert_eq!(sim.subscribers.len(), 1);
        assert_eq!(kept.try_iter().count(), 1);
    }
}
