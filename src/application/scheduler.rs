use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{GenerationAdvanced, Simulation};
use crate::error::ConfigError;

/// Whether the scheduler is issuing autonomous advances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Handle to the next autonomous advance. Each scheduled advance gets a
/// fresh ticket so a cancelled one can never be mistaken for its successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub ticket: u64,
    /// Scheduler clock reading at which the advance fires
    pub due: Duration,
}

/// Run controller driving the simulation at a fixed cadence.
///
/// The scheduler owns no thread and no timer: the caller feeds it elapsed
/// time through [`Scheduler::tick`] from its frame loop. At most one advance
/// fires per tick and the next one is only scheduled after it completes.
#[derive(Debug)]
pub struct Scheduler {
    state: RunState,
    interval: Duration,
    clock: Duration,
    pending: Option<ScheduledAdvance>,
    next_ticket: u64,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            state: RunState::Idle,
            interval,
            clock: Duration::ZERO,
            pending: None,
            next_ticket: 0,
        })
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running)
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the cadence; applies from the next reschedule
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        self.interval = interval;
        Ok(())
    }

    /// The advance waiting to fire, if running
    pub const fn pending(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    /// Idle -> Running: advance once now, then every `interval`.
    /// Returns `false` without doing anything if already running.
    pub fn start(&mut self, sim: &mut Simulation) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        info!(interval_ms = self.interval.as_millis() as u64, "simulation running");
        sim.advance();
        self.schedule();
        true
    }

    /// Running -> Idle, cancelling the pending advance.
    /// Returns `false` without doing anything if already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Idle;
        if let Some(cancelled) = self.pending.take() {
            debug!(ticket = cancelled.ticket, "cancelled scheduled advance");
        }
        info!("simulation stopped");
        true
    }

    /// Flip between idle and running
    pub fn toggle_run(&mut self, sim: &mut Simulation) {
        if self.is_running() {
            self.stop();
        } else {
            self.start(sim);
        }
    }

    /// Let `elapsed` pass on the scheduler clock and fire the pending
    /// advance if it has come due.
    pub fn tick(&mut self, sim: &mut Simulation, elapsed: Duration) -> Option<GenerationAdvanced> {
        self.clock = self.clock.saturating_add(elapsed);
        let due = self.pending.filter(|pending| pending.due <= self.clock)?;
        debug_assert!(self.is_running());

        self.pending = None;
        debug!(ticket = due.ticket, "firing scheduled advance");
        let event = sim.advance();
        self.schedule();
        Some(event)
    }

    fn schedule(&mut self) {
        self.pending = Some(ScheduledAdvance {
            ticket: self.next_ticket,
            due: self.clock.saturating_add(self.interval),
        });
        self.next_ticket += 1;
    }
}
