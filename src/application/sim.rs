use std::sync::Arc;

use rand::Rng;

use super::Config;
use crate::domain::{Coord, EngineError, LiveSet, Pattern, StepMode, engine};

/// SimState orchestrates the simulation.
///
/// Two externally visible states: Idle (stepping only on explicit request)
/// and Running (the host scheduler drives [`SimState::tick`] at the
/// configured cadence). Between calls the only retained state is the current
/// live-set snapshot plus counters; each step is a complete, non-reentrant
/// unit of work, so pausing needs no cancellation.
pub struct SimState {
    cells: Arc<LiveSet>,
    pub running: bool,
    pub generation: u64,
    pub step_mode: StepMode,
    pub last_step_time_ms: f32,
    update_timer: f32,
}

impl SimState {
    /// Idle state over an empty plane.
    pub fn new() -> Self {
        Self {
            cells: Arc::new(LiveSet::new()),
            running: false,
            generation: 0,
            step_mode: StepMode::default(),
            last_step_time_ms: 0.0,
            update_timer: 0.0,
        }
    }

    /// Current live-set snapshot, shareable with any reader.
    pub fn snapshot(&self) -> Arc<LiveSet> {
        Arc::clone(&self.cells)
    }

    pub fn population(&self) -> usize {
        self.cells.population()
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Advance by elapsed frame time; steps once per configured interval
    /// while running.
    pub fn tick(&mut self, delta_time: f32, config: &Config) {
        if !self.running {
            return;
        }
        self.update_timer += delta_time;
        let interval = config.step_interval_ms as f32 / 1000.0;
        if self.update_timer >= interval {
            self.run_step();
            self.update_timer = 0.0;
        }
    }

    /// Advance exactly one generation; only honored while Idle, matching the
    /// scheduler contract.
    pub fn single_step(&mut self) {
        if !self.running {
            self.run_step();
        }
    }

    /// Flip the liveness of one cell.
    pub fn toggle_cell(&mut self, coord: Coord) {
        self.cells = Arc::new(engine::toggle(&self.cells, coord));
    }

    /// Stamp a pattern at the given origin, pausing for placement like any
    /// other editing operation.
    pub fn stamp(&mut self, pattern: &Pattern, origin: Coord) {
        self.cells = Arc::new(engine::stamp(&self.cells, pattern, origin));
    }

    /// Clear the plane and reset the generation counter.
    pub fn clear(&mut self) {
        self.cells = Arc::new(LiveSet::new());
        self.generation = 0;
        self.running = false;
    }

    /// Replace the plane with a random soup around `center`.
    ///
    /// On rejection the current set and counters are untouched.
    pub fn randomize(
        &mut self,
        center: Coord,
        rng: &mut impl Rng,
        config: &Config,
    ) -> Result<(), EngineError> {
        let next = engine::randomize(
            center,
            config.randomize_radius,
            config.randomize_density,
            rng,
        )?;
        self.cells = Arc::new(next);
        self.generation = 0;
        self.running = false;
        Ok(())
    }

    fn run_step(&mut self) {
        let start = std::time::Instant::now();
        self.cells = match self.step_mode {
            StepMode::Serial => engine::step(&self.cells),
            StepMode::Parallel => engine::step_parallel(&self.cells),
        };
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.generation += 1;
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}
