//! Fixed-rate tick pacing
//!
//! Converts wall-clock time into a whole number of simulation ticks. Leftover
//! time carries over to the next frame.

/// Accumulator that decides how many ticks to run per frame
#[derive(Debug, Clone)]
pub struct SimulationClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl SimulationClock {
    pub fn new(tick_rate: u32, max_substeps: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate.max(1) as f32,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn tick_duration(&self) -> f32 {
        self.dt
    }

    /// Add `elapsed` seconds and return how many ticks are due.
    ///
    /// At most `max_substeps` ticks are returned; a backlog beyond that is
    /// dropped so a long stall can't snowball into ever longer frames.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.dt {
            log::warn!(
                "Simulation fell behind, dropping {:.3}s",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Forget any accumulated time (e.g. after a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
