//! Scripted clock for deterministic tests.

use std::cell::Cell;

use crate::{CLOCK_FAILED, Clock};

/// A clock whose readings are set by hand.
///
/// Every reading returns the current value and then advances it by the
/// configured step, so a start sample followed by an end sample measures
/// exactly one step.
#[derive(Debug, Default)]
pub struct ManualClock {
    wall: Cell<f64>,
    cpu: Cell<f64>,
    wall_step: f64,
    cpu_step: f64,
}

impl ManualClock {
    /// A clock frozen at the given readings.
    #[must_use]
    pub fn new(wall: f64, cpu: f64) -> Self {
        Self::stepping(wall, cpu, 0.0, 0.0)
    }

    /// A clock that advances by `wall_step`/`cpu_step` after every reading.
    #[must_use]
    pub fn stepping(wall: f64, cpu: f64, wall_step: f64, cpu_step: f64) -> Self {
        Self {
            wall: Cell::new(wall),
            cpu: Cell::new(cpu),
            wall_step,
            cpu_step,
        }
    }

    /// A clock whose every reading is [`CLOCK_FAILED`].
    #[must_use]
    pub fn failed() -> Self {
        Self::new(CLOCK_FAILED, CLOCK_FAILED)
    }

    /// Overwrite both readings.
    pub fn set(&self, wall: f64, cpu: f64) {
        self.wall.set(wall);
        self.cpu.set(cpu);
    }

    /// Move both readings forward.
    pub fn advance(&self, wall: f64, cpu: f64) {
        self.wall.set(self.wall.get() + wall);
        self.cpu.set(self.cpu.get() + cpu);
    }
}

impl Clock for ManualClock {
    fn wall_seconds(&self) -> f64 {
        let now = self.wall.get();
        self.wall.set(now + self.wall_step);
        now
    }

    fn cpu_seconds(&self) -> f64 {
        let now = self.cpu.get();
        self.cpu.set(now + self.cpu_step);
        now
    }
}
