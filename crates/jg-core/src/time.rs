//! Step counter and simulated clock.
//!
//! Simulated time is always derived from the step count,
//! `t = tick · time_step`, never accumulated by repeated addition.  For
//! integral steps the timestamps are exact, so signal phases computed as
//! `t mod cycle` never drift.

use std::fmt;

/// Number of completed steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, steps: u64) -> Tick {
        Tick(self.0 + steps)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fixed-step clock running from t = 0 to a horizon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds per step.
    pub time_step_secs: f64,
    pub current_tick:   Tick,
    /// The run stops once `current_tick` reaches this.
    pub end_tick:       Tick,
}

impl SimClock {
    /// A clock at t = 0 whose horizon is `ceil(duration / time_step)` steps,
    /// so a partial final step is still simulated.
    pub fn new(time_step_secs: f64, duration_secs: f64) -> Self {
        let steps = (duration_secs / time_step_secs).ceil().max(0.0) as u64;
        Self {
            time_step_secs,
            current_tick: Tick::ZERO,
            end_tick:     Tick(steps),
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Simulated seconds at the current tick.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.time_step_secs
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.current_tick >= self.end_tick
    }

    /// Steps left before the horizon.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.end_tick.0.saturating_sub(self.current_tick.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.now_secs();
        let minutes = (secs / 60.0).floor() as u64;
        write!(f, "{} ({:02}:{:04.1})", self.current_tick, minutes, secs - minutes as f64 * 60.0)
    }
}
