//! A single fixed-cycle signal.

use std::fmt;

use jg_core::{ConfigError, ConfigResult, LightId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Green,
    Red,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Green => "green",
            Phase::Red   => "red",
        }
    }

    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Phase::Red)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signal at a fixed road position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficLight {
    pub id:               LightId,
    /// km from the entry point.
    pub position:         f64,
    pub cycle_duration:   f64,
    pub green_duration:   f64,
    pub phase:            Phase,
    /// Tick-boundary time at which `phase` was last entered.
    pub phase_start_time: f64,
}

impl TrafficLight {
    /// A light that starts green at t = 0.
    ///
    /// # Errors
    ///
    /// `green_duration >= cycle_duration` is rejected rather than clamped.
    pub fn new(id: LightId, position: f64, cycle_duration: f64, green_duration: f64) -> ConfigResult<Self> {
        if !(cycle_duration.is_finite() && cycle_duration > 0.0) {
            return Err(ConfigError::NonPositive { what: "cycle duration", value: cycle_duration });
        }
        if !(green_duration.is_finite() && green_duration > 0.0) {
            return Err(ConfigError::NonPositive { what: "green duration", value: green_duration });
        }
        if green_duration >= cycle_duration {
            return Err(ConfigError::GreenNotShorterThanCycle {
                green: green_duration,
                cycle: cycle_duration,
            });
        }
        Ok(Self {
            id,
            position,
            cycle_duration,
            green_duration,
            phase: Phase::Green,
            phase_start_time: 0.0,
        })
    }

    #[inline]
    pub fn red_duration(&self) -> f64 {
        self.cycle_duration - self.green_duration
    }

    /// Phase at simulated time `t`.
    #[inline]
    pub fn phase_at(&self, t: f64) -> Phase {
        if t.rem_euclid(self.cycle_duration) < self.green_duration {
            Phase::Green
        } else {
            Phase::Red
        }
    }

    /// Recompute the phase for tick time `now`.  Returns `true` on a
    /// transition.
    pub fn update(&mut self, now: f64) -> bool {
        let phase = self.phase_at(now);
        if phase == self.phase {
            return false;
        }
        self.phase = phase;
        self.phase_start_time = now;
        true
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.phase.is_red()
    }
}
