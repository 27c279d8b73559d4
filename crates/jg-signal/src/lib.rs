//! `jg-signal`: traffic light state machines.
//!
//! Each light cycles `Green ⇄ Red` independently.  Its phase is a pure
//! function of simulated time:
//!
//! ```text
//! phase(t) = Green  if t mod cycle < green
//!            Red    otherwise
//! ```
//!
//! The controller re-evaluates every light once per tick; `phase_start_time`
//! only ever moves at tick boundaries.
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`light`]      | `TrafficLight`, `Phase`                               |
//! | [`controller`] | `TrafficLightController`, `calculate_optimal_cycle`   |

pub mod controller;
pub mod light;

#[cfg(test)]
mod tests;

pub use controller::{TrafficLightController, calculate_optimal_cycle, calculate_optimal_cycle_with_ratio};
pub use light::{Phase, TrafficLight};
