//! Configuration error type.
//!
//! Every way a run can be mis-specified is reported here at construction
//! time; a run that passed validation cannot fail afterwards.  Numeric
//! degeneracy (zero road length, zero time step, …) is a configuration error
//! too.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one regular lane is required (got {0})")]
    NoRegularLanes(u16),

    #[error("a road with only a dedicated lane needs privileged_percentage = 1 (got {0})")]
    RegularTrafficWithoutLane(f64),

    #[error("green duration {green}s must be shorter than cycle duration {cycle}s")]
    GreenNotShorterThanCycle { green: f64, cycle: f64 },

    #[error("green ratio must lie in (0, 1) (got {0})")]
    GreenRatio(f64),

    #[error("traffic light at km {position} lies outside the road [0, {road_length}]")]
    LightOutsideRoad { position: f64, road_length: f64 },

    #[error("side road at km {position} must lie strictly inside the road (0, {road_length})")]
    SideRoadOutsideRoad { position: f64, road_length: f64 },

    #[error("{what} must be finite and positive (got {value})")]
    NonPositive { what: &'static str, value: f64 },

    #[error("{what} must be a probability in [0, 1] (got {value})")]
    Probability { what: &'static str, value: f64 },

    #[error("{what} range is inverted or invalid: ({low}, {high})")]
    Range { what: &'static str, low: f64, high: f64 },
}

/// Shorthand result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reject non-finite or non-positive numbers.
pub(crate) fn positive(what: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}

pub(crate) fn probability(what: &'static str, value: f64) -> ConfigResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Probability { what, value })
    }
}
