//! `TrafficLightController`: owns every light of the segment.

use jg_core::constants::DEFAULT_GREEN_RATIO;
use jg_core::{ConfigResult, LaneConfiguration, LightId, SimulationParameters};

use crate::{Phase, TrafficLight};

/// Cycle length for `green_duration` at the default green ratio.
pub fn calculate_optimal_cycle(green_duration: f64) -> f64 {
    calculate_optimal_cycle_with_ratio(green_duration, DEFAULT_GREEN_RATIO)
}

/// Cycle length such that `green_duration / cycle == green_ratio`.
///
/// Never shorter than `green_duration`; a ratio outside (0, 1) degrades to a
/// cycle equal to the green time, which `TrafficLight::new` then rejects.
pub fn calculate_optimal_cycle_with_ratio(green_duration: f64, green_ratio: f64) -> f64 {
    if green_ratio > 0.0 && green_ratio < 1.0 {
        (green_duration / green_ratio).max(green_duration)
    } else {
        green_duration
    }
}

/// All signals of the road, sorted by position.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficLightController {
    lights:      Vec<TrafficLight>,
    green_ratio: f64,
}

impl TrafficLightController {
    /// Build one light per configured position.
    ///
    /// Timing resolution, in order of precedence:
    ///
    /// | Cycle given | Green given | Result                                  |
    /// |-------------|-------------|-----------------------------------------|
    /// | yes         | yes         | used as is (green must be < cycle)      |
    /// | yes         | no          | green = cycle · ratio                   |
    /// | no          | yes         | cycle = `calculate_optimal_cycle`       |
    /// | no          | no          | parameter cycle, green = cycle · ratio  |
    pub fn from_config(config: &LaneConfiguration, params: &SimulationParameters) -> ConfigResult<Self> {
        let ratio = config.green_ratio;
        let (cycle, green) = match (config.signal.cycle_duration, config.signal.green_duration) {
            (Some(cycle), Some(green)) => (cycle, green),
            (Some(cycle), None)        => (cycle, cycle * ratio),
            (None, Some(green))        => (calculate_optimal_cycle_with_ratio(green, ratio), green),
            (None, None)               => (params.traffic_light_cycle, params.traffic_light_cycle * ratio),
        };

        let lights = config
            .light_positions
            .iter()
            .enumerate()
            .map(|(i, &position)| TrafficLight::new(LightId(i as u16), position, cycle, green))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self { lights, green_ratio: ratio })
    }

    /// Recompute every light for tick time `now`.  Returns the number of
    /// phase transitions.
    pub fn update(&mut self, now: f64) -> usize {
        self.lights.iter_mut().map(|l| l.update(now)).filter(|&changed| changed).count()
    }

    #[inline]
    pub fn lights(&self) -> &[TrafficLight] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.lights.iter().map(|l| l.phase).collect()
    }

    /// Nearest red light at or ahead of `position` within `range` km.
    pub fn nearest_red_ahead(&self, position: f64, range: f64) -> Option<&TrafficLight> {
        self.lights
            .iter()
            .filter(|l| l.is_red() && l.position >= position && l.position - position <= range)
            .min_by(|a, b| a.position.total_cmp(&b.position))
    }

    /// First red light at or ahead of `position`, at any distance.
    pub fn first_red_at_or_ahead(&self, position: f64) -> Option<&TrafficLight> {
        self.lights.iter().find(|l| l.is_red() && l.position >= position)
    }

    /// Cycle shared by all lights, if any exist.
    pub fn cycle_duration(&self) -> Option<f64> {
        self.lights.first().map(|l| l.cycle_duration)
    }

    pub fn green_ratio(&self) -> f64 {
        self.green_ratio
    }
}
