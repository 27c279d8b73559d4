//! Run configuration: infrastructure (`LaneConfiguration`) and traffic /
//! timing parameters (`SimulationParameters`).
//!
//! Both are validated once when a simulation is configured and are then
//! only ever borrowed immutably by the engine components.

use crate::constants::{DEFAULT_GREEN_RATIO, DEFAULT_SIDE_ROAD_POSITIONS};
use crate::error::{positive, probability};
use crate::{ConfigError, ConfigResult, Lane};

// ── SignalTiming ──────────────────────────────────────────────────────────────

/// Optional explicit signal timing.  Missing values are derived from the
/// green ratio (see `jg_signal::TrafficLightController::from_config`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalTiming {
    pub cycle_duration: Option<f64>,
    pub green_duration: Option<f64>,
}

// ── LaneConfiguration ─────────────────────────────────────────────────────────

/// Road infrastructure under test.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneConfiguration {
    pub num_regular_lanes:       u16,
    pub has_dedicated_lane:      bool,
    /// Vehicles per km; only meaningful with a dedicated lane.
    pub dedicated_lane_capacity: f64,
    /// Signal positions in km; sorted ascending on validation.
    pub light_positions:         Vec<f64>,
    /// Green share of each cycle, in (0, 1).
    pub green_ratio:             f64,
    pub signal:                  SignalTiming,
}

impl Default for LaneConfiguration {
    fn default() -> Self {
        Self {
            num_regular_lanes:       2,
            has_dedicated_lane:      false,
            dedicated_lane_capacity: 0.0,
            light_positions:         DEFAULT_SIDE_ROAD_POSITIONS.to_vec(),
            green_ratio:             DEFAULT_GREEN_RATIO,
            signal:                  SignalTiming::default(),
        }
    }
}

impl LaneConfiguration {
    /// Regular lanes only, no signals.
    pub fn regular(num_regular_lanes: u16) -> Self {
        Self {
            num_regular_lanes,
            light_positions: Vec::new(),
            ..Self::default()
        }
    }

    /// `num_regular_lanes` regular lanes plus a dedicated lane.
    pub fn with_dedicated(num_regular_lanes: u16, dedicated_lane_capacity: f64) -> Self {
        Self {
            num_regular_lanes,
            has_dedicated_lane: true,
            dedicated_lane_capacity,
            light_positions: Vec::new(),
            ..Self::default()
        }
    }

    pub fn lights(mut self, positions: Vec<f64>) -> Self {
        self.light_positions = positions;
        self
    }

    pub fn green_ratio(mut self, ratio: f64) -> Self {
        self.green_ratio = ratio;
        self
    }

    pub fn signal(mut self, signal: SignalTiming) -> Self {
        self.signal = signal;
        self
    }

    /// The matched no-dedicated-lane baseline: the dedicated lane becomes one
    /// more regular lane, everything else is unchanged.
    pub fn baseline(&self) -> Option<LaneConfiguration> {
        if !self.has_dedicated_lane {
            return None;
        }
        Some(Self {
            num_regular_lanes:       self.num_regular_lanes + 1,
            has_dedicated_lane:      false,
            dedicated_lane_capacity: 0.0,
            ..self.clone()
        })
    }

    /// All lanes, regular first, dedicated last.
    pub fn lanes(&self) -> impl Iterator<Item = Lane> + '_ {
        (0..self.num_regular_lanes)
            .map(Lane::Regular)
            .chain(self.has_dedicated_lane.then_some(Lane::Dedicated))
    }

    pub fn regular_lanes(&self) -> impl Iterator<Item = Lane> + '_ {
        (0..self.num_regular_lanes).map(Lane::Regular)
    }

    /// Number of lanes including the dedicated one.
    pub fn lane_count(&self) -> usize {
        self.num_regular_lanes as usize + usize::from(self.has_dedicated_lane)
    }

    /// Theoretical capacity of `lane` in vehicles per km.
    pub fn capacity_per_km(&self, lane: Lane, params: &SimulationParameters) -> f64 {
        match lane {
            Lane::Regular(_) => params.lane_capacity,
            Lane::Dedicated  => self.dedicated_lane_capacity,
        }
    }

    /// Check the infrastructure against `params` and normalise light order.
    pub fn validate(&mut self, params: &SimulationParameters) -> ConfigResult<()> {
        if self.num_regular_lanes == 0 {
            if !self.has_dedicated_lane {
                return Err(ConfigError::NoRegularLanes(0));
            }
            if params.privileged_percentage < 1.0 {
                return Err(ConfigError::RegularTrafficWithoutLane(params.privileged_percentage));
            }
        }
        if self.has_dedicated_lane {
            positive("dedicated lane capacity", self.dedicated_lane_capacity)?;
        }
        if !(self.green_ratio > 0.0 && self.green_ratio < 1.0) {
            return Err(ConfigError::GreenRatio(self.green_ratio));
        }
        for &position in &self.light_positions {
            if !(0.0..=params.road_length).contains(&position) {
                return Err(ConfigError::LightOutsideRoad {
                    position,
                    road_length: params.road_length,
                });
            }
        }
        self.light_positions.sort_by(f64::total_cmp);
        Ok(())
    }
}

// ── SimulationParameters ──────────────────────────────────────────────────────

/// Traffic demand, road geometry, and timing of one run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Vehicles per hour; the arrival process uses the range midpoint.
    pub traffic_intensity_range:  (f64, f64),
    /// Per-vehicle turning probability is drawn uniformly from this range.
    pub turning_percentage_range: (f64, f64),
    pub privileged_percentage:    f64,

    /// km.
    pub road_length:              f64,
    /// Theoretical capacity of a regular lane, vehicles per km.
    pub lane_capacity:            f64,
    /// Default signal cycle (s) when the lane configuration gives none.
    pub traffic_light_cycle:      f64,

    /// Horizon in simulated seconds.
    pub simulation_duration:      f64,
    /// Seconds per step.
    pub time_step:                f64,

    /// km positions where turning vehicles leave the road.
    pub side_road_positions:      Vec<f64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            traffic_intensity_range:  (500.0, 1500.0),
            turning_percentage_range: (0.05, 0.20),
            privileged_percentage:    0.05,
            road_length:              1.0,
            lane_capacity:            75.0,
            traffic_light_cycle:      67.5,
            simulation_duration:      3600.0,
            time_step:                1.0,
            side_road_positions:      DEFAULT_SIDE_ROAD_POSITIONS.to_vec(),
        }
    }
}

impl SimulationParameters {
    /// Mean arrival rate in vehicles per hour.
    pub fn mean_intensity(&self) -> f64 {
        (self.traffic_intensity_range.0 + self.traffic_intensity_range.1) / 2.0
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("road length", self.road_length)?;
        positive("time step", self.time_step)?;
        positive("simulation duration", self.simulation_duration)?;
        positive("lane capacity", self.lane_capacity)?;
        positive("traffic light cycle", self.traffic_light_cycle)?;
        probability("privileged percentage", self.privileged_percentage)?;

        let (lo, hi) = self.traffic_intensity_range;
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi) {
            return Err(ConfigError::Range { what: "traffic intensity", low: lo, high: hi });
        }
        let (lo, hi) = self.turning_percentage_range;
        probability("turning percentage", lo)?;
        probability("turning percentage", hi)?;
        if lo > hi {
            return Err(ConfigError::Range { what: "turning percentage", low: lo, high: hi });
        }

        for &position in &self.side_road_positions {
            if !(position > 0.0 && position < self.road_length) {
                return Err(ConfigError::SideRoadOutsideRoad {
                    position,
                    road_length: self.road_length,
                });
            }
        }
        Ok(())
    }
}
