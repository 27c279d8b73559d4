//! Per-vehicle speed and position update.
//!
//! The free speed is `BASE_VEHICLE_SPEED` scaled by the local density
//! factor.  The distance actually covered in a step is the smallest of:
//!
//! | Limit           | Distance                                                   |
//! |-----------------|------------------------------------------------------------|
//! | free flow       | `free · dt`                                                |
//! | car following   | `free · min(1, clearance / SAFE_FOLLOWING_DISTANCE) · dt`  |
//! | leader          | `clearance` to the leader's rear                           |
//! | red approach    | `free · (d / DETECTION_DISTANCE) · dt` within detection    |
//! | red stop line   | `d`, the distance to the first red light ahead             |
//!
//! The reported speed is the realized one: distance covered divided by `dt`.

use jg_core::constants::{
    BASE_VEHICLE_SPEED, DETECTION_DISTANCE, SAFE_FOLLOWING_DISTANCE, SECONDS_PER_HOUR,
};
use jg_core::{LaneConfiguration, SimulationParameters};
use jg_signal::TrafficLightController;

use crate::capacity::density_factor;
use crate::snapshot::RoadSnapshot;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Still on the road after this step.
    Moving,
    /// Reached its side road.
    Turned,
    /// Reached the end of the road.
    Exited,
}

/// New state for one vehicle, computed from the pre-step snapshot.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Movement {
    /// Index into the snapshot's vehicle slice.
    pub index:    usize,
    pub position: f64,
    /// km/h.
    pub speed:    f64,
    pub outcome:  Outcome,
}

pub struct KinematicsEngine<'a> {
    config:     &'a LaneConfiguration,
    params:     &'a SimulationParameters,
    lights:     &'a TrafficLightController,
    step_hours: f64,
}

impl<'a> KinematicsEngine<'a> {
    pub fn new(
        config: &'a LaneConfiguration,
        params: &'a SimulationParameters,
        lights: &'a TrafficLightController,
    ) -> Self {
        Self {
            config,
            params,
            lights,
            step_hours: params.time_step / SECONDS_PER_HOUR,
        }
    }

    /// Density-adjusted free speed of vehicle `i`, km/h.
    pub fn free_speed(&self, snapshot: &RoadSnapshot<'_>, i: usize) -> f64 {
        let lane = snapshot.vehicles()[i].lane;
        let ahead = snapshot.count_ahead_within(i, DETECTION_DISTANCE);
        BASE_VEHICLE_SPEED * density_factor(ahead, self.config.capacity_per_km(lane, self.params))
    }

    pub fn movement(&self, snapshot: &RoadSnapshot<'_>, i: usize) -> Movement {
        let v = &snapshot.vehicles()[i];
        let h = self.step_hours;
        let free = self.free_speed(snapshot, i);
        let mut advance = free * h;

        if let Some(leader) = snapshot.leader(i) {
            let clearance = (leader.position - v.position - leader.total_space()).max(0.0);
            let following = free * (clearance / SAFE_FOLLOWING_DISTANCE).min(1.0) * h;
            advance = advance.min(following).min(clearance);
        }

        if let Some(light) = self.lights.nearest_red_ahead(v.position, DETECTION_DISTANCE) {
            let d = light.position - v.position;
            advance = advance.min(free * (d / DETECTION_DISTANCE) * h).min(d);
        }
        // Stop line of any red light, however far: never cross on red.
        if let Some(light) = self.lights.first_red_at_or_ahead(v.position) {
            advance = advance.min(light.position - v.position);
        }

        let advance = advance.max(0.0);
        let position = v.position + advance;
        let outcome = match v.turn_position {
            Some(turn) if turn <= position          => Outcome::Turned,
            _ if position >= self.params.road_length => Outcome::Exited,
            _                                       => Outcome::Moving,
        };

        Movement { index: i, position, speed: advance / h, outcome }
    }

    /// Movements for every vehicle of the snapshot, in slice order.
    pub fn advance_all(&self, snapshot: &RoadSnapshot<'_>) -> Vec<Movement> {
        if snapshot.is_empty() {
            return Vec::new();
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..snapshot.len()).map(|i| self.movement(snapshot, i)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..snapshot.len())
                .into_par_iter()
                .map(|i| self.movement(snapshot, i))
                .collect()
        }
    }
}
