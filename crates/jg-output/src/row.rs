//! Plain data row types written by output backends.

use jg_core::{Lane, VehicleClass};
use jg_metrics::{LaneUtilization, StepMetrics};
use jg_signal::{Phase, TrafficLight};
use jg_sim::{Action, LifecycleEvent, Sim};

/// One lifecycle event of one vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub vehicle_id:    u64,
    pub timestamp:     f64,
    pub action:        Action,
    pub class:         VehicleClass,
    /// [`Lane::code`]; `None` while queued.
    pub lane:          Option<i32>,
    pub position:      f64,
    pub speed:         f64,
    pub waiting_time:  f64,
    pub travel_time:   Option<f64>,
    pub turn_position: Option<f64>,
}

impl From<&LifecycleEvent> for EventRow {
    fn from(e: &LifecycleEvent) -> Self {
        Self {
            vehicle_id:    e.vehicle_id.0,
            timestamp:     e.timestamp,
            action:        e.action,
            class:         e.class,
            lane:          e.lane.map(Lane::code),
            position:      e.position,
            speed:         e.speed,
            waiting_time:  e.waiting_time,
            travel_time:   e.travel_time,
            turn_position: e.turn_position,
        }
    }
}

/// Observables of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeseriesRow {
    pub tick:               u64,
    pub timestamp:          f64,
    pub vehicles_in_motion: u64,
    pub average_speed:      f64,
    pub jam_length:         f64,
    pub bus_lane_occupancy: u64,
    pub vehicles_in_queue:  u64,
    pub entered:            u64,
    pub completed:          u64,
}

impl From<&StepMetrics> for TimeseriesRow {
    fn from(m: &StepMetrics) -> Self {
        Self {
            tick:               m.tick.0,
            timestamp:          m.time,
            vehicles_in_motion: m.active_vehicles as u64,
            average_speed:      m.average_speed,
            jam_length:         m.jam_length,
            bus_lane_occupancy: m.dedicated_lane_occupancy as u64,
            vehicles_in_queue:  m.queued_vehicles as u64,
            entered:            m.entered as u64,
            completed:          m.completed as u64,
        }
    }
}

/// Phase of one light at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightStateRow {
    pub timestamp: f64,
    pub light_id:  u16,
    pub position:  f64,
    pub phase:     Phase,
}

impl LightStateRow {
    pub fn of(light: &TrafficLight, timestamp: f64) -> Self {
        Self {
            timestamp,
            light_id: light.id.0,
            position: light.position,
            phase:    light.phase,
        }
    }
}

/// One row of the lane-utilization table.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneCapacityRow {
    /// `lane_0`, …, `bus_lane`, or `summary`.
    pub lane_id:                     String,
    pub lane_type:                   &'static str,
    pub vehicles_entered:            u64,
    pub vehicles_completed:          u64,
    pub actual_capacity_per_km:      f64,
    pub theoretical_capacity_per_km: f64,
    pub utilization_percent:         f64,
}

impl From<&LaneUtilization> for LaneCapacityRow {
    fn from(u: &LaneUtilization) -> Self {
        Self {
            lane_id:                     u.label(),
            lane_type:                   match u.lane {
                Some(Lane::Regular(_)) => "regular",
                Some(Lane::Dedicated)  => "dedicated",
                None                   => "summary",
            },
            vehicles_entered:            u.vehicles_entered,
            vehicles_completed:          u.vehicles_completed,
            actual_capacity_per_km:      u.capacity_per_km,
            theoretical_capacity_per_km: u.theoretical_capacity,
            utilization_percent:         u.utilization_percent,
        }
    }
}

/// The configuration a run was started with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRow {
    pub seed:                    u64,
    pub description:             String,
    pub num_regular_lanes:       u16,
    pub has_dedicated_lane:      bool,
    pub dedicated_lane_capacity: f64,
    pub light_positions:         Vec<f64>,
    pub green_ratio:             f64,
    /// `None` without lights.
    pub cycle_duration:          Option<f64>,
    pub road_length:             f64,
    pub simulation_duration:     f64,
    pub time_step:               f64,
    pub traffic_intensity_min:   f64,
    pub traffic_intensity_max:   f64,
    pub privileged_percentage:   f64,
    pub lane_capacity:           f64,
}

impl ConfigRow {
    pub fn of(sim: &Sim) -> Self {
        let config = sim.config();
        let params = sim.params();
        Self {
            seed:                    sim.seed(),
            description:             sim.describe(),
            num_regular_lanes:       config.num_regular_lanes,
            has_dedicated_lane:      config.has_dedicated_lane,
            dedicated_lane_capacity: config.dedicated_lane_capacity,
            light_positions:         sim.lights().lights().iter().map(|l| l.position).collect(),
            green_ratio:             sim.lights().green_ratio(),
            cycle_duration:          sim.lights().cycle_duration(),
            road_length:             params.road_length,
            simulation_duration:     params.simulation_duration,
            time_step:               params.time_step,
            traffic_intensity_min:   params.traffic_intensity_range.0,
            traffic_intensity_max:   params.traffic_intensity_range.1,
            privileged_percentage:   params.privileged_percentage,
            lane_capacity:           params.lane_capacity,
        }
    }
}
