//! `MetricsCollector`: per-step observables and per-trip aggregates.

use jg_core::{Lane, LaneConfiguration, SimulationParameters, Tick, Vehicle, VehicleClass};
use jg_signal::Phase;

use crate::efficiency::{TripAccumulator, bus_lane_efficiency};
use crate::jam::jam_length;
use crate::report::SummaryReport;
use crate::utilization::{LaneCounters, lane_utilization};

// ── StepMetrics ───────────────────────────────────────────────────────────────

/// Observables of the road at the end of one step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepMetrics {
    pub tick:                     Tick,
    /// Simulated seconds.
    pub time:                     f64,
    pub active_vehicles:          usize,
    /// Mean speed of active vehicles, km/h; 0 on an empty road.
    pub average_speed:            f64,
    /// km, summed over lanes.
    pub jam_length:               f64,
    /// Backlog depth after admission.
    pub queued_vehicles:          usize,
    pub dedicated_lane_occupancy: usize,
    /// Vehicles admitted this step.
    pub entered:                  usize,
    /// Vehicles that exited or turned this step.
    pub completed:                usize,
    /// Phase of every light, in position order.
    pub light_phases:             Vec<Phase>,
}

impl StepMetrics {
    /// Measure `active` (post-kinematics) on a road of `road_length` km.
    #[allow(clippy::too_many_arguments)]
    pub fn measure(
        tick:         Tick,
        time:         f64,
        active:       &[Vehicle],
        road_length:  f64,
        queued:       usize,
        entered:      usize,
        completed:    usize,
        light_phases: Vec<Phase>,
    ) -> Self {
        let average_speed = if active.is_empty() {
            0.0
        } else {
            active.iter().map(|v| v.speed).sum::<f64>() / active.len() as f64
        };
        Self {
            tick,
            time,
            active_vehicles:          active.len(),
            average_speed,
            jam_length:               jam_length(active, road_length),
            queued_vehicles:          queued,
            dedicated_lane_occupancy: active.iter().filter(|v| v.lane == Lane::Dedicated).count(),
            entered,
            completed,
            light_phases,
        }
    }
}

// ── MetricsCollector ──────────────────────────────────────────────────────────

/// Accumulates everything the run summary needs.
///
/// The orchestrator calls [`record_entry`](Self::record_entry) on admission,
/// [`record_completion`](Self::record_completion) when a vehicle leaves, and
/// [`record_step`](Self::record_step) once per step.
#[derive(Clone, Debug)]
pub struct MetricsCollector {
    road_length: f64,
    history:     Vec<StepMetrics>,
    regular:     TripAccumulator,
    privileged:  TripAccumulator,
    lanes:       LaneCounters,
    exited:      u64,
    turned:      u64,
    jam_sum:     f64,
    jam_max:     f64,
    queue_max:   usize,
}

impl MetricsCollector {
    pub fn new(road_length: f64) -> Self {
        Self {
            road_length,
            history:    Vec::new(),
            regular:    TripAccumulator::default(),
            privileged: TripAccumulator::default(),
            lanes:      LaneCounters::default(),
            exited:     0,
            turned:     0,
            jam_sum:    0.0,
            jam_max:    0.0,
            queue_max:  0,
        }
    }

    pub fn record_entry(&mut self, v: &Vehicle) {
        self.lanes.record_entry(v.lane);
    }

    /// `v` must carry its final `travel_time` and `waiting_time`.
    pub fn record_completion(&mut self, v: &Vehicle, turned: bool) {
        self.lanes.record_completion(v.lane);
        if turned {
            self.turned += 1;
        } else {
            self.exited += 1;
        }
        match v.class {
            VehicleClass::Regular    => self.regular.add(v, self.road_length),
            VehicleClass::Privileged => self.privileged.add(v, self.road_length),
        }
    }

    pub fn record_step(&mut self, metrics: StepMetrics) -> &StepMetrics {
        self.jam_sum += metrics.jam_length;
        self.jam_max = self.jam_max.max(metrics.jam_length);
        self.queue_max = self.queue_max.max(metrics.queued_vehicles);
        self.history.push(metrics);
        &self.history[self.history.len() - 1]
    }

    /// Every recorded step, oldest first.
    #[inline]
    pub fn history(&self) -> &[StepMetrics] {
        &self.history
    }

    #[inline]
    pub fn lanes(&self) -> &LaneCounters {
        &self.lanes
    }

    pub fn completed(&self) -> u64 {
        self.exited + self.turned
    }

    /// Terminal statistics.  `still_active` and `still_queued` are the
    /// vehicles on the road and in the backlog at the horizon.
    pub fn summarize(
        &self,
        config:          &LaneConfiguration,
        params:          &SimulationParameters,
        total_generated: u64,
        still_active:    u64,
        still_queued:    u64,
    ) -> SummaryReport {
        let mut all = self.regular.clone();
        all.merge(&self.privileged);
        let all = all.stats();
        let regular = self.regular.stats();
        let privileged = self.privileged.stats();

        let steps = self.history.len() as u64;
        let bus_lane_efficiency = if config.has_dedicated_lane {
            bus_lane_efficiency(&privileged, &regular)
        } else {
            None
        };
        let completed = self.completed();

        SummaryReport {
            completed_vehicles:   completed,
            exited_vehicles:      self.exited,
            turned_vehicles:      self.turned,
            average_travel_time:  all.average_travel_time,
            average_speed:        all.average_speed,
            average_waiting_time: all.average_waiting_time,
            average_jam_length:   if steps > 0 { self.jam_sum / steps as f64 } else { 0.0 },
            max_jam_length:       self.jam_max,
            max_queue_length:     self.queue_max,
            bus_lane_efficiency,
            lane_utilization:     lane_utilization(config, params, &self.lanes),
            regular,
            privileged,
            total_generated,
            still_active,
            still_queued,
            completion_rate:      if total_generated > 0 {
                completed as f64 / total_generated as f64
            } else {
                0.0
            },
            has_dedicated_lane:   config.has_dedicated_lane,
            simulated_time:       self.history.last().map_or(0.0, |m| m.time),
            steps,
        }
    }
}
