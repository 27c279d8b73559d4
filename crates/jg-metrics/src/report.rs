//! Terminal statistics of one run.

use jg_core::{Lane, VehicleClass};

use crate::efficiency::{ClassStats, bus_lane_efficiency};
use crate::utilization::LaneUtilization;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryReport {
    /// Exited plus turned.
    pub completed_vehicles:   u64,
    pub exited_vehicles:      u64,
    pub turned_vehicles:      u64,

    /// Seconds, over completed vehicles.
    pub average_travel_time:  f64,
    /// km/h, mean of per-trip average speeds.
    pub average_speed:        f64,
    pub average_waiting_time: f64,

    /// km, mean over steps.
    pub average_jam_length:   f64,
    pub max_jam_length:       f64,
    pub max_queue_length:     usize,

    /// Percent; `None` without a dedicated lane or without trips to compare.
    pub bus_lane_efficiency:  Option<f64>,
    /// One row per lane, then the summary row.
    pub lane_utilization:     Vec<LaneUtilization>,

    pub regular:              ClassStats,
    pub privileged:           ClassStats,

    pub total_generated:      u64,
    pub still_active:         u64,
    pub still_queued:         u64,
    /// completed / generated; 0 if nothing was generated.
    pub completion_rate:      f64,

    pub has_dedicated_lane:   bool,
    /// Seconds at the last step.
    pub simulated_time:       f64,
    pub steps:                u64,
}

impl SummaryReport {
    pub fn class(&self, class: VehicleClass) -> &ClassStats {
        match class {
            VehicleClass::Regular    => &self.regular,
            VehicleClass::Privileged => &self.privileged,
        }
    }

    /// Bus-lane efficiency of this run's privileged trips against the
    /// privileged trips of a `baseline` run without the dedicated lane.
    pub fn efficiency_against(&self, baseline: &SummaryReport) -> Option<f64> {
        if !self.has_dedicated_lane {
            return None;
        }
        bus_lane_efficiency(&self.privileged, &baseline.privileged)
    }

    pub fn lane(&self, lane: Lane) -> Option<&LaneUtilization> {
        self.lane_utilization.iter().find(|r| r.lane == Some(lane))
    }

    pub fn summary_row(&self) -> Option<&LaneUtilization> {
        self.lane_utilization.iter().find(|r| r.is_summary())
    }

    /// Every generated vehicle is completed, on the road, or queued.
    pub fn is_conserved(&self) -> bool {
        self.completed_vehicles + self.still_active + self.still_queued == self.total_generated
    }
}
