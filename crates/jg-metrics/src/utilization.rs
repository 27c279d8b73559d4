//! Per-lane utilization table.

use std::collections::BTreeMap;
use std::fmt;

use jg_core::{Lane, LaneConfiguration, SimulationParameters};

/// Entry and completion tallies per lane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaneCounters {
    entered:   BTreeMap<Lane, u64>,
    completed: BTreeMap<Lane, u64>,
}

impl LaneCounters {
    pub fn record_entry(&mut self, lane: Lane) {
        *self.entered.entry(lane).or_default() += 1;
    }

    pub fn record_completion(&mut self, lane: Lane) {
        *self.completed.entry(lane).or_default() += 1;
    }

    pub fn entered(&self, lane: Lane) -> u64 {
        self.entered.get(&lane).copied().unwrap_or(0)
    }

    pub fn completed(&self, lane: Lane) -> u64 {
        self.completed.get(&lane).copied().unwrap_or(0)
    }
}

/// One row of the utilization table.  `lane == None` is the summary row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneUtilization {
    pub lane:                 Option<Lane>,
    pub vehicles_entered:     u64,
    pub vehicles_completed:   u64,
    /// Realized vehicles per km: entered / road length.
    pub capacity_per_km:      f64,
    /// Theoretical vehicles per km.
    pub theoretical_capacity: f64,
    pub utilization_percent:  f64,
}

impl LaneUtilization {
    fn new(
        lane:        Option<Lane>,
        entered:     u64,
        completed:   u64,
        theoretical: f64,
        road_length: f64,
    ) -> Self {
        let capacity_per_km = entered as f64 / road_length;
        let utilization_percent = if theoretical > 0.0 {
            capacity_per_km / theoretical * 100.0
        } else {
            0.0
        };
        Self {
            lane,
            vehicles_entered:     entered,
            vehicles_completed:   completed,
            capacity_per_km,
            theoretical_capacity: theoretical,
            utilization_percent,
        }
    }

    #[inline]
    pub fn is_summary(&self) -> bool {
        self.lane.is_none()
    }

    /// `lane_0`, …, `bus_lane`, or `summary`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LaneUtilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lane {
            Some(lane) => write!(f, "{lane}"),
            None       => f.write_str("summary"),
        }
    }
}

/// One row per lane (regular lanes first, dedicated last) plus a summary
/// row over all lanes whose theoretical capacity is the sum of the lanes'.
pub fn lane_utilization(
    config:   &LaneConfiguration,
    params:   &SimulationParameters,
    counters: &LaneCounters,
) -> Vec<LaneUtilization> {
    let road_length = params.road_length;
    let mut rows: Vec<LaneUtilization> = config
        .lanes()
        .map(|lane| {
            LaneUtilization::new(
                Some(lane),
                counters.entered(lane),
                counters.completed(lane),
                config.capacity_per_km(lane, params),
                road_length,
            )
        })
        .collect();

    let entered = rows.iter().map(|r| r.vehicles_entered).sum();
    let completed = rows.iter().map(|r| r.vehicles_completed).sum();
    let theoretical = rows.iter().map(|r| r.theoretical_capacity).sum();
    rows.push(LaneUtilization::new(None, entered, completed, theoretical, road_length));
    rows
}
