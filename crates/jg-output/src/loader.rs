//! Reads a run directory written by [`CsvWriter`][crate::CsvWriter] back
//! into aggregate statistics.
//!
//! Trip averages are rebuilt from the completion events in `vehicles.csv`
//! with the same accumulation the in-memory summary uses, so a loaded run
//! agrees with its [`SummaryReport`][jg_metrics::SummaryReport].

use std::fs::File;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use jg_core::VehicleClass;
use jg_metrics::{ClassStats, TripAccumulator, bus_lane_efficiency};
use jg_sim::Action;

use crate::csv::{CONFIG_FILE, TIMESERIES_FILE, VEHICLES_FILE};
use crate::{OutputError, OutputResult};

/// Aggregate statistics of one persisted run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub seed:                 u64,
    pub description:          String,
    pub has_dedicated_lane:   bool,
    pub road_length:          f64,
    pub completed_vehicles:   u64,
    pub exited_vehicles:      u64,
    pub turned_vehicles:      u64,
    pub average_travel_time:  f64,
    pub average_speed:        f64,
    pub average_waiting_time: f64,
    pub average_jam_length:   f64,
    pub max_jam_length:       f64,
    pub max_queue_length:     u64,
    pub regular:              ClassStats,
    pub privileged:           ClassStats,
    /// Privileged vs regular trips; `None` without a dedicated lane.
    pub bus_lane_efficiency:  Option<f64>,
    pub steps:                u64,
}

impl RunSummary {
    /// Efficiency of this run's privileged trips against those of
    /// `baseline`.
    pub fn efficiency_against(&self, baseline: &RunSummary) -> Option<f64> {
        bus_lane_efficiency(&self.privileged, &baseline.privileged)
    }
}

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ConfigRecord {
    seed:               u64,
    description:        String,
    has_dedicated_lane: bool,
    road_length:        f64,
}

#[derive(Deserialize)]
struct VehicleRecord {
    action:        String,
    class:         String,
    waiting_time:  f64,
    travel_time:   Option<f64>,
    turn_position: Option<f64>,
}

#[derive(Deserialize)]
struct TimeseriesRecord {
    jam_length:        f64,
    vehicles_in_queue: u64,
}

fn open(dir: &Path, file: &str) -> OutputResult<Reader<File>> {
    Ok(Reader::from_path(dir.join(file))?)
}

fn parse_error(file: &'static str, row: u64, column: &'static str, value: &str) -> OutputError {
    OutputError::Parse { file, row, column, value: value.to_string() }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load the run stored in `dir`.
///
/// # Errors
///
/// I/O and CSV errors (including missing columns and malformed fields), an
/// unknown action or class, a completion row without a travel time, or an
/// empty `config.csv`.
pub fn load_run_summary(dir: &Path) -> OutputResult<RunSummary> {
    // config.csv: the first data row.
    let config: ConfigRecord = match open(dir, CONFIG_FILE)?.deserialize::<ConfigRecord>().next() {
        Some(record) => record?,
        None => return Err(OutputError::Empty { file: CONFIG_FILE }),
    };

    // vehicles.csv: completion events only.
    let mut regular = TripAccumulator::default();
    let mut privileged = TripAccumulator::default();
    let (mut exited, mut turned) = (0u64, 0u64);
    for (i, result) in open(dir, VEHICLES_FILE)?.deserialize::<VehicleRecord>().enumerate() {
        let record = result?;
        let row = i as u64 + 1;

        let action = Action::parse(&record.action)
            .ok_or_else(|| parse_error(VEHICLES_FILE, row, "action", &record.action))?;
        if !action.is_completion() {
            continue;
        }
        let class = VehicleClass::parse(&record.class)
            .ok_or_else(|| parse_error(VEHICLES_FILE, row, "class", &record.class))?;
        let travel_time = record
            .travel_time
            .ok_or_else(|| parse_error(VEHICLES_FILE, row, "travel_time", ""))?;

        match action {
            Action::Turned => turned += 1,
            _ => exited += 1,
        }
        let distance = record.turn_position.unwrap_or(config.road_length);
        match class {
            VehicleClass::Regular    => regular.add_trip(travel_time, record.waiting_time, distance),
            VehicleClass::Privileged => privileged.add_trip(travel_time, record.waiting_time, distance),
        }
    }

    // timeseries.csv: jam and backlog.
    let (mut steps, mut jam_sum, mut jam_max, mut queue_max) = (0u64, 0.0f64, 0.0f64, 0u64);
    for result in open(dir, TIMESERIES_FILE)?.deserialize::<TimeseriesRecord>() {
        let record = result?;
        steps += 1;
        jam_sum += record.jam_length;
        jam_max = jam_max.max(record.jam_length);
        queue_max = queue_max.max(record.vehicles_in_queue);
    }

    let mut all = regular.clone();
    all.merge(&privileged);
    let all = all.stats();
    let regular = regular.stats();
    let privileged = privileged.stats();
    let bus_lane_efficiency = if config.has_dedicated_lane {
        bus_lane_efficiency(&privileged, &regular)
    } else {
        None
    };

    Ok(RunSummary {
        seed:                 config.seed,
        description:          config.description,
        has_dedicated_lane:   config.has_dedicated_lane,
        road_length:          config.road_length,
        completed_vehicles:   exited + turned,
        exited_vehicles:      exited,
        turned_vehicles:      turned,
        average_travel_time:  all.average_travel_time,
        average_speed:        all.average_speed,
        average_waiting_time: all.average_waiting_time,
        average_jam_length:   if steps > 0 { jam_sum / steps as f64 } else { 0.0 },
        max_jam_length:       jam_max,
        max_queue_length:     queue_max,
        regular,
        privileged,
        bus_lane_efficiency,
        steps,
    })
}
