//! CSV output backend.
//!
//! Creates five files in the configured output directory: `config.csv`,
//! `vehicles.csv`, `timeseries.csv`, `traffic_lights.csv` and
//! `lane_capacity.csv`.  Optional values are written as empty fields and
//! floats in their shortest round-trip form.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ConfigRow, EventRow, LaneCapacityRow, LightStateRow, OutputResult, TimeseriesRow};

pub const CONFIG_FILE:         &str = "config.csv";
pub const VEHICLES_FILE:       &str = "vehicles.csv";
pub const TIMESERIES_FILE:     &str = "timeseries.csv";
pub const TRAFFIC_LIGHTS_FILE: &str = "traffic_lights.csv";
pub const LANE_CAPACITY_FILE:  &str = "lane_capacity.csv";

pub const CONFIG_HEADER: [&str; 15] = [
    "seed", "description", "num_regular_lanes", "has_dedicated_lane", "dedicated_lane_capacity",
    "light_positions", "green_ratio", "cycle_duration", "road_length", "simulation_duration",
    "time_step", "traffic_intensity_min", "traffic_intensity_max", "privileged_percentage",
    "lane_capacity",
];
pub const VEHICLES_HEADER: [&str; 11] = [
    "vehicle_id", "timestamp", "action", "class", "lane", "position", "speed", "waiting_time",
    "travel_time", "will_turn", "turn_position",
];
pub const TIMESERIES_HEADER: [&str; 9] = [
    "tick", "timestamp", "vehicles_in_motion", "average_speed", "jam_length",
    "bus_lane_occupancy", "vehicles_in_queue", "entered", "completed",
];
pub const TRAFFIC_LIGHTS_HEADER: [&str; 4] = ["timestamp", "light_id", "position", "state"];
pub const LANE_CAPACITY_HEADER: [&str; 7] = [
    "lane_id", "lane_type", "vehicles_entered", "vehicles_completed", "actual_capacity_per_km",
    "theoretical_capacity_per_km", "utilization_percent",
];

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// Writes one run's output to five CSV files.
pub struct CsvWriter {
    config:     Writer<File>,
    vehicles:   Writer<File>,
    timeseries: Writer<File>,
    lights:     Writer<File>,
    lanes:      Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the five CSV files and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let open = |name: &str, header: &[&str]| -> OutputResult<Writer<File>> {
            let mut w = Writer::from_path(dir.join(name))?;
            w.write_record(header)?;
            Ok(w)
        };

        Ok(Self {
            config:     open(CONFIG_FILE, &CONFIG_HEADER)?,
            vehicles:   open(VEHICLES_FILE, &VEHICLES_HEADER)?,
            timeseries: open(TIMESERIES_FILE, &TIMESERIES_HEADER)?,
            lights:     open(TRAFFIC_LIGHTS_FILE, &TRAFFIC_LIGHTS_HEADER)?,
            lanes:      open(LANE_CAPACITY_FILE, &LANE_CAPACITY_HEADER)?,
            finished:   false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_config(&mut self, row: &ConfigRow) -> OutputResult<()> {
        let positions: Vec<String> = row.light_positions.iter().map(f64::to_string).collect();
        self.config.write_record(&[
            row.seed.to_string(),
            row.description.clone(),
            row.num_regular_lanes.to_string(),
            row.has_dedicated_lane.to_string(),
            row.dedicated_lane_capacity.to_string(),
            positions.join(";"),
            row.green_ratio.to_string(),
            optional(row.cycle_duration),
            row.road_length.to_string(),
            row.simulation_duration.to_string(),
            row.time_step.to_string(),
            row.traffic_intensity_min.to_string(),
            row.traffic_intensity_max.to_string(),
            row.privileged_percentage.to_string(),
            row.lane_capacity.to_string(),
        ])?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.vehicles.write_record(&[
                row.vehicle_id.to_string(),
                row.timestamp.to_string(),
                row.action.as_str().to_string(),
                row.class.as_str().to_string(),
                optional(row.lane),
                row.position.to_string(),
                row.speed.to_string(),
                row.waiting_time.to_string(),
                optional(row.travel_time),
                row.turn_position.is_some().to_string(),
                optional(row.turn_position),
            ])?;
        }
        Ok(())
    }

    fn write_timeseries(&mut self, row: &TimeseriesRow) -> OutputResult<()> {
        self.timeseries.write_record(&[
            row.tick.to_string(),
            row.timestamp.to_string(),
            row.vehicles_in_motion.to_string(),
            row.average_speed.to_string(),
            row.jam_length.to_string(),
            row.bus_lane_occupancy.to_string(),
            row.vehicles_in_queue.to_string(),
            row.entered.to_string(),
            row.completed.to_string(),
        ])?;
        Ok(())
    }

    fn write_light_states(&mut self, rows: &[LightStateRow]) -> OutputResult<()> {
        for row in rows {
            self.lights.write_record(&[
                row.timestamp.to_string(),
                row.light_id.to_string(),
                row.position.to_string(),
                row.phase.as_str().to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_lane_capacity(&mut self, rows: &[LaneCapacityRow]) -> OutputResult<()> {
        for row in rows {
            self.lanes.write_record(&[
                row.lane_id.clone(),
                row.lane_type.to_string(),
                row.vehicles_entered.to_string(),
                row.vehicles_completed.to_string(),
                row.actual_capacity_per_km.to_string(),
                row.theoretical_capacity_per_km.to_string(),
                row.utilization_percent.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.config.flush()?;
        self.vehicles.flush()?;
        self.timeseries.flush()?;
        self.lights.flush()?;
        self.lanes.flush()?;
        Ok(())
    }
}
