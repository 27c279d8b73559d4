//! Tests for jg-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use jg_core::VehicleClass;
    use jg_signal::Phase;
    use jg_sim::Action;

    use crate::csv::{CsvWriter, VEHICLES_HEADER};
    use crate::row::{EventRow, LightStateRow, TimeseriesRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn event(vehicle_id: u64, action: Action) -> EventRow {
        let on_road = action != Action::Queued;
        EventRow {
            vehicle_id,
            timestamp:     12.0,
            action,
            class:         VehicleClass::Regular,
            lane:          on_road.then_some(-1),
            position:      if on_road { 0.25 } else { 0.0 },
            speed:         if on_road { 37.5 } else { 0.0 },
            waiting_time:  0.0,
            travel_time:   action.is_completion().then_some(11.0),
            turn_position: None,
        }
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for file in ["config.csv", "vehicles.csv", "timeseries.csv", "traffic_lights.csv", "lane_capacity.csv"] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("B_seed1");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("vehicles.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicles.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, VEHICLES_HEADER);

        let mut rdr = csv::Reader::from_path(dir.path().join("traffic_lights.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["timestamp", "light_id", "position", "state"]);
    }

    #[test]
    fn queued_event_has_empty_lane_and_travel_time() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[event(1, Action::Queued), event(2, Action::Exited)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "vehicles.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "queued");
        assert_eq!(&rows[0][4], "");   // lane
        assert_eq!(&rows[0][8], "");   // travel_time
        assert_eq!(&rows[1][2], "exited");
        assert_eq!(&rows[1][3], "regular");
        assert_eq!(&rows[1][4], "-1"); // dedicated lane code
        assert_eq!(&rows[1][8], "11");
        assert_eq!(&rows[1][9], "false");
    }

    #[test]
    fn floats_round_trip_exactly() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let jam = 0.1 + 0.2;
        w.write_timeseries(&TimeseriesRow {
            tick:               3,
            timestamp:          3.0,
            vehicles_in_motion: 4,
            average_speed:      41.666666666666664,
            jam_length:         jam,
            bus_lane_occupancy: 1,
            vehicles_in_queue:  2,
            entered:            1,
            completed:          0,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "timeseries.csv");
        assert_eq!(rows[0][4].parse::<f64>().unwrap(), jam);
        assert_eq!(rows[0][3].parse::<f64>().unwrap(), 41.666666666666664);
    }

    #[test]
    fn light_states_written_per_light() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = [
            LightStateRow { timestamp: 5.0, light_id: 0, position: 0.3, phase: Phase::Green },
            LightStateRow { timestamp: 5.0, light_id: 1, position: 0.7, phase: Phase::Red },
        ];
        w.write_light_states(&rows).unwrap();
        w.finish().unwrap();

        let read = records(&dir, "traffic_lights.csv");
        assert_eq!(read.len(), 2);
        assert_eq!(&read[0][3], "green");
        assert_eq!(&read[1][1], "1");
        assert_eq!(&read[1][3], "red");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
        w.write_light_states(&[]).unwrap();
        w.write_lane_capacity(&[]).unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use jg_core::{SimulationParameters, Variant};
    use jg_sim::{Sim, SimBuilder};

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    pub(crate) fn params() -> SimulationParameters {
        SimulationParameters {
            traffic_intensity_range: (1500.0, 2500.0),
            privileged_percentage:   0.2,
            simulation_duration:     600.0,
            ..SimulationParameters::default()
        }
    }

    pub(crate) fn sim(variant: Variant, seed: u64) -> Sim {
        let params = params();
        SimBuilder::new(variant.lane_configuration(&params), params, seed)
            .save_events(true)
            .build()
            .unwrap()
    }

    fn count(dir: &TempDir, file: &str) -> usize {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).count()
    }

    #[test]
    fn writes_every_step_event_and_light() {
        let mut sim = sim(Variant::B, 3);
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &sim);
        let summary = sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        assert_eq!(count(&dir, "config.csv"), 1);
        assert_eq!(count(&dir, "timeseries.csv") as u64, summary.steps);
        assert_eq!(count(&dir, "vehicles.csv"), sim.events().len());
        assert_eq!(count(&dir, "traffic_lights.csv"), summary.steps as usize * sim.lights().len());
        // Two regular lanes, the bus lane, and the summary row.
        assert_eq!(count(&dir, "lane_capacity.csv"), 4);
    }

    #[test]
    fn lane_capacity_rows_match_summary() {
        let mut sim = sim(Variant::B, 5);
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        let summary = sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("lane_capacity.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        for (row, lane) in rows.iter().zip(&summary.lane_utilization) {
            assert_eq!(&row[0], lane.label());
            assert_eq!(row[2].parse::<u64>().unwrap(), lane.vehicles_entered);
            assert_eq!(row[3].parse::<u64>().unwrap(), lane.vehicles_completed);
        }
        assert_eq!(&rows[2][1], "dedicated");
        assert_eq!(&rows[3][1], "summary");
    }

    #[test]
    fn config_row_describes_run() {
        let sim = sim(Variant::A, 9);
        let dir = tempfile::tempdir().unwrap();
        let obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        let mut writer = obs.into_writer();
        crate::writer::OutputWriter::finish(&mut writer).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("config.csv")).unwrap();
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "9");
        assert_eq!(&row[1], sim.describe());
        assert_eq!(&row[2], "3");
        assert_eq!(&row[3], "false");
        assert_eq!(&row[5], "0.5");
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::fs;

    use jg_core::Variant;

    use super::observer_tests::sim;
    use crate::csv::CsvWriter;
    use crate::loader::load_run_summary;
    use crate::observer::SimOutputObserver;
    use crate::OutputError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(1.0)
    }

    #[test]
    fn loaded_summary_matches_in_memory_summary() {
        let mut sim = sim(Variant::B, 11);
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        let summary = sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let loaded = load_run_summary(dir.path()).unwrap();
        assert!(summary.completed_vehicles > 0);
        assert_eq!(loaded.seed, 11);
        assert!(loaded.has_dedicated_lane);
        assert_eq!(loaded.completed_vehicles, summary.completed_vehicles);
        assert_eq!(loaded.exited_vehicles, summary.exited_vehicles);
        assert_eq!(loaded.turned_vehicles, summary.turned_vehicles);
        assert_eq!(loaded.steps, summary.steps);
        assert_eq!(loaded.max_queue_length, summary.max_queue_length as u64);
        assert!(close(loaded.average_travel_time, summary.average_travel_time));
        assert!(close(loaded.average_speed, summary.average_speed));
        assert!(close(loaded.average_waiting_time, summary.average_waiting_time));
        assert!(close(loaded.average_jam_length, summary.average_jam_length));
        assert!(close(loaded.max_jam_length, summary.max_jam_length));
        assert_eq!(loaded.privileged.completed, summary.privileged.completed);
        match (loaded.bus_lane_efficiency, summary.bus_lane_efficiency) {
            (Some(a), Some(b)) => assert!(close(a, b)),
            (a, b) => assert_eq!(a, b),
        }
    }

    #[test]
    fn efficiency_against_loaded_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let mut summaries = Vec::new();
        for variant in [Variant::B, Variant::A] {
            let mut sim = sim(variant, 21);
            let run_dir = dir.path().join(variant.as_str());
            let mut obs = SimOutputObserver::new(CsvWriter::new(&run_dir).unwrap(), &sim);
            summaries.push(sim.run(&mut obs));
            assert!(obs.take_error().is_none());
        }
        let b = load_run_summary(&dir.path().join(Variant::B.as_str())).unwrap();
        let a = load_run_summary(&dir.path().join(Variant::A.as_str())).unwrap();
        assert!(a.bus_lane_efficiency.is_none());
        match (b.efficiency_against(&a), summaries[0].efficiency_against(&summaries[1])) {
            (Some(x), Some(y)) => assert!(close(x, y)),
            (x, y) => assert_eq!(x, y),
        }
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_run_summary(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn empty_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        crate::writer::OutputWriter::finish(&mut w).unwrap();
        assert!(matches!(
            load_run_summary(dir.path()),
            Err(OutputError::Empty { file: "config.csv" })
        ));
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let mut sim = sim(Variant::A, 2);
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        sim.run(&mut obs);
        fs::write(dir.path().join("timeseries.csv"), "tick,timestamp\n1,1\n").unwrap();
        let err = load_run_summary(dir.path()).unwrap_err();
        assert!(matches!(err, OutputError::Csv(_)));
        assert!(err.to_string().contains("jam_length"));
    }

    #[test]
    fn malformed_number_is_a_csv_error() {
        let mut sim = sim(Variant::A, 2);
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        sim.run(&mut obs);
        let header = crate::csv::TIMESERIES_HEADER.join(",");
        fs::write(
            dir.path().join("timeseries.csv"),
            format!("{header}\n1,1,0,0,lots,0,0,0,0\n"),
        )
        .unwrap();
        assert!(matches!(load_run_summary(dir.path()), Err(OutputError::Csv(_))));
    }

    #[test]
    fn queued_rows_are_skipped() {
        let mut sim = sim(Variant::A, 2);
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        sim.run(&mut obs);
        let header = crate::csv::VEHICLES_HEADER.join(",");
        fs::write(
            dir.path().join("vehicles.csv"),
            format!(
                "{header}\n\
                 1,1,queued,regular,,0,0,0,,false,\n\
                 1,30,exited,regular,0,2,40,6,29,false,\n\
                 2,40,turned,privileged,1,0.8,30,0,35,true,0.8\n"
            ),
        )
        .unwrap();
        let loaded = load_run_summary(dir.path()).unwrap();
        assert_eq!(loaded.completed_vehicles, 2);
        assert_eq!(loaded.exited_vehicles, 1);
        assert_eq!(loaded.turned_vehicles, 1);
        assert_eq!(loaded.regular.completed, 1);
        assert_eq!(loaded.privileged.completed, 1);
        assert!(close(loaded.average_travel_time, 32.0));
        assert!(close(loaded.average_waiting_time, 3.0));
    }

    #[test]
    fn bad_action_is_a_parse_error() {
        let mut sim = sim(Variant::A, 2);
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &sim);
        sim.run(&mut obs);
        let header = crate::csv::VEHICLES_HEADER.join(",");
        fs::write(
            dir.path().join("vehicles.csv"),
            format!("{header}\n1,1,teleported,regular,0,0,0,0,,false,\n"),
        )
        .unwrap();
        match load_run_summary(dir.path()) {
            Err(OutputError::Parse { column, row, value, .. }) => {
                assert_eq!(column, "action");
                assert_eq!(row, 1);
                assert_eq!(value, "teleported");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
