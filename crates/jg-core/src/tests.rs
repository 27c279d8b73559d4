//! Unit tests for jg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LightId, VehicleId};

    #[test]
    fn next_is_monotonic() {
        assert_eq!(VehicleId::FIRST.next(), VehicleId(2));
        assert!(VehicleId(3) < VehicleId(3).next());
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(VehicleId(7).to_string(), "V7");
        assert_eq!(LightId(0).to_string(), "L0");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.to_string(), "#10");
    }

    #[test]
    fn clock_time_is_tick_times_step() {
        let mut clock = SimClock::new(0.5, 10.0);
        assert_eq!(clock.now_secs(), 0.0);
        clock.advance();
        clock.advance();
        clock.advance();
        assert_eq!(clock.now_secs(), 1.5);
    }

    #[test]
    fn horizon_rounds_partial_step_up() {
        let clock = SimClock::new(1.0, 3600.0);
        assert_eq!(clock.end_tick, Tick(3600));
        let clock = SimClock::new(0.7, 2.0);
        assert_eq!(clock.end_tick, Tick(3));
    }

    #[test]
    fn finished_at_horizon() {
        let mut clock = SimClock::new(1.0, 2.0);
        assert!(!clock.finished());
        clock.advance();
        assert_eq!(clock.remaining(), 1);
        clock.advance();
        assert!(clock.finished());
        assert_eq!(clock.remaining(), 0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a: u64 = SimRng::new(1).random();
        let b: u64 = SimRng::new(2).random();
        assert_ne!(a, b);
    }

    #[test]
    fn rerun_seeds_are_distinct_and_stable() {
        assert_eq!(SimRng::rerun_seed(42, 0), 42);
        assert_ne!(SimRng::rerun_seed(42, 1), SimRng::rerun_seed(42, 2));
        assert_eq!(SimRng::rerun_seed(42, 3), SimRng::rerun_seed(42, 3));
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [f64; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod vehicle {
    use crate::constants::{BUS_TOTAL_SPACE, CAR_TOTAL_SPACE};
    use crate::{Lane, PendingVehicle, VehicleClass, VehicleId};

    #[test]
    fn class_footprints() {
        assert_eq!(VehicleClass::Regular.total_space(), CAR_TOTAL_SPACE);
        assert_eq!(VehicleClass::Privileged.total_space(), BUS_TOTAL_SPACE);
        assert!(BUS_TOTAL_SPACE > CAR_TOTAL_SPACE);
    }

    #[test]
    fn class_labels_parse_back() {
        for class in [VehicleClass::Regular, VehicleClass::Privileged] {
            assert_eq!(VehicleClass::parse(class.as_str()), Some(class));
        }
        assert_eq!(VehicleClass::parse("truck"), None);
    }

    #[test]
    fn lane_codes() {
        assert_eq!(Lane::Dedicated.code(), -1);
        assert_eq!(Lane::Regular(2).code(), 2);
        assert_eq!(Lane::from_code(-1), Some(Lane::Dedicated));
        assert_eq!(Lane::from_code(1), Some(Lane::Regular(1)));
        assert_eq!(Lane::from_code(-2), None);
    }

    #[test]
    fn dedicated_lane_sorts_last() {
        let mut lanes = vec![Lane::Dedicated, Lane::Regular(1), Lane::Regular(0)];
        lanes.sort();
        assert_eq!(lanes, [Lane::Regular(0), Lane::Regular(1), Lane::Dedicated]);
    }

    #[test]
    fn admit_places_vehicle_at_entry() {
        let pending = PendingVehicle {
            id:            VehicleId(9),
            class:         VehicleClass::Privileged,
            generated_at:  3.0,
            turn_position: Some(0.5),
        };
        let v = pending.admit(Lane::Dedicated, 7.0);
        assert_eq!(v.id, VehicleId(9));
        assert_eq!(v.position, 0.0);
        assert_eq!(v.speed, 0.0);
        assert_eq!(v.entry_time, 7.0);
        assert_eq!(v.generated_at, 3.0);
        assert!(v.will_turn());
        assert_eq!(v.trip_length(5.0), 0.5);
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigError, Lane, LaneConfiguration, SimulationParameters};

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParameters::default();
        params.validate().unwrap();
        LaneConfiguration::default().validate(&params).unwrap();
    }

    #[test]
    fn zero_lanes_rejected() {
        let params = SimulationParameters::default();
        let err = LaneConfiguration::regular(0).validate(&params).unwrap_err();
        assert_eq!(err, ConfigError::NoRegularLanes(0));
    }

    #[test]
    fn dedicated_only_requires_all_privileged() {
        let mut params = SimulationParameters::default();
        let mut cfg = LaneConfiguration::with_dedicated(0, 75.0);
        assert!(matches!(
            cfg.validate(&params),
            Err(ConfigError::RegularTrafficWithoutLane(_))
        ));
        params.privileged_percentage = 1.0;
        cfg.validate(&params).unwrap();
    }

    #[test]
    fn light_outside_road_rejected() {
        let params = SimulationParameters::default(); // 1 km road
        let err = LaneConfiguration::regular(1)
            .lights(vec![0.5, 1.5])
            .validate(&params)
            .unwrap_err();
        assert!(matches!(err, ConfigError::LightOutsideRoad { position, .. } if position == 1.5));
    }

    #[test]
    fn lights_at_road_ends_accepted_and_sorted() {
        let params = SimulationParameters::default();
        let mut cfg = LaneConfiguration::regular(1).lights(vec![1.0, 0.0, 0.4]);
        cfg.validate(&params).unwrap();
        assert_eq!(cfg.light_positions, [0.0, 0.4, 1.0]);
    }

    #[test]
    fn green_ratio_bounds() {
        let params = SimulationParameters::default();
        for ratio in [0.0, 1.0, -0.1, f64::NAN] {
            let err = LaneConfiguration::regular(1).green_ratio(ratio).validate(&params);
            assert!(matches!(err, Err(ConfigError::GreenRatio(_))), "ratio {ratio}");
        }
    }

    #[test]
    fn numeric_degeneracy_is_config_error() {
        let mut params = SimulationParameters { road_length: 0.0, ..Default::default() };
        assert!(matches!(params.validate(), Err(ConfigError::NonPositive { what: "road length", .. })));
        params.road_length = 1.0;
        params.time_step = 0.0;
        assert!(matches!(params.validate(), Err(ConfigError::NonPositive { what: "time step", .. })));
        params.time_step = f64::INFINITY;
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_ranges_rejected() {
        let params = SimulationParameters {
            traffic_intensity_range: (900.0, 100.0),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::Range { .. })));

        let params = SimulationParameters {
            turning_percentage_range: (0.3, 0.1),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::Range { .. })));
    }

    #[test]
    fn side_road_must_be_inside_road() {
        let params = SimulationParameters {
            side_road_positions: vec![0.0],
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::SideRoadOutsideRoad { .. })));
    }

    #[test]
    fn baseline_swaps_dedicated_for_regular() {
        let cfg = LaneConfiguration::with_dedicated(2, 80.0).lights(vec![0.5]);
        let base = cfg.baseline().unwrap();
        assert_eq!(base.num_regular_lanes, 3);
        assert!(!base.has_dedicated_lane);
        assert_eq!(base.light_positions, cfg.light_positions);
        assert!(LaneConfiguration::regular(3).baseline().is_none());
    }

    #[test]
    fn lanes_listed_regular_first() {
        let cfg = LaneConfiguration::with_dedicated(2, 80.0);
        let lanes: Vec<_> = cfg.lanes().collect();
        assert_eq!(lanes, [Lane::Regular(0), Lane::Regular(1), Lane::Dedicated]);
        assert_eq!(cfg.lane_count(), 3);
    }
}

#[cfg(test)]
mod variant {
    use crate::{SimulationParameters, Variant};

    #[test]
    fn presets_layout() {
        let params = SimulationParameters::default();
        let a = Variant::A.lane_configuration(&params);
        let b = Variant::B.lane_configuration(&params);
        assert_eq!((a.num_regular_lanes, a.has_dedicated_lane), (3, false));
        assert_eq!((b.num_regular_lanes, b.has_dedicated_lane), (2, true));
        assert_eq!(a.lane_count(), b.lane_count());
        assert!(b.dedicated_lane_capacity > 0.0);
        assert_eq!(b.light_positions, params.side_road_positions);
    }

    #[test]
    fn every_preset_validates() {
        let params = SimulationParameters::default();
        for v in Variant::ALL {
            v.lane_configuration(&params).validate(&params).unwrap();
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("b".parse::<Variant>().unwrap(), Variant::B);
        assert!("E".parse::<Variant>().is_err());
    }

    #[test]
    fn counterparts_pair_up() {
        for v in Variant::ALL {
            assert_eq!(v.counterpart().counterpart(), v);
        }
    }
}
