//! Unit tests for jg-signal.

#[cfg(test)]
mod light_tests {
    use jg_core::{ConfigError, LightId};

    use crate::{Phase, TrafficLight};

    fn light(cycle: f64, green: f64) -> TrafficLight {
        TrafficLight::new(LightId(0), 0.5, cycle, green).unwrap()
    }

    #[test]
    fn starts_green() {
        let l = light(60.0, 40.0);
        assert_eq!(l.phase, Phase::Green);
        assert_eq!(l.phase_start_time, 0.0);
        assert_eq!(l.red_duration(), 20.0);
    }

    #[test]
    fn green_iff_t_mod_cycle_below_green() {
        let l = light(60.0, 40.0);
        for t in 0..600 {
            let t = t as f64 * 0.5;
            let expected = if t % 60.0 < 40.0 { Phase::Green } else { Phase::Red };
            assert_eq!(l.phase_at(t), expected, "t = {t}");
        }
    }

    #[test]
    fn boundaries() {
        let l = light(60.0, 40.0);
        assert_eq!(l.phase_at(39.999), Phase::Green);
        assert_eq!(l.phase_at(40.0), Phase::Red);
        assert_eq!(l.phase_at(59.999), Phase::Red);
        assert_eq!(l.phase_at(60.0), Phase::Green);
    }

    #[test]
    fn update_moves_phase_start_only_on_transition() {
        let mut l = light(10.0, 6.0);
        assert!(!l.update(1.0));
        assert_eq!(l.phase_start_time, 0.0);
        assert!(l.update(6.0));
        assert_eq!((l.phase, l.phase_start_time), (Phase::Red, 6.0));
        assert!(!l.update(7.0));
        assert_eq!(l.phase_start_time, 6.0);
        assert!(l.update(10.0));
        assert_eq!((l.phase, l.phase_start_time), (Phase::Green, 10.0));
    }

    #[test]
    fn coarse_ticks_observe_transition_at_tick_boundary() {
        let mut l = light(10.0, 6.0);
        // Step of 4 s: t = 4 (green), t = 8 (red, observed late).
        l.update(4.0);
        assert!(l.update(8.0));
        assert_eq!(l.phase_start_time, 8.0);
    }

    #[test]
    fn green_not_shorter_than_cycle_is_error() {
        let err = TrafficLight::new(LightId(0), 0.5, 60.0, 60.0).unwrap_err();
        assert_eq!(err, ConfigError::GreenNotShorterThanCycle { green: 60.0, cycle: 60.0 });
        assert!(TrafficLight::new(LightId(0), 0.5, 60.0, 75.0).is_err());
    }

    #[test]
    fn non_positive_timing_is_error() {
        assert!(TrafficLight::new(LightId(0), 0.5, 0.0, 0.0).is_err());
        assert!(TrafficLight::new(LightId(0), 0.5, 60.0, 0.0).is_err());
        assert!(TrafficLight::new(LightId(0), 0.5, f64::NAN, 10.0).is_err());
    }
}

#[cfg(test)]
mod controller_tests {
    use jg_core::{ConfigError, LaneConfiguration, SignalTiming, SimulationParameters};

    use crate::{calculate_optimal_cycle, calculate_optimal_cycle_with_ratio, Phase, TrafficLightController};

    fn params() -> SimulationParameters {
        SimulationParameters { road_length: 5.0, ..Default::default() }
    }

    #[test]
    fn optimal_cycle_hits_ratio() {
        let cycle = calculate_optimal_cycle(45.0);
        assert!((45.0 / cycle - 0.6).abs() < 1e-12);
        assert!(cycle >= 45.0);

        let cycle = calculate_optimal_cycle_with_ratio(50.0, 0.8);
        assert!((50.0 / cycle - 0.8).abs() < 1e-12);
    }

    #[test]
    fn optimal_cycle_never_shorter_than_green() {
        for ratio in [0.01, 0.5, 0.99, 1.0, 1.5, 0.0] {
            assert!(calculate_optimal_cycle_with_ratio(30.0, ratio) >= 30.0);
        }
    }

    #[test]
    fn default_timing_uses_parameter_cycle() {
        let cfg = LaneConfiguration::regular(1).lights(vec![1.0, 2.5]);
        let ctl = TrafficLightController::from_config(&cfg, &params()).unwrap();
        assert_eq!(ctl.len(), 2);
        let l = &ctl.lights()[0];
        assert_eq!(l.cycle_duration, 67.5);
        assert!((l.green_duration - 67.5 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn green_only_derives_cycle() {
        let cfg = LaneConfiguration::regular(1)
            .lights(vec![1.0])
            .signal(SignalTiming { cycle_duration: None, green_duration: Some(48.0) });
        let ctl = TrafficLightController::from_config(&cfg, &params()).unwrap();
        assert!((ctl.cycle_duration().unwrap() - 80.0).abs() < 1e-9);
        assert!((ctl.green_ratio() * 80.0 - 48.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_green_at_least_cycle_fails() {
        let cfg = LaneConfiguration::regular(1)
            .lights(vec![1.0])
            .signal(SignalTiming { cycle_duration: Some(60.0), green_duration: Some(60.0) });
        let err = TrafficLightController::from_config(&cfg, &params()).unwrap_err();
        assert!(matches!(err, ConfigError::GreenNotShorterThanCycle { .. }));
    }

    #[test]
    fn update_counts_transitions() {
        let cfg = LaneConfiguration::regular(1)
            .lights(vec![1.0, 2.0, 3.0])
            .signal(SignalTiming { cycle_duration: Some(10.0), green_duration: Some(5.0) });
        let mut ctl = TrafficLightController::from_config(&cfg, &params()).unwrap();
        assert_eq!(ctl.update(1.0), 0);
        assert_eq!(ctl.update(5.0), 3);
        assert_eq!(ctl.phases(), vec![Phase::Red; 3]);
    }

    #[test]
    fn red_lookups() {
        let cfg = LaneConfiguration::regular(1)
            .lights(vec![1.0, 2.0])
            .signal(SignalTiming { cycle_duration: Some(10.0), green_duration: Some(5.0) });
        let mut ctl = TrafficLightController::from_config(&cfg, &params()).unwrap();
        assert!(ctl.nearest_red_ahead(0.9, 0.5).is_none());
        ctl.update(6.0);
        assert_eq!(ctl.nearest_red_ahead(0.9, 0.5).unwrap().position, 1.0);
        assert_eq!(ctl.nearest_red_ahead(1.0, 0.5).unwrap().position, 1.0);
        assert!(ctl.nearest_red_ahead(1.01, 0.5).is_none());
        assert_eq!(ctl.first_red_at_or_ahead(1.01).unwrap().position, 2.0);
    }
}
