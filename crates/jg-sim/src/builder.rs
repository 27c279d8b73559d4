//! Fluent builder for constructing a [`Sim`].

use jg_core::{LaneConfiguration, SimClock, SimRng, SimulationParameters};
use jg_metrics::MetricsCollector;
use jg_signal::TrafficLightController;
use jg_traffic::{AdmissionQueue, VehicleGenerator};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`LaneConfiguration`]: lanes, lights, signal timing
/// - [`SimulationParameters`]: demand, road length, horizon, step
/// - `seed`: the only source of randomness in the run
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default |
/// |---------------------|---------|
/// | `.save_events(b)`   | `false` |
///
/// # Example
///
/// ```rust,ignore
/// let params = SimulationParameters::default();
/// let config = Variant::B.lane_configuration(&params);
/// let mut sim = SimBuilder::new(config, params, 42).save_events(true).build()?;
/// let summary = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:      LaneConfiguration,
    params:      SimulationParameters,
    seed:        u64,
    save_events: bool,
}

impl SimBuilder {
    pub fn new(config: LaneConfiguration, params: SimulationParameters, seed: u64) -> Self {
        Self { config, params, seed, save_events: false }
    }

    /// Keep every emitted [`LifecycleEvent`][crate::LifecycleEvent] in the
    /// sim so it can be read back with [`Sim::events`].
    pub fn save_events(mut self, save: bool) -> Self {
        self.save_events = save;
        self
    }

    /// Validate the configuration, build the light controller and engine
    /// components, and return a ready-to-run [`Sim`] at time 0.
    pub fn build(self) -> SimResult<Sim> {
        let SimBuilder { mut config, params, seed, save_events } = self;

        params.validate()?;
        config.validate(&params)?;
        let lights = TrafficLightController::from_config(&config, &params)?;

        Ok(Sim {
            clock:     SimClock::new(params.time_step, params.simulation_duration),
            rng:       SimRng::new(seed),
            generator: VehicleGenerator::new(&params),
            queue:     AdmissionQueue::new(),
            active:    Vec::new(),
            metrics:   MetricsCollector::new(params.road_length),
            events:    Vec::new(),
            lights,
            config,
            params,
            seed,
            save_events,
        })
    }
}

/// Build a simulation in one call; same as `SimBuilder::new(..).build()`.
pub fn configure(
    config: LaneConfiguration,
    params: SimulationParameters,
    seed:   u64,
) -> SimResult<Sim> {
    SimBuilder::new(config, params, seed).build()
}
