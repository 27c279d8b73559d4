//! The `Sim` struct and its step loop.

use log::{debug, info, warn};

use jg_core::constants::JAM_SPEED_THRESHOLD;
use jg_core::{LaneConfiguration, SimClock, SimRng, SimulationParameters, Vehicle};
use jg_metrics::{MetricsCollector, StepMetrics, SummaryReport};
use jg_signal::TrafficLightController;
use jg_traffic::{AdmissionQueue, KinematicsEngine, Outcome, RoadSnapshot, VehicleGenerator};

use crate::{Action, LifecycleEvent, NoopObserver, SimObserver};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `Sim` owns all run state and drives the seven-phase step:
///
/// 1. **Clock**: advance by one time step.
/// 2. **Lights**: recompute every phase for the new time.
/// 3. **Arrivals**: draw this step's vehicles into the backlog.
/// 4. **Admission**: move backlog vehicles onto lanes, FIFO, head-of-line
///    blocking.
/// 5. **Kinematics** (optionally parallel with the `parallel` feature):
///    every active vehicle moves based on the pre-step snapshot; vehicles
///    past their side road or the road end leave.
/// 6. **Metrics**: measure the road and fold trips into the collector.
/// 7. **Events**: `Entered`, then `Queued`, then `Exited`/`Turned`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:      LaneConfiguration,
    pub(crate) params:      SimulationParameters,
    pub(crate) seed:        u64,
    pub(crate) clock:       SimClock,
    /// The run's only random stream, used by the generator alone.
    pub(crate) rng:         SimRng,
    pub(crate) lights:      TrafficLightController,
    pub(crate) generator:   VehicleGenerator,
    pub(crate) queue:       AdmissionQueue,
    /// Vehicles on the road, in ascending id order.
    pub(crate) active:      Vec<Vehicle>,
    pub(crate) metrics:     MetricsCollector,
    pub(crate) events:      Vec<LifecycleEvent>,
    pub(crate) save_events: bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current step to the horizon and return the summary.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SummaryReport {
        info!("run start (seed {}): {}", self.seed, self.describe());
        let total = self.clock.end_tick.0;
        let progress_every = (total / 10).max(1);

        while !self.clock.finished() {
            observer.on_step_start(self.clock.current_tick + 1);
            let events = self.step();
            observer.on_events(&events);
            if let Some(metrics) = self.metrics.history().last() {
                observer.on_step_end(metrics, self.lights.lights());
            }

            let tick = self.clock.current_tick.0;
            if tick.is_multiple_of(progress_every) {
                debug!(
                    "{:>3.0}% - {} on road, {} queued",
                    tick as f64 / total as f64 * 100.0,
                    self.active.len(),
                    self.queue.len(),
                );
            }
        }

        let summary = self.summary();
        if summary.still_queued > 0 {
            warn!(
                "{} vehicles still queued at the horizon (never admitted)",
                summary.still_queued
            );
        }
        info!(
            "run end: {} completed of {} generated, avg travel {:.1}s, avg speed {:.1} km/h",
            summary.completed_vehicles,
            summary.total_generated,
            summary.average_travel_time,
            summary.average_speed,
        );
        observer.on_sim_end(&summary);
        summary
    }

    /// Run to the horizon without an observer.  `save_events` replaces the
    /// builder's setting; kept events are read back through [`Sim::events`].
    pub fn run_collecting(&mut self, save_events: bool) -> SummaryReport {
        self.save_events = save_events;
        self.run(&mut NoopObserver)
    }

    /// Advance one time step and return the lifecycle events it produced.
    pub fn step(&mut self) -> Vec<LifecycleEvent> {
        // ── 1–2: clock and lights ─────────────────────────────────────────
        self.clock.advance();
        let tick = self.clock.current_tick;
        let now = self.clock.now_secs();
        self.lights.update(now);

        // ── 3: arrivals ───────────────────────────────────────────────────
        let arrivals = self.generator.generate(&mut self.rng, now);
        let first_new = arrivals.first().map(|p| p.id);
        self.queue.extend(arrivals);

        // ── 4: admission ──────────────────────────────────────────────────
        let before = self.active.len();
        let entered = self.queue.admit(&mut self.active, &self.config, &self.params, now);

        let mut events = Vec::new();
        for v in &self.active[before..] {
            self.metrics.record_entry(v);
            events.push(LifecycleEvent::on_road(v, Action::Entered, now));
        }
        if let Some(first_new) = first_new {
            events.extend(
                self.queue
                    .iter()
                    .filter(|p| p.id >= first_new)
                    .map(|p| LifecycleEvent::queued(p, now)),
            );
        }

        // ── 5: kinematics over the pre-step snapshot ──────────────────────
        let movements = {
            let snapshot = RoadSnapshot::build(&self.active);
            KinematicsEngine::new(&self.config, &self.params, &self.lights).advance_all(&snapshot)
        };

        let dt = self.params.time_step;
        let mut leaving = vec![false; self.active.len()];
        for m in &movements {
            let v = &mut self.active[m.index];
            v.position = m.position;
            v.speed = m.speed;
            if m.speed < JAM_SPEED_THRESHOLD {
                v.waiting_time += dt;
            }
            let action = match m.outcome {
                Outcome::Moving => continue,
                Outcome::Exited => Action::Exited,
                Outcome::Turned => Action::Turned,
            };
            v.travel_time = now - v.entry_time;
            leaving[m.index] = true;
            self.metrics.record_completion(v, action == Action::Turned);
            events.push(LifecycleEvent::on_road(v, action, now));
        }
        let completed = leaving.iter().filter(|&&gone| gone).count();
        let mut index = 0;
        self.active.retain(|_| {
            let keep = !leaving[index];
            index += 1;
            keep
        });

        // ── 6: metrics ────────────────────────────────────────────────────
        self.metrics.record_step(StepMetrics::measure(
            tick,
            now,
            &self.active,
            self.params.road_length,
            self.queue.len(),
            entered,
            completed,
            self.lights.phases(),
        ));

        // ── 7: events ─────────────────────────────────────────────────────
        if self.save_events {
            self.events.extend(events.iter().cloned());
        }
        events
    }

    /// Terminal statistics for the state reached so far.
    pub fn summary(&self) -> SummaryReport {
        self.metrics.summarize(
            &self.config,
            &self.params,
            self.generator.total_generated(),
            self.active.len() as u64,
            self.queue.len() as u64,
        )
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Events kept since the start when built with `save_events(true)`;
    /// empty otherwise.
    #[inline]
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    #[inline]
    pub fn active_vehicles(&self) -> &[Vehicle] {
        &self.active
    }

    #[inline]
    pub fn queue(&self) -> &AdmissionQueue {
        &self.queue
    }

    #[inline]
    pub fn lights(&self) -> &TrafficLightController {
        &self.lights
    }

    #[inline]
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    #[inline]
    pub fn config(&self) -> &LaneConfiguration {
        &self.config
    }

    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn total_generated(&self) -> u64 {
        self.generator.total_generated()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.finished()
    }
}
