//! Simulation observer trait for progress reporting and data collection.

use jg_core::Tick;
use jg_metrics::{StepMetrics, SummaryReport};
use jg_signal::TrafficLight;

use crate::LifecycleEvent;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: queue watcher
///
/// ```rust,ignore
/// struct QueueWatcher { worst: usize }
///
/// impl SimObserver for QueueWatcher {
///     fn on_step_end(&mut self, metrics: &StepMetrics, _lights: &[TrafficLight]) {
///         self.worst = self.worst.max(metrics.queued_vehicles);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the step that will end at `tick`.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called with the lifecycle events of the step just completed, in
    /// emission order.
    fn on_events(&mut self, _events: &[LifecycleEvent]) {}

    /// Called at the end of each step with its metrics and the light states.
    fn on_step_end(&mut self, _metrics: &StepMetrics, _lights: &[TrafficLight]) {}

    /// Called once after the horizon is reached.
    fn on_sim_end(&mut self, _summary: &SummaryReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
