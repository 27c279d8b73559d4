//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use jg_metrics::{StepMetrics, SummaryReport};
use jg_signal::TrafficLight;
use jg_sim::{LifecycleEvent, Sim, SimObserver};

use crate::row::{ConfigRow, EventRow, LaneCapacityRow, LightStateRow, TimeseriesRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes events, per-step observables, light states
/// and the lane-utilization table to any [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first write error is kept and every
/// later write still attempted.  Check [`take_error`][Self::take_error] once
/// `sim.run()` returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer` and record `sim`'s
    /// configuration row right away.
    pub fn new(mut writer: W, sim: &Sim) -> Self {
        let result = writer.write_config(&ConfigRow::of(sim));
        let mut observer = Self { writer, last_error: None };
        observer.store_err(result);
        observer
    }

    /// The first write error of the run, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Give back the writer, e.g. to write further rows or flush by hand.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_events(&mut self, events: &[LifecycleEvent]) {
        if events.is_empty() {
            return;
        }
        let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
        let result = self.writer.write_events(&rows);
        self.store_err(result);
    }

    fn on_step_end(&mut self, metrics: &StepMetrics, lights: &[TrafficLight]) {
        let result = self.writer.write_timeseries(&TimeseriesRow::from(metrics));
        self.store_err(result);

        if !lights.is_empty() {
            let rows: Vec<LightStateRow> =
                lights.iter().map(|l| LightStateRow::of(l, metrics.time)).collect();
            let result = self.writer.write_light_states(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, summary: &SummaryReport) {
        let rows: Vec<LaneCapacityRow> =
            summary.lane_utilization.iter().map(LaneCapacityRow::from).collect();
        let result = self.writer.write_lane_capacity(&rows);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
