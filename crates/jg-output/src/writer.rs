//! The `OutputWriter` trait implemented by output backends.

use crate::{ConfigRow, EventRow, LaneCapacityRow, LightStateRow, OutputResult, TimeseriesRow};

/// A sink for one run's output.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write the single run-configuration row.
    fn write_config(&mut self, row: &ConfigRow) -> OutputResult<()>;

    /// Write a batch of lifecycle events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one step's observables.
    fn write_timeseries(&mut self, row: &TimeseriesRow) -> OutputResult<()>;

    /// Write the phase of every light at one step.
    fn write_light_states(&mut self, rows: &[LightStateRow]) -> OutputResult<()>;

    /// Write the lane-utilization table.
    fn write_lane_capacity(&mut self, rows: &[LaneCapacityRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
