//! `jg-metrics`: congestion and performance measures over the vehicle set.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`jam`]         | `jam_length`: slow-stretch length summed over lanes      |
//! | [`utilization`] | `LaneCounters`, `LaneUtilization`, `lane_utilization`    |
//! | [`efficiency`]  | `ClassStats`, `TripAccumulator`, `bus_lane_efficiency`   |
//! | [`collector`]   | `MetricsCollector`, `StepMetrics`                        |
//! | [`report`]      | `SummaryReport`: terminal statistics of one run          |
//!
//! Nothing here mutates vehicles.  The collector is fed by the orchestrator
//! after each step and turned into a [`SummaryReport`] at the horizon.

pub mod collector;
pub mod efficiency;
pub mod jam;
pub mod report;
pub mod utilization;


pub use collector::{MetricsCollector, StepMetrics};
pub use efficiency::{ClassStats, TripAccumulator, bus_lane_efficiency};
pub use jam::jam_length;
pub use report::SummaryReport;
pub use utilization::{LaneCounters, LaneUtilization, lane_utilization};
