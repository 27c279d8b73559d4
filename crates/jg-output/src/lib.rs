//! `jg-output`: CSV persistence for jagodno simulation runs.
//!
//! A run directory holds five files:
//!
//! | File                  | One row per                                      |
//! |-----------------------|--------------------------------------------------|
//! | `config.csv`          | run (lanes, signals, demand, seed, description)  |
//! | `vehicles.csv`        | lifecycle event (entered, queued, exited, turned)|
//! | `timeseries.csv`      | step                                             |
//! | `traffic_lights.csv`  | light per step                                   |
//! | `lane_capacity.csv`   | lane, plus a `summary` row                       |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `jg_sim::SimObserver`.
//! [`load_run_summary`] reads a run directory back into a [`RunSummary`]
//! for cross-run comparison.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jg_output::{CsvWriter, SimOutputObserver, load_run_summary};
//!
//! let writer = CsvWriter::new(Path::new("./output/B_seed42"))?;
//! let mut obs = SimOutputObserver::new(writer, &sim);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! let loaded = load_run_summary(Path::new("./output/B_seed42"))?;
//! ```

pub mod csv;
pub mod error;
pub mod loader;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use loader::{RunSummary, load_run_summary};
pub use observer::SimOutputObserver;
pub use row::{ConfigRow, EventRow, LaneCapacityRow, LightStateRow, TimeseriesRow};
pub use writer::OutputWriter;
