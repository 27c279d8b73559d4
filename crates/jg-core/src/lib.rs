//! `jg-core`: foundational types for the `jagodno` roadway simulator.
//!
//! This crate is a dependency of every other `jg-*` crate.  It intentionally
//! has no `jg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `LightId`                                     |
//! | [`time`]        | `Tick`, `SimClock`                                         |
//! | [`rng`]         | `SimRng` (the single run-level generator)                  |
//! | [`constants`]   | vehicle footprints, thresholds, detection distance         |
//! | [`vehicle`]     | `Vehicle`, `PendingVehicle`, `VehicleClass`, `Lane`        |
//! | [`config`]      | `LaneConfiguration`, `SimulationParameters`, `SignalTiming`|
//! | [`variant`]     | `Variant` presets A–D                                      |
//! | [`error`]       | `ConfigError`, `ConfigResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and value types.  |

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod variant;
pub mod vehicle;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{LaneConfiguration, SignalTiming, SimulationParameters};
pub use error::{ConfigError, ConfigResult};
pub use ids::{LightId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
pub use variant::Variant;
pub use vehicle::{Lane, PendingVehicle, Vehicle, VehicleClass};
