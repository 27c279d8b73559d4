//! `jg-traffic`: everything that moves vehicles on and along the road.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`capacity`]    | `LaneOccupancy`, density factor, lane limits (pure functions)  |
//! | [`snapshot`]    | `RoadSnapshot`: per-lane ordering of the pre-step vehicle set  |
//! | [`generator`]   | `VehicleGenerator`: seeded Poisson arrival process             |
//! | [`admission`]   | `AdmissionQueue`: FIFO backlog and lane choice at km 0         |
//! | [`kinematics`]  | `KinematicsEngine`: next speed / position per vehicle          |
//!
//! # Snapshot rule
//!
//! Kinematics is a two-phase operation.  First a [`RoadSnapshot`] is built
//! over the active vehicles as they stood at the end of the previous step;
//! then every vehicle's [`Movement`] is computed from that snapshot only.
//! No movement reads another vehicle's already-updated state, so the order
//! of evaluation (and the `parallel` feature) cannot change the result.

pub mod admission;
pub mod capacity;
pub mod generator;
pub mod kinematics;
pub mod snapshot;


pub use admission::{AdmissionQueue, choose_lane};
pub use capacity::{LaneOccupancy, density_factor, lane_limit};
pub use generator::{VehicleGenerator, poisson};
pub use kinematics::{KinematicsEngine, Movement, Outcome};
pub use snapshot::RoadSnapshot;
