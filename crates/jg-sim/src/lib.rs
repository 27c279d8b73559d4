//! `jg-sim`: step orchestrator for the jagodno roadway simulator.
//!
//! # Step state machine
//!
//! ```text
//! until clock ≥ horizon:
//!   ① Clock     : advance by time_step.
//!   ② Lights    : phase = Green iff t mod cycle < green, per light.
//!   ③ Arrivals  : Poisson count; class, turn, side road per vehicle.
//!   ④ Admission : FIFO backlog → lanes at km 0, head-of-line blocking.
//!   ⑤ Kinematics: every vehicle from the pre-step snapshot
//!               (parallel with the `parallel` feature); exits and turns.
//!   ⑥ Metrics   : speed, jam length, backlog, lane tallies.
//!   ⑦ Events    : Entered, Queued, Exited/Turned.
//! ```
//!
//! A step is a pure function of the previous state and the run's RNG, so a
//! seed reproduces a run bit for bit.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the kinematics phase on Rayon's thread pool.      |
//! | `serde`    | Serde derives on events, metrics, and summaries.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use jg_core::{SimulationParameters, Variant};
//! use jg_sim::{NoopObserver, SimBuilder};
//!
//! let params = SimulationParameters::default();
//! let mut sim = SimBuilder::new(Variant::B.lane_configuration(&params), params, 42)
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod describe;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;


pub use builder::{SimBuilder, configure};
pub use error::{SimError, SimResult};
pub use event::{Action, LifecycleEvent};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
