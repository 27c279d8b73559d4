//! Vehicle value types.
//!
//! Vehicles are plain data.  All behaviour (admission, kinematics, metrics)
//! lives in the stateless engine components that operate over slices of
//! them.

use std::fmt;

use crate::constants::{BUS_TOTAL_SPACE, CAR_TOTAL_SPACE};
use crate::VehicleId;

// ── VehicleClass ──────────────────────────────────────────────────────────────

/// Closed set of vehicle classes.  A new class needs explicit handling at
/// every lane-choice and metrics site.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleClass {
    /// Ordinary traffic; never admitted to the dedicated lane.
    Regular,
    /// Transit (bus); prefers the dedicated lane when one exists.
    Privileged,
}

impl VehicleClass {
    /// Road space (length + spacing) in km.
    #[inline]
    pub fn total_space(self) -> f64 {
        match self {
            VehicleClass::Regular    => CAR_TOTAL_SPACE,
            VehicleClass::Privileged => BUS_TOTAL_SPACE,
        }
    }

    /// Label used in CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Regular    => "regular",
            VehicleClass::Privileged => "privileged",
        }
    }

    pub fn parse(s: &str) -> Option<VehicleClass> {
        match s.trim() {
            "regular"    => Some(VehicleClass::Regular),
            "privileged" => Some(VehicleClass::Privileged),
            _            => None,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

/// A lane of the segment.
///
/// Ordering puts regular lanes first (by index) and the dedicated lane last,
/// which is the row order of the lane-utilization table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    Regular(u16),
    /// The transit lane (buspas).
    Dedicated,
}

impl Lane {
    /// Integer code used in CSV files: the regular index, or `-1` for the
    /// dedicated lane.
    pub fn code(self) -> i32 {
        match self {
            Lane::Regular(i) => i as i32,
            Lane::Dedicated  => -1,
        }
    }

    pub fn from_code(code: i32) -> Option<Lane> {
        match code {
            -1 => Some(Lane::Dedicated),
            i if i >= 0 => u16::try_from(i).ok().map(Lane::Regular),
            _ => None,
        }
    }

    #[inline]
    pub fn is_dedicated(self) -> bool {
        matches!(self, Lane::Dedicated)
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Regular(i) => write!(f, "lane_{i}"),
            Lane::Dedicated  => f.write_str("bus_lane"),
        }
    }
}

// ── PendingVehicle ────────────────────────────────────────────────────────────

/// A generated vehicle waiting in the backlog.  It has an identity and fixed
/// trip attributes but no position or lane yet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingVehicle {
    pub id:            VehicleId,
    pub class:         VehicleClass,
    /// Simulated seconds at which the vehicle was generated.
    pub generated_at:  f64,
    /// `Some(km)` iff the vehicle leaves via a side road.
    pub turn_position: Option<f64>,
}

impl PendingVehicle {
    #[inline]
    pub fn will_turn(&self) -> bool {
        self.turn_position.is_some()
    }

    /// Turn into an active vehicle at the entry point of `lane`.
    pub fn admit(self, lane: Lane, now: f64) -> Vehicle {
        Vehicle {
            id:            self.id,
            class:         self.class,
            generated_at:  self.generated_at,
            entry_time:    now,
            position:      0.0,
            speed:         0.0,
            lane,
            turn_position: self.turn_position,
            waiting_time:  0.0,
            travel_time:   0.0,
        }
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// An admitted vehicle on the road.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:            VehicleId,
    pub class:         VehicleClass,
    pub generated_at:  f64,
    /// Admission time in simulated seconds.
    pub entry_time:    f64,
    /// Front of the vehicle, km from the entry point.
    pub position:      f64,
    /// km/h, never negative.
    pub speed:         f64,
    pub lane:          Lane,
    pub turn_position: Option<f64>,
    /// Seconds spent below the jam speed threshold.
    pub waiting_time:  f64,
    /// Set when the vehicle leaves the road.
    pub travel_time:   f64,
}

impl Vehicle {
    #[inline]
    pub fn will_turn(&self) -> bool {
        self.turn_position.is_some()
    }

    #[inline]
    pub fn total_space(&self) -> f64 {
        self.class.total_space()
    }

    /// Distance covered between entry and leaving the road.
    pub fn trip_length(&self, road_length: f64) -> f64 {
        self.turn_position.unwrap_or(road_length)
    }
}
