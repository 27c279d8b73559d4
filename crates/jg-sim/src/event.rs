//! Vehicle lifecycle events emitted by [`Sim::step`][crate::Sim::step].

use std::fmt;

use jg_core::{Lane, PendingVehicle, Vehicle, VehicleClass, VehicleId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Admitted onto a lane at km 0.
    Entered,
    /// Generated this step but left in the backlog.
    Queued,
    /// Reached the end of the road.
    Exited,
    /// Left through a side road.
    Turned,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Entered => "entered",
            Action::Queued  => "queued",
            Action::Exited  => "exited",
            Action::Turned  => "turned",
        }
    }

    pub fn parse(s: &str) -> Option<Action> {
        match s.trim() {
            "entered" => Some(Action::Entered),
            "queued"  => Some(Action::Queued),
            "exited"  => Some(Action::Exited),
            "turned"  => Some(Action::Turned),
            _         => None,
        }
    }

    /// `true` for the two ways of leaving the road.
    #[inline]
    pub fn is_completion(self) -> bool {
        matches!(self, Action::Exited | Action::Turned)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifecycleEvent {
    pub vehicle_id:    VehicleId,
    pub class:         VehicleClass,
    pub action:        Action,
    /// Simulated seconds.
    pub timestamp:     f64,
    /// km; 0 for queued vehicles.
    pub position:      f64,
    /// `None` while queued.
    pub lane:          Option<Lane>,
    pub speed:         f64,
    pub waiting_time:  f64,
    /// Set on completion.
    pub travel_time:   Option<f64>,
    pub turn_position: Option<f64>,
}

impl LifecycleEvent {
    /// Event for an admitted vehicle.
    pub fn on_road(v: &Vehicle, action: Action, timestamp: f64) -> Self {
        Self {
            vehicle_id:    v.id,
            class:         v.class,
            action,
            timestamp,
            position:      v.position,
            lane:          Some(v.lane),
            speed:         v.speed,
            waiting_time:  v.waiting_time,
            travel_time:   action.is_completion().then_some(v.travel_time),
            turn_position: v.turn_position,
        }
    }

    /// Event for a vehicle left in the backlog.
    pub fn queued(p: &PendingVehicle, timestamp: f64) -> Self {
        Self {
            vehicle_id:    p.id,
            class:         p.class,
            action:        Action::Queued,
            timestamp,
            position:      0.0,
            lane:          None,
            speed:         0.0,
            waiting_time:  0.0,
            travel_time:   None,
            turn_position: p.turn_position,
        }
    }
}
