//! Road capacity model: occupancy, local density, and available room per lane.
//!
//! Everything here is a pure function of vehicle positions.

use jg_core::constants::{DETECTION_DISTANCE, MIN_DENSITY_FACTOR};
use jg_core::{Lane, Vehicle};

/// How full one lane is, as seen from the entry point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LaneOccupancy {
    /// Active vehicles anywhere in the lane.
    pub count:       usize,
    /// Road space taken by vehicles within the entry segment.
    pub entry_space: f64,
    /// `(position, total_space)` of the rearmost vehicle.
    pub rear:        Option<(f64, f64)>,
}

impl LaneOccupancy {
    /// Occupancy of `lane` on a road of `road_length` km.
    pub fn of(lane: Lane, vehicles: &[Vehicle], road_length: f64) -> Self {
        let entry_len = entry_segment(road_length);
        vehicles
            .iter()
            .filter(|v| v.lane == lane)
            .fold(Self::default(), |mut occ, v| {
                occ.count += 1;
                if v.position <= entry_len {
                    occ.entry_space += v.total_space();
                }
                match occ.rear {
                    Some((pos, _)) if pos <= v.position => {}
                    _ => occ.rear = Some((v.position, v.total_space())),
                }
                occ
            })
    }

    /// Record a vehicle of footprint `space` entering at km 0.
    pub fn push_entry(&mut self, space: f64) {
        self.count += 1;
        self.entry_space += space;
        self.rear = Some((0.0, space));
    }

    /// `true` if one more vehicle of footprint `space` fits at the entry:
    /// the entry segment has room for its slot and the rearmost vehicle has
    /// moved clear of km 0.
    pub fn has_entry_room(&self, space: f64, road_length: f64) -> bool {
        let clear_of_entry = self.rear.is_none_or(|(pos, rear_space)| pos >= rear_space);
        clear_of_entry && self.entry_space + space <= entry_segment(road_length)
    }

    #[inline]
    pub fn is_saturated(&self, limit: usize) -> bool {
        self.count >= limit
    }

    /// Saturation and entry room combined.
    pub fn can_admit(&self, space: f64, limit: usize, road_length: f64) -> bool {
        !self.is_saturated(limit) && self.has_entry_room(space, road_length)
    }
}

/// Length of the entry segment watched by the admission gate.
#[inline]
pub fn entry_segment(road_length: f64) -> f64 {
    DETECTION_DISTANCE.min(road_length)
}

/// Maximum simultaneous vehicles on a lane: capacity per km × road length,
/// never below one.
pub fn lane_limit(capacity_per_km: f64, road_length: f64) -> usize {
    ((capacity_per_km * road_length).floor() as usize).max(1)
}

/// Vehicles per km given `ahead` vehicles within the detection distance.
#[inline]
pub fn local_density(ahead: usize) -> f64 {
    ahead as f64 / DETECTION_DISTANCE
}

/// Free-flow slow-down for local density (linear speed–density relation),
/// floored at `MIN_DENSITY_FACTOR`.
pub fn density_factor(ahead: usize, capacity_per_km: f64) -> f64 {
    if capacity_per_km <= 0.0 {
        return MIN_DENSITY_FACTOR;
    }
    (1.0 - local_density(ahead) / capacity_per_km).max(MIN_DENSITY_FACTOR)
}
