//! Entry-point admission: the FIFO backlog and lane choice.

use std::collections::{BTreeMap, VecDeque};

use jg_core::{Lane, LaneConfiguration, PendingVehicle, SimulationParameters, Vehicle, VehicleClass};

use crate::capacity::{LaneOccupancy, lane_limit};

/// Lane a vehicle of `class` would take given current occupancies, or `None`
/// if no permitted lane can take it.
///
/// Privileged vehicles try the dedicated lane first.  Otherwise the
/// least-occupied admitting regular lane wins, ties to the lowest index.
pub fn choose_lane(
    class:       VehicleClass,
    occupancy:   &BTreeMap<Lane, LaneOccupancy>,
    config:      &LaneConfiguration,
    params:      &SimulationParameters,
) -> Option<Lane> {
    let space = class.total_space();
    let admits = |lane: Lane| {
        let limit = lane_limit(config.capacity_per_km(lane, params), params.road_length);
        occupancy
            .get(&lane)
            .copied()
            .unwrap_or_default()
            .can_admit(space, limit, params.road_length)
    };

    if class == VehicleClass::Privileged && config.has_dedicated_lane && admits(Lane::Dedicated) {
        return Some(Lane::Dedicated);
    }

    config
        .regular_lanes()
        .filter(|&lane| admits(lane))
        .min_by_key(|lane| occupancy.get(lane).map_or(0, |o| o.count))
}

/// Generated vehicles not yet on the road, oldest first.
#[derive(Clone, Debug, Default)]
pub struct AdmissionQueue {
    backlog: VecDeque<PendingVehicle>,
}

impl AdmissionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, vehicles: impl IntoIterator<Item = PendingVehicle>) {
        self.backlog.extend(vehicles);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.backlog.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.backlog.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingVehicle> {
        self.backlog.iter()
    }

    /// Admit from the front of the backlog onto `active` until the head
    /// vehicle finds no lane.  Vehicles behind a blocked head wait too.
    ///
    /// Admitted vehicles are appended to `active` at km 0 with entry time
    /// `now`; the number admitted is returned.
    pub fn admit(
        &mut self,
        active: &mut Vec<Vehicle>,
        config: &LaneConfiguration,
        params: &SimulationParameters,
        now:    f64,
    ) -> usize {
        let mut occupancy: BTreeMap<Lane, LaneOccupancy> = config
            .lanes()
            .map(|lane| (lane, LaneOccupancy::of(lane, active, params.road_length)))
            .collect();

        let mut admitted = 0;
        while let Some(head) = self.backlog.front() {
            let Some(lane) = choose_lane(head.class, &occupancy, config, params) else {
                break;
            };
            let Some(pending) = self.backlog.pop_front() else {
                break;
            };
            occupancy.entry(lane).or_default().push_entry(pending.class.total_space());
            active.push(pending.admit(lane, now));
            admitted += 1;
        }
        admitted
    }
}
