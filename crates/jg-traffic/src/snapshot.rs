//! Read-only per-lane view of the active vehicle set.

use std::collections::BTreeMap;

use jg_core::{Lane, Vehicle};

/// Vehicles grouped by lane and sorted by `(position, id)`.
///
/// Built once per step before kinematics runs.  Indices refer to the slice
/// the snapshot was built from.
pub struct RoadSnapshot<'a> {
    vehicles: &'a [Vehicle],
    lanes:    BTreeMap<Lane, Vec<usize>>,
    /// Rank of each vehicle within its lane's ordering.
    rank:     Vec<usize>,
}

impl<'a> RoadSnapshot<'a> {
    pub fn build(vehicles: &'a [Vehicle]) -> Self {
        let mut lanes: BTreeMap<Lane, Vec<usize>> = BTreeMap::new();
        for (i, v) in vehicles.iter().enumerate() {
            lanes.entry(v.lane).or_default().push(i);
        }
        let mut rank = vec![0; vehicles.len()];
        for order in lanes.values_mut() {
            order.sort_by(|&a, &b| {
                vehicles[a]
                    .position
                    .total_cmp(&vehicles[b].position)
                    .then(vehicles[a].id.cmp(&vehicles[b].id))
            });
            for (r, &i) in order.iter().enumerate() {
                rank[i] = r;
            }
        }
        Self { vehicles, lanes, rank }
    }

    #[inline]
    pub fn vehicles(&self) -> &'a [Vehicle] {
        self.vehicles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Indices of the vehicles in `lane`, rear to front.
    pub fn lane(&self, lane: Lane) -> &[usize] {
        self.lanes.get(&lane).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The vehicle directly ahead of vehicle `i` in its lane.
    pub fn leader(&self, i: usize) -> Option<&'a Vehicle> {
        let order = self.lane(self.vehicles[i].lane);
        order.get(self.rank[i] + 1).map(|&j| &self.vehicles[j])
    }

    /// Vehicles ahead of `i` in its lane no further than `range` km.
    pub fn count_ahead_within(&self, i: usize, range: f64) -> usize {
        let origin = self.vehicles[i].position;
        self.lane(self.vehicles[i].lane)[self.rank[i] + 1..]
            .iter()
            .take_while(|&&j| self.vehicles[j].position - origin <= range)
            .count()
    }
}
