//! Jam length.
//!
//! Every vehicle slower than `JAM_SPEED_THRESHOLD` covers the stretch
//! `[position − total_space, position]` of its lane.  Stretches closer than
//! `JAM_THRESHOLD_DISTANCE` are bridged into one jam.  The result is the
//! summed length of the jams of every lane, so it never exceeds
//! `road_length × lanes`.

use std::collections::BTreeMap;

use jg_core::constants::{JAM_SPEED_THRESHOLD, JAM_THRESHOLD_DISTANCE};
use jg_core::{Lane, Vehicle};

pub fn jam_length(vehicles: &[Vehicle], road_length: f64) -> f64 {
    let mut stretches: BTreeMap<Lane, Vec<(f64, f64)>> = BTreeMap::new();
    for v in vehicles.iter().filter(|v| v.speed < JAM_SPEED_THRESHOLD) {
        let end = v.position.clamp(0.0, road_length);
        let start = (v.position - v.total_space()).clamp(0.0, end);
        stretches.entry(v.lane).or_default().push((start, end));
    }
    stretches.into_values().map(merged_length).sum()
}

/// Total length of `stretches` after bridging small gaps.
fn merged_length(mut stretches: Vec<(f64, f64)>) -> f64 {
    stretches.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut total = 0.0;
    let mut current: Option<(f64, f64)> = None;
    for (start, end) in stretches {
        current = match current {
            Some((s, e)) if start - e < JAM_THRESHOLD_DISTANCE => Some((s, e.max(end))),
            Some((s, e)) => {
                total += e - s;
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((s, e)) = current {
        total += e - s;
    }
    total
}
