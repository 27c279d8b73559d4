//! Per-class trip statistics and bus-lane efficiency.

use jg_core::constants::{BUS_EFFICIENCY_SPEED_WEIGHT, BUS_EFFICIENCY_TIME_WEIGHT, SECONDS_PER_HOUR};
use jg_core::Vehicle;

/// Averages over the completed trips of one vehicle class.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassStats {
    pub completed:            u64,
    pub average_travel_time:  f64,
    /// Mean of per-trip `trip_length / travel_time`, km/h.
    pub average_speed:        f64,
    pub average_waiting_time: f64,
    /// Trips with a positive travel time, i.e. those contributing a speed.
    pub speed_samples:        u64,
}

/// Running sums for [`ClassStats`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TripAccumulator {
    completed:     u64,
    travel_time:   f64,
    waiting_time:  f64,
    speed_sum:     f64,
    speed_samples: u64,
}

impl TripAccumulator {
    /// Add the finished trip of `v`.
    pub fn add(&mut self, v: &Vehicle, road_length: f64) {
        self.add_trip(v.travel_time, v.waiting_time, v.trip_length(road_length));
    }

    /// Add a trip from its raw figures; `distance` in km.
    pub fn add_trip(&mut self, travel_time: f64, waiting_time: f64, distance: f64) {
        self.completed += 1;
        self.travel_time += travel_time;
        self.waiting_time += waiting_time;
        if travel_time > 0.0 {
            self.speed_sum += distance / travel_time * SECONDS_PER_HOUR;
            self.speed_samples += 1;
        }
    }

    pub fn merge(&mut self, other: &TripAccumulator) {
        self.completed += other.completed;
        self.travel_time += other.travel_time;
        self.waiting_time += other.waiting_time;
        self.speed_sum += other.speed_sum;
        self.speed_samples += other.speed_samples;
    }

    pub fn stats(&self) -> ClassStats {
        let mean = |sum: f64, n: u64| if n > 0 { sum / n as f64 } else { 0.0 };
        ClassStats {
            completed:            self.completed,
            average_travel_time:  mean(self.travel_time, self.completed),
            average_speed:        mean(self.speed_sum, self.speed_samples),
            average_waiting_time: mean(self.waiting_time, self.completed),
            speed_samples:        self.speed_samples,
        }
    }
}

/// Relative improvement of `candidate` over `reference`, in percent:
/// `0.7 · time gain + 0.3 · speed gain`, each gain floored at zero.
///
/// Falls back to the time gain alone when either side has no speed sample.
/// `None` if either side has no completed trip or the reference travel time
/// is not positive.
pub fn bus_lane_efficiency(candidate: &ClassStats, reference: &ClassStats) -> Option<f64> {
    if candidate.completed == 0 || reference.completed == 0 || reference.average_travel_time <= 0.0 {
        return None;
    }
    let time_gain = ((reference.average_travel_time - candidate.average_travel_time)
        / reference.average_travel_time
        * 100.0)
        .max(0.0);

    if candidate.speed_samples == 0 || reference.speed_samples == 0 || reference.average_speed <= 0.0 {
        return Some(time_gain);
    }
    let speed_gain = ((candidate.average_speed - reference.average_speed)
        / reference.average_speed
        * 100.0)
        .max(0.0);

    Some(BUS_EFFICIENCY_TIME_WEIGHT * time_gain + BUS_EFFICIENCY_SPEED_WEIGHT * speed_gain)
}
