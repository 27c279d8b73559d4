//! Seeded arrival process.
//!
//! Each step draws a Poisson-distributed arrival count with mean
//! `mean_intensity · dt / 3600`, then the attributes of every arrival in a
//! fixed order: class, turning rate, turn decision, side road.  The number of
//! draws per arrival does not depend on the lane configuration, so two runs
//! that share a seed see the same vehicles.

use jg_core::constants::SECONDS_PER_HOUR;
use jg_core::{PendingVehicle, SimRng, SimulationParameters, VehicleClass, VehicleId};

/// Poisson sample: Knuth's product method below λ = 30, a rounded normal
/// approximation above.
pub fn poisson(rng: &mut SimRng, lambda: f64) -> u32 {
    if !(lambda > 0.0) {
        return 0;
    }
    if lambda < 30.0 {
        let limit = (-lambda).exp();
        let mut k: u32 = 0;
        let mut p: f64 = 1.0;
        loop {
            k += 1;
            p *= rng.random::<f64>();
            if p <= limit {
                return k - 1;
            }
        }
    } else {
        // 1 - u keeps the logarithm finite.
        let u1: f64 = 1.0 - rng.random::<f64>();
        let u2: f64 = rng.random();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (lambda + lambda.sqrt() * z).round().max(0.0) as u32
    }
}

pub struct VehicleGenerator {
    next_id:         VehicleId,
    /// Expected arrivals per step.
    rate_per_step:   f64,
    privileged:      f64,
    turning_range:   (f64, f64),
    side_roads:      Vec<f64>,
    total_generated: u64,
}

impl VehicleGenerator {
    pub fn new(params: &SimulationParameters) -> Self {
        let (lo, hi) = params.turning_percentage_range;
        Self {
            next_id:         VehicleId::FIRST,
            rate_per_step:   params.mean_intensity() * params.time_step / SECONDS_PER_HOUR,
            privileged:      params.privileged_percentage,
            turning_range:   (lo.min(hi), lo.max(hi)),
            side_roads:      params.side_road_positions.clone(),
            total_generated: 0,
        }
    }

    #[inline]
    pub fn rate_per_step(&self) -> f64 {
        self.rate_per_step
    }

    /// Vehicles generated since construction.
    #[inline]
    pub fn total_generated(&self) -> u64 {
        self.total_generated
    }

    /// Draw this step's arrivals, stamped with generation time `now`.
    pub fn generate(&mut self, rng: &mut SimRng, now: f64) -> Vec<PendingVehicle> {
        let count = poisson(rng, self.rate_per_step);
        (0..count).map(|_| self.draw_one(rng, now)).collect()
    }

    fn draw_one(&mut self, rng: &mut SimRng, now: f64) -> PendingVehicle {
        let class = if rng.gen_bool(self.privileged) {
            VehicleClass::Privileged
        } else {
            VehicleClass::Regular
        };

        let (lo, hi) = self.turning_range;
        let turning_rate = rng.gen_range(lo..=hi);
        let turn_position = if rng.gen_bool(turning_rate) {
            rng.choose(&self.side_roads).copied()
        } else {
            None
        };

        let id = self.next_id;
        self.next_id = id.next();
        self.total_generated += 1;

        PendingVehicle { id, class, generated_at: now, turn_position }
    }
}
