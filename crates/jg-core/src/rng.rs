//! The run's random stream.
//!
//! A run owns exactly one `SimRng`, seeded from the caller's seed and held by
//! the orchestrator.  It is threaded by `&mut` into the vehicle generator and
//! nowhere else: the kinematics, admission, and metrics stages draw no random
//! numbers.  Two runs with the same seed and parameters therefore consume the
//! identical random stream, and two runs that differ only in lane layout
//! still see identical arrivals.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Odd 64-bit golden-ratio constant used to spread rerun indices over the
/// seed space.
const RERUN_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded generator for one run.  Not `Clone`: a copied stream would replay
/// the same arrivals.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed of rerun `rerun` in a sweep from `base_seed`.  Rerun 0 uses the
    /// base seed itself.
    pub fn rerun_seed(base_seed: u64, rerun: u64) -> u64 {
        base_seed ^ rerun.wrapping_mul(RERUN_MIX)
    }

    /// A uniform sample; `f64` lies in `[0, 1)`.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`, clamped into `[0, 1]`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A uniformly chosen element, `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
