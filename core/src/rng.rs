//! Random Number Generator.

use crate::geometry::Point2f;
use crate::pbrt::*;

/// Implements the hash based pseudo-random number generator. Each render block
/// owns one instance; it is never shared between threads.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sampler {
    state: u32,
}

impl Sampler {
    /// Create a new `Sampler` seeded with the given value.
    ///
    /// * `seed` - The seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Reseeds the generator.
    ///
    /// * `seed` - The seed.
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn next_u32(&mut self) -> u32 {
        let state = self
            .state
            .wrapping_mul(747796405)
            .wrapping_add(2891336453);
        let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277803737);
        self.state = (word >> 22) ^ word;
        self.state
    }

    /// Returns a uniformly distributed float in [0, 1).
    #[inline(always)]
    pub fn next_float(&mut self) -> Float {
        let v = self.next_u32() as f64 / u32::MAX as f64;
        min(v as Float, ONE_MINUS_EPSILON)
    }

    /// Returns a point with both coordinates uniformly distributed in [0, 1).
    #[inline(always)]
    pub fn next_2d(&mut self) -> Point2f {
        let u1 = self.next_float();
        let u2 = self.next_float();
        Point2f::new(u1, u2)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mean_is_one_half() {
        let mut s = Sampler::new(7);
        let n = 100_000;
        let sum: f64 = (0..n).map(|_| s.next_float() as f64).sum();
        assert!((sum / n as f64 - 0.5).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn same_seed_same_sequence(seed in 0u32..u32::MAX) {
            let mut a = Sampler::new(seed);
            let mut b = Sampler::new(seed);
            for _ in 0..32 {
                prop_assert_eq!(a.next_float().to_bits(), b.next_float().to_bits());
            }
        }

        #[test]
        fn floats_in_unit_interval(seed in 0u32..u32::MAX) {
            let mut s = Sampler::new(seed);
            for _ in 0..64 {
                let u = s.next_float();
                prop_assert!((0.0..1.0).contains(&u));
            }
        }
    }
}
