//! A small pseudorandom number generator, for the [internal solver](crate::solver::internal).
//!
//! The generator is PCG32 (XSH RR), following the minimal C implementation from <https://www.pcg-random.org/>.
//! Seeding follows `pcg32_srandom_r`, with a fixed stream, so the same seed always gives the same sequence.
//!
//! The internal solver only uses randomness to pick the polarity of a decision, and then only when the configured polarity lean is strictly between `0` and `1`.
//! Still, a fixed seed keeps every solve reproducible.

use rand::SeedableRng;
use rand_core::{impls, Error, RngCore};

/// The multiplier of the underlying linear congruential generator.
const MULTIPLIER: u64 = 6364136223846793005;

/// The stream selector, shifted and made odd on use.
const STREAM: u64 = 0x14057B7EF767814F;

/// State and increment
#[derive(Clone, Debug)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl MinimalPCG32 {
    fn step(&mut self) {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(self.inc);
    }
}

impl Default for MinimalPCG32 {
    fn default() -> Self {
        MinimalPCG32::seed_from_u64(crate::config::defaults::RNG_SEED)
    }
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.step();

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.next_u32() as u64;
        let high = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (STREAM << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(u64::from_le_bytes(seed));
        rng.step();
        rng
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::from_seed(seed.to_le_bytes())
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let mut left = MinimalPCG32::seed_from_u64(73);
        let mut right = MinimalPCG32::seed_from_u64(73);
        for _ in 0..64 {
            assert_eq!(left.next_u32(), right.next_u32());
        }
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut two = MinimalPCG32::seed_from_u64(2);
        let mut three = MinimalPCG32::seed_from_u64(3);
        let twos: Vec<u32> = (0..8).map(|_| two.next_u32()).collect();
        let threes: Vec<u32> = (0..8).map(|_| three.next_u32()).collect();
        assert_ne!(twos, threes);
    }

    #[test]
    fn bool_extremes() {
        let mut rng = MinimalPCG32::default();
        for _ in 0..32 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
        }
    }
}
