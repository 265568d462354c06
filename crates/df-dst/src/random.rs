//! Deterministic random number generation.
//!
//! Every random draw in a simulation (divisor sets, requested counts,
//! Miller–Rabin witnesses) goes through one seeded Xoshiro256** stream, so a
//! printed seed replays the run exactly.

use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seeded random source for simulations and primality witnesses.
///
/// # Example
///
/// ```rust
/// use df_dst::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(12345);
/// let a: u64 = rng.gen();
///
/// let mut rng2 = DeterministicRng::new(12345);
/// assert_eq!(rng2.gen::<u64>(), a);
/// ```
pub struct DeterministicRng {
    seed: u64,
    rng: Xoshiro256StarStar,
    calls_count: u64,
}

/// Draw count past which a run is assumed to be stuck.
const RNG_CALLS_WARNING_THRESHOLD: u64 = 1_000_000_000;

impl DeterministicRng {
    /// Generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            calls_count: 0,
        }
    }

    /// Seed this generator was built from; report it to replay a run.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws so far: one per scalar, one per 32-bit word of a big integer.
    #[must_use]
    pub fn calls_count(&self) -> u64 {
        self.calls_count
    }

    fn tick(&mut self) {
        self.calls_count += 1;
        debug_assert!(
            self.calls_count < RNG_CALLS_WARNING_THRESHOLD,
            "Draw count exceeds {}; search is probably stuck", RNG_CALLS_WARNING_THRESHOLD
        );
    }

    /// Uniform value of type `T`.
    pub fn gen<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.tick();
        self.rng.gen()
    }

    /// Uniform value in `range`.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.tick();
        self.rng.gen_range(range)
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        self.tick();
        slice.choose(&mut self.rng)
    }

    /// Uniform random integer with exactly `bits` random bits (top bit may be 0).
    pub fn gen_biguint(&mut self, bits: u64) -> BigUint {
        let words = ((bits + 31) / 32) as usize;
        let mut digits: Vec<u32> = (0..words).map(|_| self.gen::<u32>()).collect();
        let spare = (words as u64) * 32 - bits;
        if let Some(top) = digits.last_mut() {
            if spare > 0 {
                *top >>= spare;
            }
        }
        BigUint::from_slice(&digits)
    }

    /// Random integer in `[low, high)`. Returns `low` if the range is empty.
    pub fn gen_biguint_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        if high <= low {
            return low.clone();
        }
        let span = high - low;
        // 64 extra bits keep the modulo bias negligible.
        let sample = self.gen_biguint(span.bits() + 64);
        low + sample % span
    }
}
