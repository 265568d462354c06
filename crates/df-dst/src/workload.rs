//! Random generation workloads.
//!
//! Produces divisor sets and request counts for seeded simulation runs of
//! the generators.

use df_core::DivisorSet;
use num_bigint::BigUint;

use crate::random::DeterministicRng;

/// Primes below 100, the pool for prime-only divisor sets.
const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Shape of randomly drawn generation requests.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Largest number of divisors in a drawn set
    pub divisors_count_max: usize,
    /// Largest divisor value (at least 2)
    pub divisor_max: u64,
    /// Draw divisors only from primes below 100 (bounded by `divisor_max`)
    pub primes_only: bool,
    /// Largest requested count
    pub count_max: usize,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            divisors_count_max: 6,
            divisor_max: 50,
            primes_only: false,
            count_max: 20,
        }
    }
}

impl Workload {
    /// Odd primes only, the shape of typical runs.
    #[must_use]
    pub fn odd_primes() -> Self {
        Self {
            divisors_count_max: 5,
            divisor_max: 47,
            primes_only: true,
            ..Default::default()
        }
    }

    /// Draw a divisor set.
    pub fn divisor_set(&self, rng: &mut DeterministicRng) -> df_core::Result<DivisorSet> {
        debug_assert!(self.divisors_count_max > 0, "Need at least one divisor");
        debug_assert!(self.divisor_max >= 2, "Divisors must be at least 2");

        let target = rng.gen_range(1..=self.divisors_count_max.max(1));
        let mut values: Vec<u64> = Vec::with_capacity(target);

        if self.primes_only {
            let pool: Vec<u64> = SMALL_PRIMES
                .iter()
                .copied()
                .filter(|&p| p != 2 && p <= self.divisor_max)
                .collect();
            for _ in 0..target {
                if let Some(&p) = rng.choose(&pool) {
                    if !values.contains(&p) {
                        values.push(p);
                    }
                }
            }
        } else {
            for _ in 0..target {
                let d = rng.gen_range(2..=self.divisor_max.max(2));
                if !values.contains(&d) {
                    values.push(d);
                }
            }
        }

        DivisorSet::new(values.into_iter().map(BigUint::from).collect())
    }

    /// Draw a requested count in `1..=count_max`.
    pub fn count(&self, rng: &mut DeterministicRng) -> usize {
        rng.gen_range(1..=self.count_max.max(1))
    }
}
