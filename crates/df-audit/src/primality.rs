//! Miller–Rabin probable-prime check.
//!
//! A sanity check for generated values, nothing more: a `true` answer is
//! probabilistic with error below `4^-rounds` for odd composites.
//! Witnesses come from a seeded [`DeterministicRng`], so a given seed
//! always answers the same way.

use df_dst::DeterministicRng;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Primes used for trial division before Miller–Rabin.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Check parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimalityConfig {
    /// Miller–Rabin rounds with independent random witnesses
    pub rounds: u32,
    /// Witness RNG seed
    pub seed: u64,
}

impl Default for PrimalityConfig {
    fn default() -> Self {
        Self { rounds: 5, seed: 1 }
    }
}

/// Probable-prime test with `config.rounds` random witnesses.
#[must_use]
pub fn is_probable_prime(n: &BigUint, config: &PrimalityConfig) -> bool {
    let mut rng = DeterministicRng::new(config.seed);
    is_probable_prime_with(n, config.rounds, &mut rng)
}

/// Probable-prime test drawing witnesses from `rng`.
pub fn is_probable_prime_with(n: &BigUint, rounds: u32, rng: &mut DeterministicRng) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }

    for &p in &SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d · 2^s with d odd
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;
    debug_assert!(d.is_odd());

    // Witnesses in [2, n - 2]
    let upper = n - 1u32;
    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &upper);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
