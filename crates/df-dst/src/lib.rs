//! # df-dst
//!
//! Deterministic simulation support for divisor-free generators.
//!
//! Every random choice (simulated divisor sets, primality witnesses) flows
//! through a seeded [`DeterministicRng`], so any failing run reproduces
//! from its seed.
//!
//! ## Usage
//!
//! ```rust
//! use df_dst::{DeterministicRng, Workload};
//!
//! let mut rng = DeterministicRng::new(12345);
//! let divisors = Workload::default().divisor_set(&mut rng).unwrap();
//! assert!(!divisors.is_empty());
//! ```
//!
//! ## Reproducibility
//!
//! To reproduce a failing test:
//! ```bash
//! DF_SEED=12345 cargo test
//! ```

pub mod random;
pub mod workload;

pub use random::DeterministicRng;
pub use workload::Workload;

/// Environment variable holding a seed to replay.
pub const SEED_ENV_VAR: &str = "DF_SEED";

/// Get the seed from `DF_SEED` or generate a random one.
///
/// Prints the seed for reproduction. An unparseable `DF_SEED` is reported
/// and replaced by a random seed.
#[must_use]
pub fn get_or_generate_seed() -> u64 {
    match std::env::var(SEED_ENV_VAR).map(|s| s.parse::<u64>()) {
        Ok(Ok(seed)) => {
            println!("{}={} (from environment)", SEED_ENV_VAR, seed);
            seed
        }
        Ok(Err(_)) => {
            let seed = rand::random::<u64>();
            println!("{}={} (environment value unparseable, randomly generated)", SEED_ENV_VAR, seed);
            seed
        }
        Err(_) => {
            let seed = rand::random::<u64>();
            println!("{}={} (randomly generated)", SEED_ENV_VAR, seed);
            seed
        }
    }
}
