//! Method 3: coprime-sum generator.
//!
//! Searches `(a1·p1)^P1 + (a2·p2)^P2` over bounded multipliers, a fixed
//! prime list and bounded exponents. A combination is accepted when both
//! primes lie outside `D`, the two roots are coprime, at least one root is
//! even, and the sum is divisor-free. The parity rule is a filter only;
//! the divisor check is what guarantees the result.
//!
//! Accepted sums collect into a set. The search stops once the set holds
//! `count` distinct values and returns them in ascending order.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use df_core::arith::{gcd, is_even};
use df_core::{DivisorSet, GeneratedValue, GenerationResult, PowerTerm, Provenance, Result};
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::search::{ordered_search, Odometer, SearchConfig};

/// Method name used in results and logs.
pub const METHOD: &str = "coprime_sum";

/// Primes below 100.
pub const PRIMES_BELOW_100: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Method 3 parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoprimeSumConfig {
    /// Multipliers `a1, a2` range over `1..=multiplier_max`
    pub multiplier_max: u64,
    /// Exponents `P1, P2` range over `1..=exponent_max`
    pub exponent_max: u32,
    /// Prime list; members of the divisor set are dropped
    pub primes: Vec<u64>,
}

impl Default for CoprimeSumConfig {
    fn default() -> Self {
        Self {
            multiplier_max: 6,
            exponent_max: 6,
            primes: PRIMES_BELOW_100.to_vec(),
        }
    }
}

/// One point of the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoprimeSumParams {
    pub a1: u64,
    pub p1: u64,
    pub a2: u64,
    pub p2: u64,
    pub e1: u32,
    pub e2: u32,
}

impl CoprimeSumParams {
    /// Left term `(a1·p1)^e1`.
    #[must_use]
    pub fn left(&self) -> PowerTerm {
        PowerTerm {
            multiplier: self.a1,
            base: BigUint::from(self.p1),
            exponent: self.e1,
        }
    }

    /// Right term `(a2·p2)^e2`.
    #[must_use]
    pub fn right(&self) -> PowerTerm {
        PowerTerm {
            multiplier: self.a2,
            base: BigUint::from(self.p2),
            exponent: self.e2,
        }
    }

    /// `(a1·p1)^e1 + (a2·p2)^e2`.
    #[must_use]
    pub fn total(&self) -> BigUint {
        self.left().value() + self.right().value()
    }
}

/// Acceptance predicate. Returns the sum when every condition holds.
#[must_use]
pub fn accept(params: &CoprimeSumParams, divisors: &DivisorSet) -> Option<BigUint> {
    if divisors.contains_u64(params.p1) || divisors.contains_u64(params.p2) {
        return None;
    }

    let left = params.left();
    let right = params.right();
    let (root1, root2) = (left.root(), right.root());
    if !gcd(&root1, &root2).is_one() {
        return None;
    }
    if !is_even(&root1) && !is_even(&root2) {
        return None;
    }

    let total = left.value() + right.value();
    divisors.admits(&total).then_some(total)
}

/// Enumerate the search space in nested order `a1, a2, p1, p2, P1, P2`.
pub fn parameter_space(
    config: &CoprimeSumConfig,
    primes: &[u64],
) -> impl Iterator<Item = CoprimeSumParams> {
    let multipliers = config.multiplier_max as usize;
    let exponents = config.exponent_max as usize;
    let primes = primes.to_vec();
    Odometer::new([multipliers, multipliers, primes.len(), primes.len(), exponents, exponents])
        .map(move |[a1, a2, p1, p2, e1, e2]| CoprimeSumParams {
            a1: a1 as u64 + 1,
            p1: primes[p1],
            a2: a2 as u64 + 1,
            p2: primes[p2],
            e1: e1 as u32 + 1,
            e2: e2 as u32 + 1,
        })
}

/// Primes usable by the search: below-2 entries rejected, divisor-set
/// members and repeats dropped.
pub fn allowed_primes(primes: &[u64], divisors: &DivisorSet) -> Result<Vec<u64>> {
    let mut allowed = Vec::with_capacity(primes.len());
    for &p in primes {
        if p < 2 {
            return Err(df_core::Error::parameter("primes", format!("{} is below 2", p)));
        }
        if !divisors.contains_u64(p) && !allowed.contains(&p) {
            allowed.push(p);
        }
    }
    Ok(allowed)
}

/// Generate up to `count` distinct coprime sums, ascending.
#[tracing::instrument(skip_all, fields(method = METHOD, count = count))]
pub fn generate(
    divisors: &DivisorSet,
    count: usize,
    config: &CoprimeSumConfig,
    search: &SearchConfig,
) -> Result<GenerationResult> {
    let primes = allowed_primes(&config.primes, divisors)?;
    if count == 0 {
        return Ok(GenerationResult::empty(METHOD));
    }

    tracing::debug!(
        primes = primes.len(),
        multiplier_max = config.multiplier_max,
        exponent_max = config.exponent_max,
        workers = search.workers,
        "searching"
    );

    let mut found: BTreeMap<BigUint, Provenance> = BTreeMap::new();
    let tally = ordered_search(
        parameter_space(config, &primes),
        search,
        |params| accept(params, divisors),
        |params, total| {
            found.entry(total).or_insert_with(|| Provenance::CoprimeSum {
                left: params.left(),
                right: params.right(),
            });
            if found.len() >= count {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
    );

    let values = found
        .into_iter()
        .map(|(value, provenance)| GeneratedValue::new(value, provenance))
        .collect();

    Ok(GenerationResult::finish(METHOD, count, values, tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(a1: u64, p1: u64, a2: u64, p2: u64, e1: u32, e2: u32) -> CoprimeSumParams {
        CoprimeSumParams {
            a1,
            p1,
            a2,
            p2,
            e1,
            e2,
        }
    }

    #[test]
    fn test_accept_conditions() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();

        // 2 + 11 = 13
        assert_eq!(accept(&params(1, 2, 1, 11, 1, 1), &divisors), Some(BigUint::from(13u32)));
        // p2 ∈ D
        assert_eq!(accept(&params(1, 2, 1, 7, 1, 1), &divisors), None);
        // roots 2 and 2·11 share a factor
        assert_eq!(accept(&params(1, 2, 2, 11, 1, 1), &divisors), None);
        // both roots odd: 11 + 13
        assert_eq!(accept(&params(1, 11, 1, 13, 1, 1), &divisors), None);
        // 2 + 13 = 15 divisible by 3
        assert_eq!(accept(&params(1, 2, 1, 13, 1, 1), &divisors), None);
        // same prime twice is never coprime
        assert_eq!(accept(&params(1, 11, 2, 11, 1, 1), &divisors), None);
    }

    #[test]
    fn test_parameter_space_order() {
        let config = CoprimeSumConfig {
            multiplier_max: 2,
            exponent_max: 2,
            primes: vec![2, 11],
        };
        let space: Vec<CoprimeSumParams> = parameter_space(&config, &config.primes).collect();
        assert_eq!(space.len(), 2 * 2 * 2 * 2 * 2 * 2);
        assert_eq!(space[0], params(1, 2, 1, 2, 1, 1));
        assert_eq!(space[1], params(1, 2, 1, 2, 1, 2));
        assert_eq!(space[2], params(1, 2, 1, 2, 2, 1));
        assert_eq!(space[4], params(1, 2, 1, 11, 1, 1));
        assert_eq!(space.last().copied(), Some(params(2, 11, 2, 11, 2, 2)));
    }

    #[test]
    fn test_scenario_three_five_seven() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let result = generate(&divisors, 10, &CoprimeSumConfig::default(), &SearchConfig::default())
            .unwrap();

        assert_eq!(result.len(), 10);
        assert!(!result.is_exhausted());
        let numbers = result.numbers();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "sorted and distinct");
        assert!(result.validate(&divisors).passes());

        for generated in &result.values {
            let Provenance::CoprimeSum { left, right } = &generated.provenance else {
                panic!("unexpected provenance");
            };
            assert!(!divisors.contains(&left.base));
            assert!(!divisors.contains(&right.base));
            assert!(gcd(&left.root(), &right.root()).is_one());
            assert!(is_even(&left.root()) || is_even(&right.root()));
            assert_eq!(generated.value, left.value() + right.value());
        }
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let config = CoprimeSumConfig {
            multiplier_max: 1,
            exponent_max: 1,
            primes: vec![2, 11, 13],
        };
        // Roots 2, 11, 13 with exponent 1: 2+11=13, 11+2=13, 2+13=15 (rejected), 13+2=15
        let result = generate(&divisors, 10, &config, &SearchConfig::default()).unwrap();
        assert!(result.is_exhausted());
        assert_eq!(result.numbers(), vec![BigUint::from(13u32)]);
        assert_eq!(result.stats.tested, 9);
        assert_eq!(result.stats.valid, 2);
    }

    #[test]
    fn test_empty_prime_list() {
        let divisors = DivisorSet::from_u64s(&[3]).unwrap();
        let config = CoprimeSumConfig {
            primes: vec![3],
            ..Default::default()
        };
        let result = generate(&divisors, 5, &config, &SearchConfig::default()).unwrap();
        assert!(result.is_empty());
        assert!(result.is_exhausted());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7, 11, 13, 17]).unwrap();
        let config = CoprimeSumConfig::default();
        let sequential = generate(&divisors, 500, &config, &SearchConfig::default()).unwrap();
        let parallel = generate(
            &divisors,
            500,
            &config,
            &SearchConfig {
                workers: 3,
                batch_size: 1000,
            },
        )
        .unwrap();
        assert_eq!(sequential.values, parallel.values);
        assert_eq!(sequential.stats, parallel.stats);
    }

    #[test]
    fn test_zero_count() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let search = SearchConfig {
            workers: 4,
            ..Default::default()
        };
        let result = generate(&divisors, 0, &CoprimeSumConfig::default(), &search).unwrap();
        assert!(result.is_empty());
        assert!(!result.is_exhausted());
        assert_eq!(result.stats.tested, 0);
    }
}
