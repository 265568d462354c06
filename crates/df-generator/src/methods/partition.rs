//! Method 3, prime-partition variant.
//!
//! Splits the sorted divisor set into a non-empty `Left` and `Right` and
//! tests sums of powered products across the split:
//!
//! ```text
//! case 1:  2^a · ∏Left^l  +  ∏Right^r
//! case 2:  ∏Left^l        +  2^a · ∏Right^r
//! ```
//!
//! For pairwise-coprime `D` each `d ∈ Left` divides the first term but not
//! the second, so the sum avoids `d`; the explicit divisor check still
//! decides acceptance. Duplicate sums collapse, first discovery wins.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;

use df_core::value::PartitionTerm;
use df_core::{DivisorSet, GeneratedValue, GenerationResult, Provenance, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::search::{ordered_search, Combinations, Odometer, SearchConfig};

/// Method name used in results and logs.
pub const METHOD: &str = "prime_partition";

/// Prime-partition parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Exponents of the `2^a` factor range over `1..=two_power_max`
    pub two_power_max: u32,
    /// Exponents `l, r` range over `1..=exponent_max`
    pub exponent_max: u32,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            two_power_max: 4,
            exponent_max: 4,
        }
    }
}

/// One point of the partition search space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionCandidate {
    /// Indices into the sorted divisors forming `Left`
    pub left: Arc<[usize]>,
    /// Case 1 puts `2^a` on the left, case 2 on the right
    pub two_on_left: bool,
    pub two_exponent: u32,
    pub left_exponent: u32,
    pub right_exponent: u32,
}

impl PartitionCandidate {
    /// Build both terms over `sorted` divisors.
    #[must_use]
    pub fn terms(&self, sorted: &[BigUint]) -> (PartitionTerm, PartitionTerm) {
        let mut left_factors = Vec::with_capacity(self.left.len());
        let mut right_factors = Vec::with_capacity(sorted.len() - self.left.len());
        for (i, d) in sorted.iter().enumerate() {
            if self.left.contains(&i) {
                left_factors.push(d.clone());
            } else {
                right_factors.push(d.clone());
            }
        }

        let left = PartitionTerm {
            two_exponent: self.two_on_left.then_some(self.two_exponent),
            factors: left_factors,
            exponent: self.left_exponent,
        };
        let right = PartitionTerm {
            two_exponent: (!self.two_on_left).then_some(self.two_exponent),
            factors: right_factors,
            exponent: self.right_exponent,
        };
        (left, right)
    }
}

/// Enumerate candidates: subsets by increasing size (lexicographic within a
/// size), then case 1 before case 2, then `a`, `l`, `r`.
pub fn candidate_space(
    divisors_count: usize,
    config: &PartitionConfig,
) -> impl Iterator<Item = PartitionCandidate> {
    let dims = [
        2,
        config.two_power_max as usize,
        config.exponent_max as usize,
        config.exponent_max as usize,
    ];
    (1..divisors_count)
        .flat_map(move |size| Combinations::new(divisors_count, size))
        .flat_map(move |left| {
            let left: Arc<[usize]> = left.into();
            Odometer::new(dims).map(move |[case, a, l, r]| PartitionCandidate {
                left: Arc::clone(&left),
                two_on_left: case == 0,
                two_exponent: a as u32 + 1,
                left_exponent: l as u32 + 1,
                right_exponent: r as u32 + 1,
            })
        })
}

/// Generate up to `count` distinct partition sums in discovery order.
#[tracing::instrument(skip_all, fields(method = METHOD, count = count))]
pub fn generate(
    divisors: &DivisorSet,
    count: usize,
    config: &PartitionConfig,
    search: &SearchConfig,
) -> Result<GenerationResult> {
    if count == 0 {
        return Ok(GenerationResult::empty(METHOD));
    }
    if divisors.len() < 2 {
        tracing::debug!("a single divisor admits no partition");
    }

    let mut sorted: Vec<BigUint> = divisors.as_slice().to_vec();
    sorted.sort();

    let mut seen: HashSet<BigUint> = HashSet::new();
    let mut values = Vec::with_capacity(count);
    let tally = ordered_search(
        candidate_space(sorted.len(), config),
        search,
        |candidate| {
            let (left, right) = candidate.terms(&sorted);
            let total = left.value() + right.value();
            divisors.admits(&total).then_some(total)
        },
        |candidate, total| {
            if seen.insert(total.clone()) {
                let (left, right) = candidate.terms(&sorted);
                values.push(GeneratedValue::new(total, Provenance::Partition { left, right }));
            }
            if values.len() >= count {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
    );

    Ok(GenerationResult::finish(METHOD, count, values, tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidates() {
        let divisors = DivisorSet::from_u64s(&[5, 3]).unwrap();
        let result = generate(&divisors, 3, &PartitionConfig::default(), &SearchConfig::default())
            .unwrap();

        // Left = {3}, Right = {5}, case 1, a = 1:
        // 2·3 + 5 = 11, 2·3 + 25 = 31, 2·3 + 125 = 131
        assert_eq!(
            result.numbers(),
            vec![BigUint::from(11u32), BigUint::from(31u32), BigUint::from(131u32)]
        );
        assert_eq!(result.values[0].to_string(), "2^1*3^1 + 5^1 = 11");
    }

    #[test]
    fn test_candidate_space_size() {
        let config = PartitionConfig {
            two_power_max: 2,
            exponent_max: 3,
        };
        // 3 divisors: 6 proper non-empty subsets, 2 cases, 2·3·3 exponent triples
        assert_eq!(candidate_space(3, &config).count(), 6 * 2 * 2 * 3 * 3);
        assert_eq!(candidate_space(1, &config).count(), 0);
    }

    #[test]
    fn test_values_are_divisor_free_and_distinct() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7, 11]).unwrap();
        let result = generate(&divisors, 400, &PartitionConfig::default(), &SearchConfig::default())
            .unwrap();
        assert!(result.validate(&divisors).passes());

        let distinct: HashSet<&BigUint> = result.values.iter().map(|g| &g.value).collect();
        assert_eq!(distinct.len(), result.len());

        for generated in &result.values {
            let Provenance::Partition { left, right } = &generated.provenance else {
                panic!("unexpected provenance");
            };
            assert_eq!(generated.value, left.value() + right.value());
            assert_eq!(left.factors.len() + right.factors.len(), 4);
            assert!(left.two_exponent.is_some() != right.two_exponent.is_some());
        }
    }

    #[test]
    fn test_single_divisor_exhausts() {
        let divisors = DivisorSet::from_u64s(&[3]).unwrap();
        let result = generate(&divisors, 5, &PartitionConfig::default(), &SearchConfig::default())
            .unwrap();
        assert!(result.is_empty());
        assert!(result.is_exhausted());
        assert_eq!(result.stats.tested, 0);
    }

    #[test]
    fn test_duplicates_collapse() {
        // {3,5}: case 2 of Left={5} repeats case 1 of Left={3}.
        let divisors = DivisorSet::from_u64s(&[3, 5]).unwrap();
        let result = generate(&divisors, 10_000, &PartitionConfig::default(), &SearchConfig::default())
            .unwrap();
        assert!(result.is_exhausted());
        assert!(result.stats.valid > result.len() as u64);
    }

    #[test]
    fn test_zero_count() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let result =
            generate(&divisors, 0, &PartitionConfig::default(), &SearchConfig::default()).unwrap();
        assert!(result.is_empty());
        assert!(!result.is_exhausted());
        assert_eq!(result.stats.tested, 0);
    }
}
