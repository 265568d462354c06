//! Method 2: LCM-power-offset generator, base variant.
//!
//! For `p = 1, 2, ..= max_power` the candidates `L + base^p` and
//! `|L - base^p|` are tested in that order. Each branch is a separate test
//! in the statistics.

use df_core::arith::abs_diff;
use df_core::{DivisorSet, GeneratedValue, GenerationResult, Op, Provenance, Result, Tally};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Method name used in results and logs.
pub const METHOD: &str = "power_offset";

/// Method 2 base-variant parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerOffsetConfig {
    /// Base of the power offset (at least 2)
    pub base: u64,
    /// Largest exponent tried
    pub max_power: u32,
}

impl Default for PowerOffsetConfig {
    fn default() -> Self {
        Self {
            base: 2,
            max_power: 100,
        }
    }
}

/// The candidate `L op power`, with subtraction taken absolute.
#[must_use]
pub fn candidate(lcm: &BigUint, op: Op, power: &BigUint) -> BigUint {
    match op {
        Op::Add => lcm + power,
        Op::Sub => abs_diff(lcm, power),
    }
}

/// Generate up to `count` values of the form `L ± base^p`.
#[tracing::instrument(skip_all, fields(method = METHOD, count = count))]
pub fn generate(
    divisors: &DivisorSet,
    count: usize,
    config: &PowerOffsetConfig,
) -> Result<GenerationResult> {
    if config.base < 2 {
        return Err(df_core::Error::parameter("base", "must be at least 2"));
    }
    if count == 0 {
        return Ok(GenerationResult::empty(METHOD));
    }

    let lcm = divisors.lcm();
    let lcm_label = divisors.lcm_label();
    let base = BigUint::from(config.base);
    tracing::debug!(lcm = %lcm, base = config.base, max_power = config.max_power, "searching");

    let mut values = Vec::with_capacity(count);
    let mut tally = Tally::default();
    let mut power = BigUint::from(1u32);

    'powers: for exponent in 1..=config.max_power {
        power *= &base;
        for op in Op::BOTH {
            let value = candidate(lcm, op, &power);
            let accepted = divisors.admits(&value);
            tally.record(accepted);
            if accepted {
                values.push(GeneratedValue::new(
                    value,
                    Provenance::PowerOffset {
                        lcm_label: lcm_label.clone(),
                        op,
                        base: base.clone(),
                        exponent,
                    },
                ));
                if values.len() >= count {
                    break 'powers;
                }
            }
        }
    }

    Ok(GenerationResult::finish(METHOD, count, values, tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_three_five_seven() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let result = generate(&divisors, 3, &PowerOffsetConfig::default()).unwrap();

        assert!(!result.is_exhausted());
        assert_eq!(
            result.numbers(),
            vec![BigUint::from(107u32), BigUint::from(103u32), BigUint::from(109u32)]
        );
        for generated in &result.values {
            let Provenance::PowerOffset { op, exponent, .. } = &generated.provenance else {
                panic!("unexpected provenance");
            };
            let power = BigUint::from(2u32).pow(*exponent);
            assert_eq!(generated.value, candidate(&BigUint::from(105u32), *op, &power));
        }
        assert!(result.validate(&divisors).passes());
    }

    #[test]
    fn test_success_rate_counts_both_branches() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let result = generate(&divisors, 3, &PowerOffsetConfig::default()).unwrap();
        // p=1: 107, 103 accepted; p=2: 109 accepted and stop.
        assert_eq!(result.stats.tested, 3);
        assert_eq!(result.stats.valid, 3);
        assert_eq!(result.stats.added, 2);
        assert_eq!(result.stats.subtracted, 1);
    }

    #[test]
    fn test_small_max_power_exhausts() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let config = PowerOffsetConfig {
            max_power: 2,
            ..Default::default()
        };
        let result = generate(&divisors, 50, &config).unwrap();
        assert!(result.is_exhausted());
        assert!(result.len() < 50);
        assert_eq!(result.stats.tested, 4);
        assert!(result.validate(&divisors).passes());
    }

    #[test]
    fn test_subtraction_is_absolute() {
        // L = 3, 2^2 = 4 → |3 - 4| = 1, 3 + 4 = 7
        let divisors = DivisorSet::from_u64s(&[3]).unwrap();
        let config = PowerOffsetConfig {
            max_power: 2,
            ..Default::default()
        };
        let result = generate(&divisors, 10, &config).unwrap();
        let numbers = result.numbers();
        assert!(numbers.contains(&BigUint::from(1u32)));
        assert!(numbers.contains(&BigUint::from(7u32)));
    }

    #[test]
    fn test_rejects_small_base() {
        let divisors = DivisorSet::from_u64s(&[3]).unwrap();
        let config = PowerOffsetConfig {
            base: 1,
            ..Default::default()
        };
        assert!(generate(&divisors, 1, &config).is_err());
    }

    #[test]
    fn test_zero_count() {
        let divisors = DivisorSet::from_u64s(&[3]).unwrap();
        let result = generate(&divisors, 0, &PowerOffsetConfig::default()).unwrap();
        assert!(result.is_empty());
        assert!(!result.is_exhausted());
    }
}
