//! Method 2: LCM-power-offset generator, enhanced variant.
//!
//! A 2-D search: for `a = 1..=max_power`, every auxiliary prime `q` not in
//! `D`, and `b = 1..=max_prime_power`, the candidates `2^a·L + q^b` and
//! `|2^a·L - q^b|` are tested in that order.

use std::ops::ControlFlow;

use df_core::{DivisorSet, GeneratedValue, GenerationResult, Op, Provenance, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::methods::power_offset;
use crate::search::{ordered_search, Odometer, SearchConfig};

/// Method name used in results and logs.
pub const METHOD: &str = "enhanced_power_offset";

/// Method 2 enhanced-variant parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedConfig {
    /// Auxiliary primes; members of the divisor set are dropped
    pub extra_primes: Vec<u64>,
    /// Largest exponent `a` of the `2^a` multiplier
    pub max_power: u32,
    /// Largest exponent `b` of the auxiliary prime
    pub max_prime_power: u32,
}

impl Default for EnhancedConfig {
    fn default() -> Self {
        Self {
            extra_primes: vec![23, 29, 31, 37, 41, 43, 47],
            max_power: 10,
            max_prime_power: 5,
        }
    }
}

/// Auxiliary primes with divisor-set members and repeats removed.
pub fn clean_primes(extra_primes: &[u64], divisors: &DivisorSet) -> Result<Vec<u64>> {
    let mut clean = Vec::with_capacity(extra_primes.len());
    for &q in extra_primes {
        if q < 2 {
            return Err(df_core::Error::parameter(
                "extra_primes",
                format!("{} is below 2", q),
            ));
        }
        if !divisors.contains_u64(q) && !clean.contains(&q) {
            clean.push(q);
        }
    }
    Ok(clean)
}

/// Generate up to `count` values of the form `2^a·L ± q^b`.
#[tracing::instrument(skip_all, fields(method = METHOD, count = count))]
pub fn generate(
    divisors: &DivisorSet,
    count: usize,
    config: &EnhancedConfig,
    search: &SearchConfig,
) -> Result<GenerationResult> {
    let primes = clean_primes(&config.extra_primes, divisors)?;
    if count == 0 {
        return Ok(GenerationResult::empty(METHOD));
    }

    let lcm_label = divisors.lcm_label();
    // multiples[a - 1] = 2^a · L
    let multiples: Vec<BigUint> = (1..=config.max_power)
        .map(|a| divisors.lcm() << a as usize)
        .collect();
    // prime_powers[i][b - 1] = primes[i]^b
    let prime_powers: Vec<Vec<BigUint>> = primes
        .iter()
        .map(|&q| {
            (1..=config.max_prime_power)
                .map(|b| BigUint::from(q).pow(b))
                .collect()
        })
        .collect();

    let grid = Odometer::new([
        multiples.len(),
        primes.len(),
        config.max_prime_power as usize,
        Op::BOTH.len(),
    ]);
    tracing::debug!(
        primes = ?primes,
        max_power = config.max_power,
        max_prime_power = config.max_prime_power,
        candidates = grid.space_size(),
        workers = search.workers,
        "searching"
    );

    let mut values = Vec::with_capacity(count);
    let tally = ordered_search(
        grid,
        search,
        |&[a, q, b, op]| {
            let value =
                power_offset::candidate(&multiples[a], Op::BOTH[op], &prime_powers[q][b]);
            divisors.admits(&value).then_some(value)
        },
        |[a, q, b, op], value| {
            values.push(GeneratedValue::new(
                value,
                Provenance::ScaledPowerOffset {
                    two_exponent: a as u32 + 1,
                    lcm_label: lcm_label.clone(),
                    op: Op::BOTH[op],
                    prime: BigUint::from(primes[q]),
                    exponent: b as u32 + 1,
                },
            ));
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
    use df_core::arith::abs_diff;

    #[test]
    fn test_first_values_follow_grid_order() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let result = generate(&divisors, 4, &EnhancedConfig::default(), &SearchConfig::default())
            .unwrap();

        // 2·105 = 210; 210 ± 23 = 233, 187; 210 ± 529 = 739, 319
        assert_eq!(
            result.numbers(),
            vec![
                BigUint::from(233u32),
                BigUint::from(187u32),
                BigUint::from(739u32),
                BigUint::from(319u32)
            ]
        );
        assert_eq!(
            result.values[0].to_string(),
            "(2^1×LCM{3,5,7}) + 23^1 = 233"
        );
        assert_eq!(
            result.values[1].to_string(),
            "|(2^1×LCM{3,5,7}) - 23^1| = 187"
        );
    }

    #[test]
    fn test_values_match_provenance() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7, 11, 13, 17, 19]).unwrap();
        let result = generate(&divisors, 200, &EnhancedConfig::default(), &SearchConfig::default())
            .unwrap();
        assert!(result.validate(&divisors).passes());

        for generated in &result.values {
            let Provenance::ScaledPowerOffset {
                two_exponent,
                op,
                prime,
                exponent,
                ..
            } = &generated.provenance
            else {
                panic!("unexpected provenance");
            };
            let multiple = divisors.lcm() << *two_exponent as usize;
            let power = prime.pow(*exponent);
            let expected = match op {
                Op::Add => &multiple + &power,
                Op::Sub => abs_diff(&multiple, &power),
            };
            assert_eq!(generated.value, expected);
        }
    }

    #[test]
    fn test_divisor_primes_are_dropped() {
        let divisors = DivisorSet::from_u64s(&[3, 23]).unwrap();
        let primes = clean_primes(&[23, 29, 29, 31], &divisors).unwrap();
        assert_eq!(primes, vec![29, 31]);
        assert!(clean_primes(&[0], &divisors).is_err());
    }

    #[test]
    fn test_exhaustion_and_stats() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let config = EnhancedConfig {
            extra_primes: vec![11, 13],
            max_power: 2,
            max_prime_power: 2,
        };
        let result = generate(&divisors, 1000, &config, &SearchConfig::default()).unwrap();
        assert!(result.is_exhausted());
        assert_eq!(result.stats.tested, 2 * 2 * 2 * 2);
        assert_eq!(result.stats.valid as usize, result.len());
        assert_eq!(
            result.stats.added + result.stats.subtracted,
            result.len() as u64
        );
        let (lo, hi) = result.stats.two_power_span.unwrap();
        assert!(lo >= 1 && hi <= 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7, 11, 13]).unwrap();
        let config = EnhancedConfig {
            max_power: 20,
            max_prime_power: 10,
            ..Default::default()
        };
        let sequential = generate(&divisors, 300, &config, &SearchConfig::default()).unwrap();
        let parallel = generate(
            &divisors,
            300,
            &config,
            &SearchConfig {
                workers: 4,
                batch_size: 97,
            },
        )
        .unwrap();
        assert_eq!(sequential.values, parallel.values);
        assert_eq!(sequential.stats, parallel.stats);
    }

    #[test]
    fn test_zero_count() {
        let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
        let result =
            generate(&divisors, 0, &EnhancedConfig::default(), &SearchConfig::default()).unwrap();
        assert!(result.is_empty());
        assert!(!result.is_exhausted());
        assert_eq!(result.stats.tested, 0);
    }
}
