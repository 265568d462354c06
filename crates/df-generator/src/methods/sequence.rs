//! Power sequences `base^e + offset`.
//!
//! Unfiltered sequences meant to be screened afterwards against a divisor
//! list (see `df-audit`). Exponents grow either linearly (`e = 1, 2, 3, ..`)
//! or by doubling (`e = 2, 4, 8, ..`).

use df_core::{GeneratedValue, GenerationResult, Provenance, Result, Tally};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Method name used in results and logs.
pub const METHOD: &str = "power_sequence";

/// Largest `k` for doubling exponents `2^k`.
pub const DOUBLING_TERMS_MAX: u32 = 31;

/// Exponent growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    /// `e = k`
    Linear,
    /// `e = 2^k`
    Doubling,
}

/// Sequence parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub base: u64,
    pub offset: u64,
    /// Terms produced, for `k = 1..=terms`
    pub terms: u32,
    pub growth: Growth,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            base: 5,
            offset: 2,
            terms: 10,
            growth: Growth::Doubling,
        }
    }
}

impl SequenceConfig {
    /// Exponent of the `k`-th term.
    #[must_use]
    pub fn exponent(&self, k: u32) -> u32 {
        match self.growth {
            Growth::Linear => k,
            Growth::Doubling => 1u32 << k,
        }
    }
}

/// Produce the sequence.
#[tracing::instrument(skip_all, fields(method = METHOD, terms = config.terms))]
pub fn generate(config: &SequenceConfig) -> Result<GenerationResult> {
    if config.base < 2 {
        return Err(df_core::Error::parameter("base", "must be at least 2"));
    }
    if config.growth == Growth::Doubling && config.terms > DOUBLING_TERMS_MAX {
        return Err(df_core::Error::parameter(
            "terms",
            format!("doubling exponents allow at most {} terms", DOUBLING_TERMS_MAX),
        ));
    }

    let base = BigUint::from(config.base);
    let offset = BigUint::from(config.offset);
    let mut tally = Tally::default();

    let values: Vec<GeneratedValue> = (1..=config.terms)
        .map(|k| {
            let exponent = config.exponent(k);
            tally.record(true);
            GeneratedValue::new(
                base.pow(exponent) + &offset,
                Provenance::PowerSequence {
                    base: base.clone(),
                    exponent: u64::from(exponent),
                    offset: offset.clone(),
                },
            )
        })
        .collect();

    Ok(GenerationResult::finish(
        METHOD,
        config.terms as usize,
        values,
        tally,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_sequence() {
        let result = generate(&SequenceConfig {
            terms: 3,
            ..Default::default()
        })
        .unwrap();
        // 5^2 + 2, 5^4 + 2, 5^8 + 2
        assert_eq!(
            result.numbers(),
            vec![
                BigUint::from(27u32),
                BigUint::from(627u32),
                BigUint::from(390_627u32)
            ]
        );
        assert_eq!(result.values[2].to_string(), "5^8 + 2 = 390627");
    }

    #[test]
    fn test_linear_sequence() {
        let config = SequenceConfig {
            base: 15,
            offset: 14,
            terms: 4,
            growth: Growth::Linear,
        };
        let result = generate(&config).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result.values[0].value, BigUint::from(29u32));
        assert_eq!(result.values[3].value, BigUint::from(15u32).pow(4) + 14u32);
        assert!(!result.is_exhausted());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(generate(&SequenceConfig {
            base: 1,
            ..Default::default()
        })
        .is_err());
        assert!(generate(&SequenceConfig {
            terms: 32,
            ..Default::default()
        })
        .is_err());
    }
}
