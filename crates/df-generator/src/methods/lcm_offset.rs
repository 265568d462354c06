//! Method 1: LCM-offset generator.
//!
//! Candidates are `i × L + 2` for odd `i` and `i × L + 1` for even `i`,
//! where `L = lcm(D)`. A candidate is accepted when it is odd and no divisor
//! divides it. Since every `d ∈ D` divides `L`, the check reduces to the
//! offset, but it is always performed in full.
//!
//! Every even index yields `i × L + 1`, which is odd and leaves remainder 1
//! modulo each divisor, so any valid `D` eventually reaches `count`. The
//! loop itself is unbounded by default; set
//! [`LcmOffsetConfig::max_iterations`] to cap the work per call.

use df_core::{DivisorSet, GeneratedValue, GenerationResult, Provenance, Result, Tally};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use df_core::arith::is_even;

/// Method name used in results and logs.
pub const METHOD: &str = "lcm_offset";

/// Method 1 parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcmOffsetConfig {
    /// First index `i` tried (at least 1)
    pub start_index: u64,
    /// Stop after this many candidates; `None` searches without bound
    pub max_iterations: Option<u64>,
}

impl Default for LcmOffsetConfig {
    fn default() -> Self {
        Self {
            start_index: 1,
            max_iterations: None,
        }
    }
}

/// Offset applied at index `i`: 2 for odd, 1 for even.
#[must_use]
pub fn offset_for(index: u64) -> u8 {
    if index % 2 == 1 {
        2
    } else {
        1
    }
}

/// The candidate `index × lcm + offset_for(index)`.
#[must_use]
pub fn candidate(lcm: &BigUint, index: u64) -> BigUint {
    lcm * index + offset_for(index)
}

/// Acceptance predicate: odd and divisor-free.
#[must_use]
pub fn accepts(value: &BigUint, divisors: &DivisorSet) -> bool {
    !is_even(value) && divisors.admits(value)
}

/// Generate up to `count` odd divisor-free values.
#[tracing::instrument(skip_all, fields(method = METHOD, count = count))]
pub fn generate(
    divisors: &DivisorSet,
    count: usize,
    config: &LcmOffsetConfig,
) -> Result<GenerationResult> {
    if config.start_index == 0 {
        return Err(df_core::Error::parameter("start_index", "must be at least 1"));
    }
    if count == 0 {
        return Ok(GenerationResult::empty(METHOD));
    }

    let lcm = divisors.lcm();
    let lcm_label = divisors.lcm_label();
    tracing::debug!(lcm = %lcm, start_index = config.start_index, max_iterations = ?config.max_iterations, "searching");

    let mut values = Vec::with_capacity(count);
    let mut tally = Tally::default();
    let mut index = Some(config.start_index);

    while let Some(i) = index {
        if values.len() >= count {
            break;
        }
        if config.max_iterations.map_or(false, |max| tally.tested >= max) {
            break;
        }

        let value = candidate(lcm, i);
        let accepted = accepts(&value, divisors);
        tally.record(accepted);
        if accepted {
            values.push(GeneratedValue::new(
                value,
                Provenance::LcmOffset {
                    index: i,
                    lcm_label: lcm_label.clone(),
                    offset: offset_for(i),
                },
            ));
        }

        index = i.checked_add(1);
    }

    Ok(GenerationResult::finish(METHOD, count, values, tally))
}
