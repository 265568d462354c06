//! Generation results and statistics.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

use crate::decimal;
use crate::divisor_set::DivisorSet;
use crate::validate::{self, ValidationReport};
use crate::value::{GeneratedValue, Op};

/// Candidate counters kept by a running search.
///
/// Each generator owns one for the duration of a call. Counters from
/// parallel workers combine with [`Tally::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Candidates evaluated
    pub tested: u64,
    /// Candidates that passed the acceptance predicate
    pub valid: u64,
}

impl Tally {
    /// Record one evaluated candidate.
    pub fn record(&mut self, accepted: bool) {
        self.tested += 1;
        if accepted {
            self.valid += 1;
        }
        debug_assert!(self.valid <= self.tested);
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: Tally) {
        self.tested += other.tested;
        self.valid += other.valid;
    }

    /// `valid / tested * 100`, or 0 when nothing was tested.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.tested == 0 {
            0.0
        } else {
            self.valid as f64 / self.tested as f64 * 100.0
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The requested count was reached.
    Complete,
    /// The bounded search space ran out first.
    Exhausted,
}

/// Aggregate statistics over a generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub tested: u64,
    pub valid: u64,
    pub success_rate: f64,
    /// Values returned to the caller
    pub produced: u64,
    #[serde(serialize_with = "decimal::serialize_opt_biguint")]
    pub min: Option<BigUint>,
    #[serde(serialize_with = "decimal::serialize_opt_biguint")]
    pub max: Option<BigUint>,
    /// Exact mean with two decimals
    pub mean: Option<String>,
    /// Returned values built with an addition branch
    pub added: u64,
    /// Returned values built with a subtraction branch
    pub subtracted: u64,
    /// Smallest and largest `2^a` multiplier exponent among returned values
    pub two_power_span: Option<(u32, u32)>,
}

impl Stats {
    /// Summarize a finished search.
    #[must_use]
    pub fn summarize(tally: Tally, values: &[GeneratedValue]) -> Self {
        let mut min: Option<&BigUint> = None;
        let mut max: Option<&BigUint> = None;
        let mut sum = BigUint::zero();
        let mut added = 0;
        let mut subtracted = 0;
        let mut two_power_span: Option<(u32, u32)> = None;

        for generated in values {
            let v = &generated.value;
            if min.map_or(true, |m| v < m) {
                min = Some(v);
            }
            if max.map_or(true, |m| v > m) {
                max = Some(v);
            }
            sum += v;

            match generated.provenance.op() {
                Some(Op::Add) => added += 1,
                Some(Op::Sub) => subtracted += 1,
                None => {}
            }
            if let Some(a) = generated.provenance.two_exponent() {
                two_power_span = Some(match two_power_span {
                    Some((lo, hi)) => (lo.min(a), hi.max(a)),
                    None => (a, a),
                });
            }
        }

        let produced = values.len() as u64;
        Self {
            tested: tally.tested,
            valid: tally.valid,
            success_rate: tally.success_rate(),
            produced,
            min: min.cloned(),
            max: max.cloned(),
            mean: decimal::format_ratio(&sum, produced, 2),
            added,
            subtracted,
            two_power_span,
        }
    }
}

/// Output of one generator call.
///
/// `values` keeps discovery order, except for set-based methods which
/// return ascending order. `values.len()` never exceeds `requested`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub method: &'static str,
    pub requested: usize,
    pub values: Vec<GeneratedValue>,
    pub stats: Stats,
    pub outcome: SearchOutcome,
}

impl GenerationResult {
    /// Package a finished search. The outcome is `Exhausted` when fewer than
    /// `requested` values were found.
    #[must_use]
    pub fn finish(
        method: &'static str,
        requested: usize,
        values: Vec<GeneratedValue>,
        tally: Tally,
    ) -> Self {
        debug_assert!(values.len() <= requested, "Result exceeds requested count");
        debug_assert!(values.len() as u64 <= tally.valid || tally.tested == 0);

        let outcome = if values.len() >= requested {
            SearchOutcome::Complete
        } else {
            SearchOutcome::Exhausted
        };
        let stats = Stats::summarize(tally, &values);

        Self {
            method,
            requested,
            values,
            stats,
            outcome,
        }
    }

    /// Result of a call with `count == 0`: nothing searched.
    #[must_use]
    pub fn empty(method: &'static str) -> Self {
        Self::finish(method, 0, Vec::new(), Tally::default())
    }

    /// Number of values returned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the search ran out before reaching the requested count.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.outcome == SearchOutcome::Exhausted
    }

    /// The bare integers, in result order.
    #[must_use]
    pub fn numbers(&self) -> Vec<BigUint> {
        self.values.iter().map(|g| g.value.clone()).collect()
    }

    /// Re-check every value against `divisors`.
    #[must_use]
    pub fn validate(&self, divisors: &DivisorSet) -> ValidationReport {
        validate::validate(self.values.iter().map(|g| &g.value), divisors.as_slice())
    }

    /// Human-readable summary.
    #[must_use]
    pub fn format_summary(&self) -> String {
        let status = match self.outcome {
            SearchOutcome::Complete => "COMPLETE",
            SearchOutcome::Exhausted => "EXHAUSTED",
        };
        let mut summary = format!(
            "[{}] {}: {}/{} values\n",
            status,
            self.method,
            self.len(),
            self.requested
        );

        summary.push_str(&format!("  Tested combinations: {}\n", self.stats.tested));
        summary.push_str(&format!("  Valid results found: {}\n", self.stats.valid));
        summary.push_str(&format!("  Success rate: {:.2}%\n", self.stats.success_rate));

        if self.stats.added + self.stats.subtracted > 0 {
            summary.push_str(&format!(
                "  Added cases: {}, subtracted cases: {}\n",
                self.stats.added, self.stats.subtracted
            ));
        }
        if let Some((lo, hi)) = self.stats.two_power_span {
            summary.push_str(&format!("  Power of 2 range: {} to {}\n", lo, hi));
        }

        if let (Some(min), Some(max), Some(mean)) =
            (&self.stats.min, &self.stats.max, &self.stats.mean)
        {
            summary.push_str(&format!("  Minimum: {}\n", min));
            summary.push_str(&format!("  Maximum: {}\n", max));
            summary.push_str(&format!("  Average: {}\n", mean));
        }

        summary
    }
}
