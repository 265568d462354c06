//! Result validation.
//!
//! The validator is the second line of defense behind each generator's
//! acceptance predicate: it re-scans produced values against the divisor
//! set. Any violation it finds is a generator defect, never a caller error.

use num_bigint::BigUint;
use serde::Serialize;

use crate::arith;
use crate::decimal;

/// A produced value that some divisor divides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Position in the scanned sequence (0-based)
    pub position: usize,
    #[serde(serialize_with = "decimal::serialize_biguint")]
    pub value: BigUint,
    /// First divisor found to divide `value`
    #[serde(serialize_with = "decimal::serialize_biguint")]
    pub divisor: BigUint,
}

/// Outcome of re-scanning a value sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Values scanned
    pub total: usize,
    /// Values divisible by at least one divisor
    pub errors_count: usize,
    /// `errors_count / total * 100`, 0 for an empty sequence
    pub error_rate: f64,
    /// Positions of offending values
    pub error_positions: Vec<usize>,
    /// Offending values with a witnessing divisor
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no value is divisible by any divisor.
    #[must_use]
    pub fn passes(&self) -> bool {
        self.errors_count == 0
    }

    /// Fail fast on the first violation.
    pub fn verify(&self) -> Result<(), Violation> {
        match self.violations.first() {
            Some(v) => Err(v.clone()),
            None => Ok(()),
        }
    }

    /// Single-line status for logging.
    #[must_use]
    pub fn format_status(&self) -> String {
        if self.passes() {
            format!("[PASS] {} values, 0 errors (0.00%)", self.total)
        } else {
            format!(
                "[FAIL] {} values, {} errors ({:.2}%)",
                self.total, self.errors_count, self.error_rate
            )
        }
    }

    /// Multi-line report including every violation.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = format!("Validation: {}\n", self.format_status());
        if !self.error_positions.is_empty() {
            report.push_str(&format!("Error positions: {:?}\n", self.error_positions));
        }
        for v in &self.violations {
            report.push_str(&format!(
                "  #{}: {} is divisible by {}\n",
                v.position, v.value, v.divisor
            ));
        }
        report
    }
}

/// Re-check `values` against `divisors`. Zero divisors are skipped.
pub fn validate<'a, I>(values: I, divisors: &[BigUint]) -> ValidationReport
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let mut total = 0;
    let mut violations = Vec::new();

    for (position, value) in values.into_iter().enumerate() {
        total += 1;
        if let Some(divisor) = arith::first_divisor(value, divisors) {
            violations.push(Violation {
                position,
                value: value.clone(),
                divisor: divisor.clone(),
            });
        }
    }

    let errors_count = violations.len();
    debug_assert!(errors_count <= total);

    let error_rate = if total == 0 {
        0.0
    } else {
        errors_count as f64 / total as f64 * 100.0
    };

    if errors_count > 0 {
        tracing::warn!(
            total,
            errors_count,
            error_rate,
            "validation found values divisible by the divisor set"
        );
    }

    ValidationReport {
        total,
        errors_count,
        error_rate,
        error_positions: violations.iter().map(|v| v.position).collect(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bigs(values: &[u64]) -> Vec<BigUint> {
        values.iter().copied().map(BigUint::from).collect()
    }

    #[test]
    fn test_clean_sequence_passes() {
        let divisors = bigs(&[3, 5, 7]);
        let report = validate(&bigs(&[107, 103, 109]), &divisors);
        assert!(report.passes());
        assert_eq!(report.total, 3);
        assert_eq!(report.error_rate, 0.0);
        assert!(report.verify().is_ok());
        assert!(report.format_status().contains("[PASS]"));
    }

    #[test]
    fn test_violations_are_positioned() {
        let divisors = bigs(&[3, 5]);
        let report = validate(&bigs(&[7, 9, 11, 25]), &divisors);
        assert_eq!(report.errors_count, 2);
        assert_eq!(report.error_positions, vec![1, 3]);
        assert!((report.error_rate - 50.0).abs() < f64::EPSILON);

        let first = report.verify().unwrap_err();
        assert_eq!(first.value, BigUint::from(9u32));
        assert_eq!(first.divisor, BigUint::from(3u32));
        assert!(report.format_report().contains("#3: 25 is divisible by 5"));
    }

    #[test]
    fn test_empty_sequence() {
        let empty: Vec<BigUint> = Vec::new();
        let report = validate(&empty, &bigs(&[3]));
        assert_eq!(report.total, 0);
        assert_eq!(report.error_rate, 0.0);
        assert!(report.passes());
    }

    #[test]
    fn test_zero_divisor_skipped() {
        let report = validate(&bigs(&[7]), &bigs(&[0, 2]));
        assert!(report.passes());
    }
}
