//! Divisibility screening of a number list against a divisor list.

use df_core::first_divisor;
use num_bigint::BigUint;
use serde::Serialize;

/// Screening result for one number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenOutcome {
    /// 0-based position in the screened list
    pub index: usize,
    #[serde(serialize_with = "df_core::decimal::serialize_opt_biguint")]
    pub witness: Option<BigUint>,
}

impl ScreenOutcome {
    /// True when no divisor divides the number.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.witness.is_none()
    }
}

/// Find, for each number, the first divisor in list order that divides it.
///
/// Zero divisors are skipped. Unlike a [`DivisorSet`](df_core::DivisorSet),
/// the list may hold 1 or repeats: it is screened as given.
#[must_use]
pub fn screen(numbers: &[BigUint], divisors: &[BigUint]) -> Vec<ScreenOutcome> {
    let outcomes: Vec<ScreenOutcome> = numbers
        .iter()
        .enumerate()
        .map(|(index, n)| ScreenOutcome {
            index,
            witness: first_divisor(n, divisors).cloned(),
        })
        .collect();

    let divisible = outcomes.iter().filter(|o| !o.is_clear()).count();
    tracing::info!(
        numbers = numbers.len(),
        divisors = divisors.len(),
        divisible,
        "screening complete"
    );
    outcomes
}

/// Counts over a screening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenSummary {
    pub total: usize,
    pub divisible: usize,
    pub clear: usize,
}

impl ScreenSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[ScreenOutcome]) -> Self {
        let divisible = outcomes.iter().filter(|o| !o.is_clear()).count();
        Self {
            total: outcomes.len(),
            divisible,
            clear: outcomes.len() - divisible,
        }
    }

    /// Single-line summary.
    #[must_use]
    pub fn format_summary(&self) -> String {
        format!(
            "Screened {} numbers: {} divisible, {} clear",
            self.total, self.divisible, self.clear
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().copied().map(BigUint::from).collect()
    }

    #[test]
    fn test_first_divisor_in_list_order() {
        let outcomes = screen(&big(&[30, 49, 101]), &big(&[5, 3, 7]));
        assert_eq!(outcomes[0].witness, Some(BigUint::from(5u32)));
        assert_eq!(outcomes[1].witness, Some(BigUint::from(7u32)));
        assert!(outcomes[2].is_clear());
        assert_eq!(outcomes[2].index, 2);
    }

    #[test]
    fn test_zero_divisors_skipped() {
        let outcomes = screen(&big(&[10, 0]), &big(&[0, 2]));
        assert_eq!(outcomes[0].witness, Some(BigUint::from(2u32)));
        // Zero is divisible by every non-zero divisor.
        assert_eq!(outcomes[1].witness, Some(BigUint::from(2u32)));
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = screen(&big(&[9, 11, 15, 17]), &big(&[3]));
        let summary = ScreenSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.divisible, 2);
        assert_eq!(summary.clear, 2);
        assert_eq!(
            summary.format_summary(),
            "Screened 4 numbers: 2 divisible, 2 clear"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(screen(&[], &big(&[3])).is_empty());
        let outcomes = screen(&big(&[6]), &[]);
        assert!(outcomes[0].is_clear());
    }
}
