//! Product of the first `n` numbers in a list.

use df_core::decimal::{self, serialize_biguint};
use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

/// Product report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductReport {
    pub requested: usize,
    /// Numbers actually multiplied
    pub used: usize,
    /// True when `requested` exceeded the list length
    pub clamped: bool,
    /// Decimal digits in `product`
    pub digits: u64,
    #[serde(serialize_with = "serialize_biguint")]
    pub product: BigUint,
}

impl ProductReport {
    /// `Length: <digits>` then `Result: <product>`, one per line.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        if self.clamped {
            report.push_str(&format!(
                "Limit {} exceeds the {} available numbers; using all of them\n",
                self.requested, self.used
            ));
        }
        report.push_str(&format!("Length: {}\n", self.digits));
        report.push_str(&format!("Result: {}\n", self.product));
        report
    }
}

/// Multiply the first `limit` numbers. An empty product is 1.
#[must_use]
pub fn product_of_first(numbers: &[BigUint], limit: usize) -> ProductReport {
    let clamped = limit > numbers.len();
    let used = limit.min(numbers.len());
    if clamped {
        tracing::warn!(limit, available = numbers.len(), "product limit clamped");
    }

    let product = numbers[..used]
        .iter()
        .fold(BigUint::one(), |acc, n| acc * n);
    let digits = decimal::digit_count(&product);

    ProductReport {
        requested: limit,
        used,
        clamped,
        digits,
        product,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().copied().map(BigUint::from).collect()
    }

    #[test]
    fn test_product_of_prefix() {
        let report = product_of_first(&big(&[2, 3, 5, 7, 11]), 3);
        assert_eq!(report.product, BigUint::from(30u32));
        assert_eq!(report.used, 3);
        assert_eq!(report.digits, 2);
        assert!(!report.clamped);
        assert_eq!(report.format_report(), "Length: 2\nResult: 30\n");
    }

    #[test]
    fn test_limit_clamped_to_list() {
        let report = product_of_first(&big(&[7, 11]), 10);
        assert!(report.clamped);
        assert_eq!(report.used, 2);
        assert_eq!(report.product, BigUint::from(77u32));
        assert!(report.format_report().starts_with("Limit 10 exceeds"));
    }

    #[test]
    fn test_empty_product_is_one() {
        let report = product_of_first(&big(&[5]), 0);
        assert_eq!(report.product, BigUint::one());
        assert_eq!(report.digits, 1);
    }
}
