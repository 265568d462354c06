//! Decimal rendering of big integers.
//!
//! Big integers are serialized as decimal strings so JSON consumers never
//! truncate them to a float.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use serde::ser::SerializeSeq;
use serde::Serializer;

/// Serialize a `BigUint` as a decimal string.
pub fn serialize_biguint<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// Serialize an optional `BigUint` as a decimal string or `null`.
pub fn serialize_opt_biguint<S: Serializer>(
    value: &Option<BigUint>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Serialize a slice of `BigUint` as an array of decimal strings.
pub fn serialize_biguint_slice<S: Serializer>(
    values: &[BigUint],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for v in values {
        seq.serialize_element(&v.to_string())?;
    }
    seq.end()
}

/// Exact `numerator / denominator` rendered with `places` fractional digits,
/// rounding half up.
///
/// Returns `None` when `denominator` is zero.
#[must_use]
pub fn format_ratio(numerator: &BigUint, denominator: u64, places: u32) -> Option<String> {
    if denominator == 0 {
        return None;
    }

    let scale = BigUint::from(10u32).pow(places);
    let denominator = BigUint::from(denominator);
    let (mut quotient, remainder) = (numerator * &scale).div_rem(&denominator);
    if &remainder * 2u32 >= denominator {
        quotient += 1u32;
    }

    if places == 0 {
        return Some(quotient.to_string());
    }

    let (whole, fraction) = quotient.div_rem(&scale);
    let width = places as usize;
    Some(format!("{}.{:0>width$}", whole, fraction.to_string(), width = width))
}

/// Number of decimal digits in `value` (1 for zero).
#[must_use]
pub fn digit_count(value: &BigUint) -> u64 {
    if value.is_zero() {
        return 1;
    }
    value.to_string().len().to_u64().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ratio_rounds_half_up() {
        let n = BigUint::from(10u32);
        assert_eq!(format_ratio(&n, 4, 2).as_deref(), Some("2.50"));
        assert_eq!(format_ratio(&n, 3, 2).as_deref(), Some("3.33"));
        assert_eq!(format_ratio(&BigUint::from(2u32), 3, 2).as_deref(), Some("0.67"));
        assert_eq!(format_ratio(&BigUint::from(5u32), 2, 0).as_deref(), Some("3"));
    }

    #[test]
    fn test_format_ratio_zero_denominator() {
        assert_eq!(format_ratio(&BigUint::from(1u32), 0, 2), None);
    }

    #[test]
    fn test_format_ratio_huge_numerator() {
        let n = BigUint::from(10u32).pow(40);
        let text = format_ratio(&n, 1, 2).unwrap();
        assert_eq!(text.len(), 41 + 3);
        assert!(text.ends_with(".00"));
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(&BigUint::from(0u32)), 1);
        assert_eq!(digit_count(&BigUint::from(999u32)), 3);
        assert_eq!(digit_count(&BigUint::from(10u32).pow(25)), 26);
    }
}
