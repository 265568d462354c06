//! Modular arithmetic utilities.
//!
//! Every generator builds on the same three operations: `gcd`, a left-fold
//! `lcm`, and the divisor-freedom predicate. Zero divisors are skipped
//! everywhere instead of faulting on modulo-by-zero.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Greatest common divisor. `gcd(0, 0) == 0`.
#[must_use]
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }
    a.gcd(b)
}

/// Least common multiple of `values`, folded left as `a * b / gcd(a, b)`.
///
/// Zero entries are ignored. An empty (or all-zero) input yields 1.
#[must_use]
pub fn lcm(values: &[BigUint]) -> BigUint {
    values
        .iter()
        .filter(|v| !v.is_zero())
        .fold(BigUint::one(), |acc, v| {
            let g = gcd(&acc, v);
            debug_assert!(!g.is_zero());
            (&acc * v) / g
        })
}

/// First divisor in `divisors` that divides `value`, in the order given.
#[must_use]
pub fn first_divisor<'a>(value: &BigUint, divisors: &'a [BigUint]) -> Option<&'a BigUint> {
    divisors
        .iter()
        .filter(|d| !d.is_zero())
        .find(|d| (value % *d).is_zero())
}

/// True when no non-zero divisor in `divisors` divides `value`.
#[must_use]
pub fn is_divisor_free(value: &BigUint, divisors: &[BigUint]) -> bool {
    first_divisor(value, divisors).is_none()
}

/// `|a - b|` without leaving unsigned arithmetic.
#[must_use]
pub fn abs_diff(a: &BigUint, b: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// True when `value` is even.
#[must_use]
pub fn is_even(value: &BigUint) -> bool {
    value.is_even()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_gcd_basics() {
        assert_eq!(gcd(&big(12), &big(18)), big(6));
        assert_eq!(gcd(&big(17), &big(5)), big(1));
        assert_eq!(gcd(&big(0), &big(9)), big(9));
        assert_eq!(gcd(&big(9), &big(0)), big(9));
        assert_eq!(gcd(&big(0), &big(0)), big(0));
    }

    #[test]
    fn test_lcm_fold() {
        assert_eq!(lcm(&[big(3), big(5)]), big(15));
        assert_eq!(lcm(&[big(3), big(5), big(7)]), big(105));
        assert_eq!(lcm(&[big(4), big(6)]), big(12));
        assert_eq!(lcm(&[big(7)]), big(7));
    }

    #[test]
    fn test_lcm_skips_zero() {
        assert_eq!(lcm(&[big(0), big(4), big(0), big(6)]), big(12));
        assert_eq!(lcm(&[]), big(1));
    }

    #[test]
    fn test_first_divisor_order_and_zero_guard() {
        let divisors = [big(0), big(5), big(3)];
        assert_eq!(first_divisor(&big(15), &divisors), Some(&big(5)));
        assert_eq!(first_divisor(&big(9), &divisors), Some(&big(3)));
        assert_eq!(first_divisor(&big(7), &divisors), None);
        assert!(is_divisor_free(&big(7), &divisors));
    }

    #[test]
    fn test_abs_diff() {
        assert_eq!(abs_diff(&big(105), &big(128)), big(23));
        assert_eq!(abs_diff(&big(128), &big(105)), big(23));
        assert_eq!(abs_diff(&big(4), &big(4)), big(0));
    }

    proptest! {
        #[test]
        fn prop_gcd_divides_both(a in 1u64..1_000_000, b in 1u64..1_000_000) {
            let g = gcd(&big(a), &big(b));
            prop_assert!((big(a) % &g).is_zero());
            prop_assert!((big(b) % &g).is_zero());
        }

        #[test]
        fn prop_lcm_is_common_multiple(values in proptest::collection::vec(1u64..500, 1..6)) {
            let bigs: Vec<BigUint> = values.iter().copied().map(big).collect();
            let l = lcm(&bigs);
            for v in &bigs {
                prop_assert!((&l % v).is_zero());
            }
        }

        #[test]
        fn prop_lcm_order_independent(a in 1u64..10_000, b in 1u64..10_000, c in 1u64..10_000) {
            prop_assert_eq!(
                lcm(&[big(a), big(b), big(c)]),
                lcm(&[big(c), big(a), big(b)])
            );
        }
    }
}
