//! Validated divisor sets.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use serde::{Serialize, Serializer};

use crate::arith;
use crate::error::{Error, Result};

/// A finite, duplicate-free set of divisors, each at least 2.
///
/// Insertion order is preserved; it determines the order in which the
/// divisor-freedom check tries divisors and the fold order of [`lcm`](Self::lcm).
/// The least common multiple is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisorSet {
    divisors: Vec<BigUint>,
    lcm: BigUint,
}

impl DivisorSet {
    /// Build a set from unsigned values.
    ///
    /// Rejects an empty input and any entry below 2. Repeated entries are
    /// collapsed, keeping the first occurrence.
    pub fn new(values: Vec<BigUint>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyDivisorSet);
        }

        let mut divisors: Vec<BigUint> = Vec::with_capacity(values.len());
        for (position, value) in values.into_iter().enumerate() {
            if value.is_zero() {
                return Err(Error::InvalidDivisor {
                    position,
                    value: value.to_string(),
                    reason: "zero is not a divisor",
                });
            }
            if value.is_one() {
                return Err(Error::InvalidDivisor {
                    position,
                    value: value.to_string(),
                    reason: "1 divides every integer",
                });
            }
            if !divisors.contains(&value) {
                divisors.push(value);
            }
        }

        let lcm = arith::lcm(&divisors);
        debug_assert!(!divisors.is_empty());
        debug_assert!(lcm >= BigUint::from(2u32));

        Ok(Self { divisors, lcm })
    }

    /// Build a set from `u64` values.
    pub fn from_u64s(values: &[u64]) -> Result<Self> {
        Self::new(values.iter().copied().map(BigUint::from).collect())
    }

    /// Build a set from signed values, rejecting negatives.
    pub fn from_signed(values: &[BigInt]) -> Result<Self> {
        let mut unsigned = Vec::with_capacity(values.len());
        for (position, value) in values.iter().enumerate() {
            match value.to_biguint() {
                Some(v) => unsigned.push(v),
                None => {
                    return Err(Error::InvalidDivisor {
                        position,
                        value: value.to_string(),
                        reason: "negative divisors are not allowed",
                    })
                }
            }
        }
        Self::new(unsigned)
    }

    /// Divisors in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[BigUint] {
        &self.divisors
    }

    /// Iterate over the divisors.
    pub fn iter(&self) -> std::slice::Iter<'_, BigUint> {
        self.divisors.iter()
    }

    /// Number of distinct divisors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.divisors.len()
    }

    /// Always false; a `DivisorSet` cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.divisors.is_empty()
    }

    /// Whether `value` is a member of the set.
    #[must_use]
    pub fn contains(&self, value: &BigUint) -> bool {
        self.divisors.contains(value)
    }

    /// Whether the small integer `value` is a member of the set.
    #[must_use]
    pub fn contains_u64(&self, value: u64) -> bool {
        self.contains(&BigUint::from(value))
    }

    /// Least common multiple of the set.
    #[must_use]
    pub fn lcm(&self) -> &BigUint {
        &self.lcm
    }

    /// True when no divisor in the set divides `value`.
    #[must_use]
    pub fn admits(&self, value: &BigUint) -> bool {
        arith::is_divisor_free(value, &self.divisors)
    }

    /// Label used in provenance formulas, e.g. `LCM{3,5,7}`.
    #[must_use]
    pub fn lcm_label(&self) -> String {
        format!("LCM{}", self)
    }
}

impl fmt::Display for DivisorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, d) in self.divisors.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", d)?;
        }
        f.write_str("}")
    }
}

impl FromStr for DivisorSet {
    type Err = Error;

    /// Parse a comma- or whitespace-separated list such as `"3, 5, 7"`.
    fn from_str(s: &str) -> Result<Self> {
        let mut values = Vec::new();
        for (position, token) in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .enumerate()
        {
            let value = token.parse::<BigInt>().map_err(|_| Error::InvalidDivisor {
                position,
                value: token.to_string(),
                reason: "not a decimal integer",
            })?;
            values.push(value);
        }
        Self::from_signed(&values)
    }
}

impl Serialize for DivisorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        crate::decimal::serialize_biguint_slice(&self.divisors, serializer)
    }
}
