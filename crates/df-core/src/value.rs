//! Generated values and their provenance.
//!
//! A [`Provenance`] records the formula that produced a value. It exists for
//! audit output only and is never parsed back.

use std::fmt;

use num_bigint::BigUint;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Offset operator used by the power-offset methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    /// Both branches, in the order they are tried.
    pub const BOTH: [Op; 2] = [Op::Add, Op::Sub];

    /// Operator symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
        }
    }
}

/// A term of the form `(multiplier × base)^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerTerm {
    pub multiplier: u64,
    pub base: BigUint,
    pub exponent: u32,
}

impl PowerTerm {
    /// `multiplier × base`.
    #[must_use]
    pub fn root(&self) -> BigUint {
        &self.base * self.multiplier
    }

    /// `(multiplier × base)^exponent`.
    #[must_use]
    pub fn value(&self) -> BigUint {
        self.root().pow(self.exponent)
    }
}

impl fmt::Display for PowerTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiplier == 1 {
            write!(f, "{}^{}", self.base, self.exponent)
        } else {
            write!(f, "({}×{})^{}", self.multiplier, self.base, self.exponent)
        }
    }
}

/// One side of a prime-partition sum: `[2^a·] ∏ factor^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTerm {
    pub two_exponent: Option<u32>,
    pub factors: Vec<BigUint>,
    pub exponent: u32,
}

impl PartitionTerm {
    /// Evaluate the term.
    #[must_use]
    pub fn value(&self) -> BigUint {
        let mut acc = match self.two_exponent {
            Some(a) => BigUint::from(2u32).pow(a),
            None => BigUint::from(1u32),
        };
        for factor in &self.factors {
            acc *= factor.pow(self.exponent);
        }
        acc
    }
}

impl fmt::Display for PartitionTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(a) = self.two_exponent {
            write!(f, "2^{}", a)?;
            first = false;
        }
        for factor in &self.factors {
            if !first {
                f.write_str("*")?;
            }
            write!(f, "{}^{}", factor, self.exponent)?;
            first = false;
        }
        if first {
            f.write_str("1")?;
        }
        Ok(())
    }
}

/// Formula that produced a generated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// `index × L + offset`
    LcmOffset {
        index: u64,
        lcm_label: String,
        offset: u8,
    },
    /// `L + base^exponent` or `|L - base^exponent|`
    PowerOffset {
        lcm_label: String,
        op: Op,
        base: BigUint,
        exponent: u32,
    },
    /// `2^two_exponent × L ± prime^exponent` (subtraction taken absolute)
    ScaledPowerOffset {
        two_exponent: u32,
        lcm_label: String,
        op: Op,
        prime: BigUint,
        exponent: u32,
    },
    /// `(a1×p1)^P1 + (a2×p2)^P2`
    CoprimeSum { left: PowerTerm, right: PowerTerm },
    /// `left + right` over a partition of the divisor set
    Partition {
        left: PartitionTerm,
        right: PartitionTerm,
    },
    /// `base^exponent + offset`
    PowerSequence {
        base: BigUint,
        exponent: u64,
        offset: BigUint,
    },
}

impl Provenance {
    /// Offset branch for the power-offset families.
    #[must_use]
    pub fn op(&self) -> Option<Op> {
        match self {
            Provenance::PowerOffset { op, .. } | Provenance::ScaledPowerOffset { op, .. } => {
                Some(*op)
            }
            _ => None,
        }
    }

    /// Exponent of the `2^a` multiplier, when the formula has one.
    #[must_use]
    pub fn two_exponent(&self) -> Option<u32> {
        match self {
            Provenance::ScaledPowerOffset { two_exponent, .. } => Some(*two_exponent),
            _ => None,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::LcmOffset {
                index,
                lcm_label,
                offset,
            } => write!(f, "{}×{} + {}", index, lcm_label, offset),
            Provenance::PowerOffset {
                lcm_label,
                op: Op::Add,
                base,
                exponent,
            } => write!(f, "{} + {}^{}", lcm_label, base, exponent),
            Provenance::PowerOffset {
                lcm_label,
                op: Op::Sub,
                base,
                exponent,
            } => write!(f, "|{} - {}^{}|", lcm_label, base, exponent),
            Provenance::ScaledPowerOffset {
                two_exponent,
                lcm_label,
                op: Op::Add,
                prime,
                exponent,
            } => write!(f, "(2^{}×{}) + {}^{}", two_exponent, lcm_label, prime, exponent),
            Provenance::ScaledPowerOffset {
                two_exponent,
                lcm_label,
                op: Op::Sub,
                prime,
                exponent,
            } => write!(f, "|(2^{}×{}) - {}^{}|", two_exponent, lcm_label, prime, exponent),
            Provenance::CoprimeSum { left, right } => write!(f, "{} + {}", left, right),
            Provenance::Partition { left, right } => write!(f, "{} + {}", left, right),
            Provenance::PowerSequence {
                base,
                exponent,
                offset,
            } => write!(f, "{}^{} + {}", base, exponent, offset),
        }
    }
}

/// A produced integer together with the formula that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedValue {
    pub value: BigUint,
    pub provenance: Provenance,
}

impl GeneratedValue {
    /// Pair a value with its provenance.
    #[must_use]
    pub fn new(value: BigUint, provenance: Provenance) -> Self {
        Self { value, provenance }
    }
}

impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.provenance, self.value)
    }
}

impl Serialize for GeneratedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GeneratedValue", 2)?;
        state.serialize_field("value", &self.value.to_string())?;
        state.serialize_field("formula", &self.provenance.to_string())?;
        state.end()
    }
}
