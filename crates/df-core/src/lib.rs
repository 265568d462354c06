//! # df-core
//!
//! Core types for divisor-free number generation.
//!
//! A *divisor-free* integer is one that no member of a finite divisor set
//! divides evenly. The generators in `df-generator` construct such integers
//! algebraically; this crate holds what they share:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`arith`] | gcd, lcm and the divisor-freedom predicate over `BigUint` |
//! | [`divisor_set`] | Validated, immutable divisor set |
//! | [`value`] | Generated values and their provenance formulas |
//! | [`result`] | Generation results, search outcome and statistics |
//! | [`validate`] | Re-checks a result against its divisor set |
//!
//! All arithmetic is arbitrary precision. Fixed-width integers only appear as
//! small loop indices and exponents.
//!
//! ## Usage
//!
//! ```rust
//! use df_core::{validate, DivisorSet};
//! use num_bigint::BigUint;
//!
//! let divisors = DivisorSet::from_u64s(&[3, 5, 7]).unwrap();
//! assert_eq!(divisors.lcm(), &BigUint::from(105u32));
//!
//! let values = vec![BigUint::from(107u32), BigUint::from(105u32)];
//! let report = validate(&values, divisors.as_slice());
//! assert_eq!(report.errors_count, 1);
//! assert_eq!(report.error_positions, vec![1]);
//! ```

pub mod arith;
pub mod decimal;
pub mod divisor_set;
pub mod error;
pub mod result;
pub mod validate;
pub mod value;

pub use arith::{first_divisor, gcd, is_divisor_free, lcm};
pub use divisor_set::DivisorSet;
pub use error::{Error, Result};
pub use result::{GenerationResult, SearchOutcome, Stats, Tally};
pub use validate::{validate, ValidationReport, Violation};
pub use value::{GeneratedValue, Op, PowerTerm, Provenance};
