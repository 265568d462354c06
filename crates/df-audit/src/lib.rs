//! # df-audit
//!
//! Tooling around generated numbers: flat-file lists, divisibility
//! screening, product reports and a probable-prime sanity check.
//!
//! None of this takes part in generation. It exists to inspect lists that
//! a generator (or anything else) produced:
//!
//! ```rust
//! use df_audit::screen;
//! use num_bigint::BigUint;
//!
//! let numbers: Vec<BigUint> = [35u32, 11].into_iter().map(BigUint::from).collect();
//! let divisors: Vec<BigUint> = [3u32, 5, 7].into_iter().map(BigUint::from).collect();
//!
//! let outcomes = screen(&numbers, &divisors);
//! assert_eq!(outcomes[0].witness, Some(BigUint::from(5u32)));
//! assert_eq!(outcomes[1].witness, None);
//! ```

pub mod error;
pub mod io;
pub mod primality;
pub mod product;
pub mod screen;

pub use error::{AuditError, Result};
pub use io::{read_numbers, read_numbers_limit, write_numbers};
pub use primality::{is_probable_prime, PrimalityConfig};
pub use product::{product_of_first, ProductReport};
pub use screen::{screen, ScreenOutcome, ScreenSummary};
