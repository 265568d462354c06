//! Constructive generators for integers that no member of a divisor set
//! divides.
//!
//! Every generator builds candidates from the divisor set's structure
//! (its LCM, or prime powers kept apart from it), keeps the ones that pass
//! an explicit divisibility check, and reports how many candidates it
//! tested on the way. Searches are finite: when the configured space runs
//! out the result is marked [`SearchOutcome::Exhausted`](df_core::SearchOutcome)
//! instead of looping forever.
//!
//! # Quick start
//!
//! ```rust
//! use df_core::DivisorSet;
//! use df_generator::{run, GeneratorConfig, Method};
//!
//! let divisors = DivisorSet::from_u64s(&[3, 5]).unwrap();
//! let run = run(Method::PowerOffset, &divisors, 3, &GeneratorConfig::default()).unwrap();
//!
//! assert!(run.validation.passes());
//! assert_eq!(run.result.len(), 3);
//! ```
//!
//! # Parallel search
//!
//! The grid-shaped methods evaluate candidates in batches across
//! [`SearchConfig::workers`] threads. Results are applied in enumeration
//! order, so output and statistics do not depend on the worker count.

pub mod config;
pub mod methods;
pub mod orchestrate;
pub mod search;

pub use config::{ConfigError, GeneratorConfig};
pub use orchestrate::{demo_requests, run, run_demo, DemoRequest, Method, Run};
pub use search::{ordered_search, Combinations, Odometer, SearchConfig};
