//! Run a generator and check its output.
//!
//! [`run`] is the single entry point front ends use: it dispatches on
//! [`Method`], re-validates the result against the same divisor set and
//! logs the outcome.

use std::fmt;
use std::str::FromStr;

use df_core::{DivisorSet, GenerationResult, Result, ValidationReport};
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::methods::{coprime_sum, enhanced, lcm_offset, partition, power_offset};

/// Divisor-avoiding generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// `k·L + 2` for odd `k`, `k·L + 1` for even `k`, odd values only
    LcmOffset,
    /// `L ± 2^p`
    PowerOffset,
    /// `(2^a·L) ± q^b` over extra primes
    EnhancedPowerOffset,
    /// `(a1·p1)^e1 + (a2·p2)^e2`
    CoprimeSum,
    /// Two-sided prime power split of the divisor set
    Partition,
}

impl Method {
    /// Every method, in the order reports list them.
    pub const ALL: [Method; 5] = [
        Method::LcmOffset,
        Method::PowerOffset,
        Method::EnhancedPowerOffset,
        Method::CoprimeSum,
        Method::Partition,
    ];

    /// Name used in results and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::LcmOffset => lcm_offset::METHOD,
            Method::PowerOffset => power_offset::METHOD,
            Method::EnhancedPowerOffset => enhanced::METHOD,
            Method::CoprimeSum => coprime_sum::METHOD,
            Method::Partition => partition::METHOD,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = df_core::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Method::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| df_core::Error::parameter("method", format!("unknown method '{}'", s)))
    }
}

/// A finished, validated generator call.
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    pub divisors: DivisorSet,
    pub result: GenerationResult,
    pub validation: ValidationReport,
}

impl Run {
    /// Values, statistics and validation as text.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = format!("Divisors: {}\n", self.divisors);
        for value in &self.result.values {
            report.push_str(&format!("  {}\n", value));
        }
        report.push_str(&self.result.format_summary());
        report.push_str(&self.validation.format_report());
        report
    }
}

/// Generate `count` values with `method` and validate them.
#[tracing::instrument(skip(divisors, config), fields(divisors = %divisors))]
pub fn run(
    method: Method,
    divisors: &DivisorSet,
    count: usize,
    config: &GeneratorConfig,
) -> Result<Run> {
    let result = match method {
        Method::LcmOffset => lcm_offset::generate(divisors, count, &config.lcm_offset)?,
        Method::PowerOffset => power_offset::generate(divisors, count, &config.power_offset)?,
        Method::EnhancedPowerOffset => {
            enhanced::generate(divisors, count, &config.enhanced, &config.search)?
        }
        Method::CoprimeSum => {
            coprime_sum::generate(divisors, count, &config.coprime_sum, &config.search)?
        }
        Method::Partition => {
            partition::generate(divisors, count, &config.partition, &config.search)?
        }
    };

    let validation = result.validate(divisors);
    if result.is_exhausted() {
        tracing::warn!(
            produced = result.len(),
            requested = count,
            tested = result.stats.tested,
            "search space exhausted before reaching the requested count"
        );
    } else {
        tracing::info!(
            produced = result.len(),
            tested = result.stats.tested,
            "generation complete"
        );
    }
    if let Err(first) = validation.verify() {
        tracing::error!(
            position = first.position,
            value = %first.value,
            divisor = %first.divisor,
            violations = validation.errors_count,
            "generator produced a divisible value"
        );
    }

    Ok(Run {
        divisors: divisors.clone(),
        result,
        validation,
    })
}

/// One demonstration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRequest {
    pub method: Method,
    pub divisors: Vec<u64>,
    pub count: usize,
}

/// Calls exercising every method on small, well-known divisor sets.
#[must_use]
pub fn demo_requests() -> Vec<DemoRequest> {
    let request = |method, divisors: &[u64], count| DemoRequest {
        method,
        divisors: divisors.to_vec(),
        count,
    };
    vec![
        request(Method::LcmOffset, &[3, 5], 10),
        request(Method::LcmOffset, &[3, 5, 7, 11], 10),
        request(Method::PowerOffset, &[3, 5], 10),
        request(
            Method::PowerOffset,
            &[3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47],
            20,
        ),
        request(Method::EnhancedPowerOffset, &[3, 5, 7, 11, 13, 17, 19], 20),
        request(Method::CoprimeSum, &[3, 5, 7], 10),
        request(Method::Partition, &[3, 5, 7], 10),
    ]
}

/// Run every demo request, stopping at the first input error.
pub fn run_demo(config: &GeneratorConfig) -> Result<Vec<Run>> {
    demo_requests()
        .into_iter()
        .map(|req| {
            let divisors = DivisorSet::from_u64s(&req.divisors)?;
            run(req.method, &divisors, req.count, config)
        })
        .collect()
}
