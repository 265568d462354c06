//! Generator configuration.
//!
//! One section per method plus the worker layout. Every section defaults
//! field by field, so a JSON file only needs the values it changes:
//!
//! ```json
//! { "power_offset": { "max_power": 40 }, "search": { "workers": 8 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::methods::coprime_sum::CoprimeSumConfig;
use crate::methods::enhanced::EnhancedConfig;
use crate::methods::lcm_offset::LcmOffsetConfig;
use crate::methods::partition::PartitionConfig;
use crate::methods::power_offset::PowerOffsetConfig;
use crate::methods::sequence::SequenceConfig;
use crate::search::SearchConfig;

/// Parameters for every generator method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub lcm_offset: LcmOffsetConfig,
    pub power_offset: PowerOffsetConfig,
    pub enhanced: EnhancedConfig,
    pub coprime_sum: CoprimeSumConfig,
    pub partition: PartitionConfig,
    pub sequence: SequenceConfig,
    pub search: SearchConfig,
}

impl GeneratorConfig {
    /// Small search spaces for fast iteration.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            lcm_offset: LcmOffsetConfig {
                max_iterations: Some(100_000),
                ..Default::default()
            },
            power_offset: PowerOffsetConfig {
                max_power: 32,
                ..Default::default()
            },
            enhanced: EnhancedConfig {
                max_power: 5,
                max_prime_power: 3,
                ..Default::default()
            },
            coprime_sum: CoprimeSumConfig {
                multiplier_max: 5,
                exponent_max: 3,
                primes: vec![2, 3, 5, 7, 11, 13, 17, 19, 23],
            },
            partition: PartitionConfig {
                two_power_max: 3,
                exponent_max: 3,
            },
            sequence: SequenceConfig::default(),
            search: SearchConfig::default(),
        }
    }

    /// Wide search spaces on every CPU.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            lcm_offset: LcmOffsetConfig::default(),
            power_offset: PowerOffsetConfig {
                max_power: 1000,
                ..Default::default()
            },
            enhanced: EnhancedConfig {
                max_power: 20,
                max_prime_power: 10,
                ..Default::default()
            },
            coprime_sum: CoprimeSumConfig::default(),
            partition: PartitionConfig {
                two_power_max: 6,
                exponent_max: 6,
            },
            sequence: SequenceConfig {
                terms: 20,
                ..Default::default()
            },
            search: SearchConfig::all_cpus(),
        }
    }

    /// Preset by name: `default`, `quick` or `thorough`.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "quick" => Some(Self::quick()),
            "thorough" => Some(Self::thorough()),
            _ => None,
        }
    }

    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Pretty JSON rendering, suitable as a starting config file.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
