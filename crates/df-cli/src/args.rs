//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use df_core::DivisorSet;
use df_generator::methods::sequence::Growth;

/// Construct integers that no member of a divisor set divides.
#[derive(Parser, Debug)]
#[command(name = "divfree", version, about)]
pub struct Cli {
    /// JSON configuration file, replacing the preset; fields it omits keep
    /// their defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base configuration.
    #[arg(long, global = true, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    /// Worker threads for the grid searches.
    #[arg(long, global = true, value_name = "N")]
    pub workers: Option<usize>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Default,
    Quick,
    Thorough,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Quick => "quick",
            Preset::Thorough => "thorough",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// k·L + 2 for odd k, k·L + 1 for even k, odd values only.
    LcmOffset {
        #[command(flatten)]
        generate: GenerateArgs,
        /// First multiplier k (at least 1).
        #[arg(long)]
        start_index: Option<u64>,
        /// Stop after this many candidates.
        #[arg(long)]
        max_iterations: Option<u64>,
    },

    /// L + base^p and |L - base^p| for p = 1, 2, ...
    PowerOffset {
        #[command(flatten)]
        generate: GenerateArgs,
        #[arg(long)]
        base: Option<u64>,
        #[arg(long)]
        max_power: Option<u32>,
    },

    /// (2^a·L) ± q^b over auxiliary primes q.
    Enhanced {
        #[command(flatten)]
        generate: GenerateArgs,
        /// Largest a in 2^a.
        #[arg(long)]
        max_power: Option<u32>,
        /// Largest b in q^b.
        #[arg(long)]
        max_prime_power: Option<u32>,
        /// Auxiliary primes, comma separated.
        #[arg(long, value_delimiter = ',')]
        extra_primes: Option<Vec<u64>>,
    },

    /// (a1·p1)^e1 + (a2·p2)^e2 with p1, p2 outside the divisor set.
    CoprimeSum {
        #[command(flatten)]
        generate: GenerateArgs,
        #[arg(long)]
        multiplier_max: Option<u64>,
        #[arg(long)]
        exponent_max: Option<u32>,
        /// Candidate primes, comma separated.
        #[arg(long, value_delimiter = ',')]
        primes: Option<Vec<u64>>,
    },

    /// Prime powers of the divisor set split across the two sides of a sum.
    Partition {
        #[command(flatten)]
        generate: GenerateArgs,
        #[arg(long)]
        two_power_max: Option<u32>,
        #[arg(long)]
        exponent_max: Option<u32>,
    },

    /// base^e + offset, without divisor filtering.
    Sequence {
        #[arg(long)]
        base: Option<u64>,
        #[arg(long)]
        offset: Option<u64>,
        #[arg(long)]
        terms: Option<u32>,
        #[arg(long, value_enum)]
        growth: Option<GrowthArg>,
        /// Write the values to FILE, one per line.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Check a number list against a divisor set.
    Validate {
        /// Number list, one integer per line.
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long)]
        divisors: DivisorSet,
    },

    /// Find the first divisor of each number in a list.
    Screen {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Divisor list, one integer per line.
        #[arg(long, value_name = "FILE")]
        divisor_file: PathBuf,
        /// Only print numbers some divisor divides.
        #[arg(long)]
        divisible_only: bool,
    },

    /// Multiply the first N numbers of a list.
    Product {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short = 'n', long)]
        limit: usize,
        /// Write the report to FILE instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Miller-Rabin probable-prime check.
    IsPrime {
        /// Decimal integer to test.
        #[arg(required_unless_present = "input", conflicts_with = "input")]
        value: Option<String>,
        /// Read the number from a list instead.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// 1-based position in the list.
        #[arg(long, default_value_t = 1)]
        line: usize,
        #[arg(long, default_value_t = 5)]
        rounds: u32,
        /// Witness seed.
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },

    /// Run every method on small example divisor sets.
    Demo,

    /// Print the effective configuration as JSON.
    Config,
}

/// Arguments shared by the divisor-set generators.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Divisors to avoid, e.g. "3,5,7".
    #[arg(short, long)]
    pub divisors: DivisorSet,

    /// Values to produce.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Write the values to FILE, one per line.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthArg {
    Linear,
    Doubling,
}

impl From<GrowthArg> for Growth {
    fn from(arg: GrowthArg) -> Self {
        match arg {
            GrowthArg::Linear => Growth::Linear,
            GrowthArg::Doubling => Growth::Doubling,
        }
    }
}
