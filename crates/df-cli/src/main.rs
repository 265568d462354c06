//! `divfree`: generate and inspect divisor-free integers.
//!
//! # Usage
//!
//! ```bash
//! # Ten odd values avoiding 3, 5 and 7
//! divfree lcm-offset -d 3,5,7 -n 10
//!
//! # Enhanced power offsets on every CPU, saved as a flat list
//! divfree enhanced -d 3,5,7,11,13 -n 100 --preset thorough -o values.txt
//!
//! # Re-check a saved list
//! divfree validate -i values.txt -d 3,5,7,11,13
//! ```
//!
//! Every generating subcommand re-validates its own output and exits with a
//! failure status if any value turns out to be divisible.

mod args;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use df_audit::{PrimalityConfig, ScreenSummary};
use df_core::GenerationResult;
use df_generator::methods::sequence;
use df_generator::{GeneratorConfig, Method, Run};
use num_bigint::BigUint;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use args::{Cli, Command, GenerateArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to parse log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

/// Preset, then config file, then `--workers`.
fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::preset(cli.preset.name())
            .with_context(|| format!("unknown preset {}", cli.preset.name()))?,
    };
    if let Some(workers) = cli.workers {
        if workers == 0 {
            bail!("--workers must be at least 1");
        }
        config.search.workers = workers;
    }
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn execute(cli: Cli) -> Result<ExitCode> {
    let mut config = load_config(&cli)?;
    let json = cli.json;

    match cli.command {
        Command::LcmOffset {
            generate,
            start_index,
            max_iterations,
        } => {
            if let Some(start_index) = start_index {
                config.lcm_offset.start_index = start_index;
            }
            if max_iterations.is_some() {
                config.lcm_offset.max_iterations = max_iterations;
            }
            generate_values(Method::LcmOffset, &generate, &config, json)
        }

        Command::PowerOffset {
            generate,
            base,
            max_power,
        } => {
            if let Some(base) = base {
                config.power_offset.base = base;
            }
            if let Some(max_power) = max_power {
                config.power_offset.max_power = max_power;
            }
            generate_values(Method::PowerOffset, &generate, &config, json)
        }

        Command::Enhanced {
            generate,
            max_power,
            max_prime_power,
            extra_primes,
        } => {
            if let Some(max_power) = max_power {
                config.enhanced.max_power = max_power;
            }
            if let Some(max_prime_power) = max_prime_power {
                config.enhanced.max_prime_power = max_prime_power;
            }
            if let Some(extra_primes) = extra_primes {
                config.enhanced.extra_primes = extra_primes;
            }
            generate_values(Method::EnhancedPowerOffset, &generate, &config, json)
        }

        Command::CoprimeSum {
            generate,
            multiplier_max,
            exponent_max,
            primes,
        } => {
            if let Some(multiplier_max) = multiplier_max {
                config.coprime_sum.multiplier_max = multiplier_max;
            }
            if let Some(exponent_max) = exponent_max {
                config.coprime_sum.exponent_max = exponent_max;
            }
            if let Some(primes) = primes {
                config.coprime_sum.primes = primes;
            }
            generate_values(Method::CoprimeSum, &generate, &config, json)
        }

        Command::Partition {
            generate,
            two_power_max,
            exponent_max,
        } => {
            if let Some(two_power_max) = two_power_max {
                config.partition.two_power_max = two_power_max;
            }
            if let Some(exponent_max) = exponent_max {
                config.partition.exponent_max = exponent_max;
            }
            generate_values(Method::Partition, &generate, &config, json)
        }

        Command::Sequence {
            base,
            offset,
            terms,
            growth,
            output,
        } => {
            let mut seq = config.sequence;
            if let Some(base) = base {
                seq.base = base;
            }
            if let Some(offset) = offset {
                seq.offset = offset;
            }
            if let Some(terms) = terms {
                seq.terms = terms;
            }
            if let Some(growth) = growth {
                seq.growth = growth.into();
            }

            let result = sequence::generate(&seq)?;
            if let Some(path) = &output {
                save(path, &result)?;
            }
            if json {
                print_json(&result)?;
            } else {
                for value in &result.values {
                    println!("{}", value);
                }
                print!("{}", result.format_summary());
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Validate { input, divisors } => {
            let numbers = df_audit::read_numbers(&input)?;
            let report = df_core::validate(&numbers, divisors.as_slice());
            if json {
                print_json(&report)?;
            } else {
                print!("{}", report.format_report());
            }
            Ok(exit_code(report.passes()))
        }

        Command::Screen {
            input,
            divisor_file,
            divisible_only,
        } => {
            let numbers = df_audit::read_numbers(&input)?;
            let divisors = df_audit::read_numbers(&divisor_file)?;
            let outcomes = df_audit::screen(&numbers, &divisors);
            let summary = ScreenSummary::from_outcomes(&outcomes);

            if json {
                print_json(&outcomes)?;
            } else {
                for (outcome, n) in outcomes.iter().zip(&numbers) {
                    match &outcome.witness {
                        Some(d) => println!("#{}: {} is divisible by {}", outcome.index, n, d),
                        None if !divisible_only => {
                            println!("#{}: {} has no divisor in the list", outcome.index, n)
                        }
                        None => {}
                    }
                }
                println!("{}", summary.format_summary());
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Product {
            input,
            limit,
            output,
        } => {
            let numbers = df_audit::read_numbers(&input)?;
            let report = df_audit::product_of_first(&numbers, limit);
            match output {
                Some(path) => {
                    std::fs::write(&path, report.format_report())
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    println!(
                        "Product of {} numbers ({} digits) written to {}",
                        report.used,
                        report.digits,
                        path.display()
                    );
                }
                None if json => print_json(&report)?,
                None => print!("{}", report.format_report()),
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::IsPrime {
            value,
            input,
            line,
            rounds,
            seed,
        } => {
            let n = match (value, input) {
                (Some(text), _) => BigUint::parse_bytes(text.trim().as_bytes(), 10)
                    .with_context(|| format!("not a non-negative integer: {}", text))?,
                (None, Some(path)) => nth_number(&path, line)?,
                (None, None) => bail!("give a value or --input"),
            };
            let probable = df_audit::is_probable_prime(&n, &PrimalityConfig { rounds, seed });
            if json {
                print_json(&serde_json::json!({
                    "value": n.to_string(),
                    "probable_prime": probable,
                    "rounds": rounds,
                }))?;
            } else if probable {
                println!("{} is probably prime ({} rounds)", n, rounds);
            } else {
                println!("{} is composite", n);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Demo => {
            let runs = df_generator::run_demo(&config)?;
            if json {
                print_json(&runs)?;
            } else {
                for run in &runs {
                    println!("== {} ==", run.result.method);
                    println!("{}", run.format_report());
                }
            }
            Ok(exit_code(runs.iter().all(|r| r.validation.passes())))
        }

        Command::Config => {
            println!("{}", config.to_json_pretty()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn generate_values(
    method: Method,
    args: &GenerateArgs,
    config: &GeneratorConfig,
    json: bool,
) -> Result<ExitCode> {
    let run: Run = df_generator::run(method, &args.divisors, args.count, config)
        .with_context(|| format!("{} on {}", method, args.divisors))?;

    if let Some(path) = &args.output {
        save(path, &run.result)?;
    }
    if json {
        print_json(&run)?;
    } else {
        print!("{}", run.format_report());
    }

    Ok(exit_code(run.validation.passes()))
}

fn save(path: &Path, result: &GenerationResult) -> Result<()> {
    let written = df_audit::write_numbers(path, &result.numbers())?;
    tracing::info!(path = %path.display(), written, "values saved");
    Ok(())
}

/// The `line`-th number (1-based, blank lines skipped) of a list.
fn nth_number(path: &Path, line: usize) -> Result<BigUint> {
    if line == 0 {
        bail!("--line is 1-based");
    }
    let mut numbers = df_audit::read_numbers_limit(path, line)?;
    if numbers.len() < line {
        bail!("{} holds only {} numbers", path.display(), numbers.len());
    }
    numbers.pop().context("empty number list")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
