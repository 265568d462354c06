//! Deterministic simulation: every generator, random divisor sets.
//!
//! Replay a failure with `DF_SEED=<seed> cargo test -p df-generator`.

use df_core::{DivisorSet, SearchOutcome};
use df_dst::{get_or_generate_seed, DeterministicRng, Workload};
use df_generator::{run, GeneratorConfig, Method, SearchConfig};

const ITERATIONS: usize = 40;

fn simulate(workload: &Workload, config: &GeneratorConfig, rng: &mut DeterministicRng) {
    let seed = rng.seed();

    for iteration in 0..ITERATIONS {
        let divisors = workload.divisor_set(rng).unwrap();
        let count = workload.count(rng);

        for method in Method::ALL {
            let run = run(method, &divisors, count, config).unwrap_or_else(|e| {
                panic!("seed {} iteration {} {}: {}", seed, iteration, method, e)
            });

            assert!(
                run.validation.passes(),
                "seed {} iteration {} {} on {}:\n{}",
                seed,
                iteration,
                method,
                divisors,
                run.validation.format_report()
            );
            assert!(run.result.len() <= count);
            assert_eq!(run.result.stats.produced, run.result.len() as u64);
            assert!(run.result.stats.valid >= run.result.len() as u64);
            assert_eq!(
                run.result.outcome == SearchOutcome::Exhausted,
                run.result.len() < count
            );
        }
    }
}

#[test]
fn test_random_divisor_sets_stay_divisor_free() {
    let mut rng = DeterministicRng::new(get_or_generate_seed());
    simulate(&Workload::default(), &GeneratorConfig::quick(), &mut rng);
}

#[test]
fn test_odd_prime_sets_stay_divisor_free() {
    let mut rng = DeterministicRng::new(get_or_generate_seed());
    simulate(&Workload::odd_primes(), &GeneratorConfig::quick(), &mut rng);
}

#[test]
fn test_worker_count_does_not_change_output() {
    let seed = get_or_generate_seed();
    let mut rng = DeterministicRng::new(seed);
    let workload = Workload::odd_primes();

    let sequential = GeneratorConfig::quick();
    let mut parallel = GeneratorConfig::quick();
    parallel.search = SearchConfig {
        workers: 4,
        batch_size: 64,
    };

    for _ in 0..10 {
        let divisors = workload.divisor_set(&mut rng).unwrap();
        let count = workload.count(&mut rng);
        for method in [
            Method::EnhancedPowerOffset,
            Method::CoprimeSum,
            Method::Partition,
        ] {
            let a = run(method, &divisors, count, &sequential).unwrap();
            let b = run(method, &divisors, count, &parallel).unwrap();
            assert_eq!(a.result.numbers(), b.result.numbers(), "seed {}", seed);
            assert_eq!(a.result.stats.tested, b.result.stats.tested, "seed {}", seed);
        }
    }
}

#[test]
fn test_exhaustion_is_reported_not_hidden() {
    // 2 divides L ± 2^p for every p, so nothing qualifies.
    let divisors = DivisorSet::from_u64s(&[2, 3]).unwrap();
    let mut config = GeneratorConfig::default();
    config.power_offset.max_power = 16;

    let run = run(Method::PowerOffset, &divisors, 5, &config).unwrap();
    assert_eq!(run.result.outcome, SearchOutcome::Exhausted);
    assert!(run.result.is_empty());
    assert_eq!(run.result.stats.tested, 32);
    assert!(run.validation.passes());
}
