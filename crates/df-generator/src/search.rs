//! Enumeration and ordered search over bounded parameter spaces.
//!
//! The generators separate *what* is enumerated ([`Odometer`],
//! [`Combinations`]) from *how* each candidate is judged (a pure acceptance
//! function). [`ordered_search`] joins the two. It may evaluate candidates on
//! several workers, but it always applies results in enumeration order, so
//! values, provenance and counters are identical for every worker count.

use std::ops::ControlFlow;

use df_core::Tally;
use serde::{Deserialize, Serialize};

/// Nested-loop enumeration of index tuples.
///
/// Yields every `[i0, .., iN-1]` with `ik < dims[k]`, the last position
/// varying fastest, exactly like `N` nested `for` loops. Any zero dimension
/// makes the space empty.
#[derive(Debug, Clone)]
pub struct Odometer<const N: usize> {
    dims: [usize; N],
    next: Option<[usize; N]>,
}

impl<const N: usize> Odometer<N> {
    /// Create an odometer over the given dimension sizes.
    #[must_use]
    pub fn new(dims: [usize; N]) -> Self {
        let next = if dims.iter().any(|&d| d == 0) {
            None
        } else {
            Some([0; N])
        };
        Self { dims, next }
    }

    /// Number of tuples in the full space (saturating).
    #[must_use]
    pub fn space_size(&self) -> u64 {
        self.dims
            .iter()
            .fold(1u64, |acc, &d| acc.saturating_mul(d as u64))
    }
}

impl<const N: usize> Iterator for Odometer<N> {
    type Item = [usize; N];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut advanced = current;
        let mut position = N;
        self.next = loop {
            if position == 0 {
                break None;
            }
            position -= 1;
            advanced[position] += 1;
            if advanced[position] < self.dims[position] {
                break Some(advanced);
            }
            advanced[position] = 0;
        };
        Some(current)
    }
}

/// `k`-element index combinations of `0..n` in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    next: Option<Vec<usize>>,
}

impl Combinations {
    /// Create the enumeration. Empty when `k > n`; a single empty
    /// combination when `k == 0`.
    #[must_use]
    pub fn new(n: usize, k: usize) -> Self {
        let next = if k > n { None } else { Some((0..k).collect()) };
        Self { n, next }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let k = current.len();
        let mut advanced = current.clone();

        // Rightmost position that can still move.
        let mut position = k;
        while position > 0 {
            position -= 1;
            if advanced[position] < self.n - k + position {
                advanced[position] += 1;
                for j in position + 1..k {
                    advanced[j] = advanced[j - 1] + 1;
                }
                self.next = Some(advanced);
                break;
            }
        }
        Some(current)
    }
}

/// Worker layout for [`ordered_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Threads evaluating candidates; 1 evaluates lazily on the caller
    pub workers: usize,
    /// Candidates evaluated per parallel round
    pub batch_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            batch_size: 4096,
        }
    }
}

impl SearchConfig {
    /// One worker per available CPU.
    #[must_use]
    pub fn all_cpus() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            ..Default::default()
        }
    }
}

/// Evaluate `candidates` in order until `apply` breaks or the space runs out.
///
/// `evaluate` must be pure: it decides acceptance and returns the accepted
/// output. `apply` sees every candidate in enumeration order together with
/// its evaluation and decides whether to continue. The returned tally counts
/// exactly the candidates handed to `apply`.
pub fn ordered_search<C, T, I, E, A>(
    candidates: I,
    config: &SearchConfig,
    evaluate: E,
    mut apply: A,
) -> Tally
where
    I: IntoIterator<Item = C>,
    C: Sync,
    T: Send,
    E: Fn(&C) -> Option<T> + Sync,
    A: FnMut(C, T) -> ControlFlow<()>,
{
    let mut tally = Tally::default();
    let mut candidates = candidates.into_iter();

    if config.workers <= 1 {
        for candidate in candidates {
            let output = evaluate(&candidate);
            tally.record(output.is_some());
            if let Some(output) = output {
                if apply(candidate, output).is_break() {
                    break;
                }
            }
        }
        return tally;
    }

    let batch_size = config.batch_size.max(config.workers);
    loop {
        let batch: Vec<C> = candidates.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }

        let outputs = evaluate_parallel(&batch, config.workers, &evaluate);
        debug_assert_eq!(outputs.len(), batch.len());

        for (candidate, output) in batch.into_iter().zip(outputs) {
            tally.record(output.is_some());
            if let Some(output) = output {
                if apply(candidate, output).is_break() {
                    return tally;
                }
            }
        }
    }

    tally
}

/// Evaluate one batch on scoped worker threads, preserving order.
fn evaluate_parallel<C, T, E>(batch: &[C], workers: usize, evaluate: &E) -> Vec<Option<T>>
where
    C: Sync,
    T: Send,
    E: Fn(&C) -> Option<T> + Sync,
{
    let chunk_size = (batch.len() + workers - 1) / workers;
    let scoped = crossbeam_utils::thread::scope(|scope| {
        let handles: Vec<_> = batch
            .chunks(chunk_size.max(1))
            .map(|chunk| scope.spawn(move |_| chunk.iter().map(evaluate).collect::<Vec<_>>()))
            .collect();

        let mut outputs = Vec::with_capacity(batch.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk_outputs) => outputs.extend(chunk_outputs),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        outputs
    });

    match scoped {
        Ok(outputs) => outputs,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}
