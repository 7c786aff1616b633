use crate::core::forcefield::scoring::Scorer;
use crate::core::models::ids::ParticleId;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of the all-pairs reduction, before the energy coefficient is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSum {
    /// Sum of the partials, combined in worker order.
    pub raw_energy: f64,
    /// One private partial per worker, indexed by worker.
    pub partials: Vec<f64>,
    /// Number of unordered pairs evaluated; `N(N-1)/2` on success.
    pub pairs_visited: u64,
}

#[derive(Debug, Clone, Copy)]
struct WorkerPartial {
    sum: f64,
    pairs: u64,
}

/// Outer indices owned by `worker` out of `workers`: `worker+1, worker+1+workers, ...`
/// up to `count`.
///
/// Every `i` in `1..count` belongs to exactly one worker. Workers whose first index is
/// already past `count` get an empty range.
pub fn outer_indices(worker: usize, workers: usize, count: usize) -> impl Iterator<Item = usize> {
    (worker + 1..count).step_by(workers.max(1))
}

/// Sums the screened energy of every unordered pair `(j, i)`, `j < i`, across
/// `workers` strided workers.
///
/// Worker `t` owns outer indices `t+1, t+1+T, ...` and for each of them accumulates
/// `pair_energy(j, i)` for all `j < i` into its private partial. The partials are
/// combined sequentially in worker order, so the same worker count always produces a
/// bit-identical result. A different worker count groups the additions differently and
/// may change the last digits of the total; floating-point addition is not associative.
///
/// # Errors
///
/// A failing pair aborts the whole reduction with that pair's error; a panicking worker
/// is reported as [`EngineError::WorkerFailed`]. No partial result is returned.
#[instrument(skip_all, name = "pair_sum_task")]
pub fn run(
    scorer: &Scorer,
    workers: usize,
    reporter: &ProgressReporter,
) -> Result<PairSum, EngineError> {
    sum_pairs(scorer.system().len(), workers, reporter, |source, target| {
        Ok(scorer.pair_energy(source, target)?)
    })
}

fn sum_pairs<F>(
    count: usize,
    workers: usize,
    reporter: &ProgressReporter,
    pair_energy: F,
) -> Result<PairSum, EngineError>
where
    F: Fn(ParticleId, ParticleId) -> Result<f64, EngineError> + Sync,
{
    if workers == 0 {
        return Err(EngineError::Internal(
            "pair summation requires at least one worker".to_string(),
        ));
    }

    info!(particles = count, workers, "Starting all-pairs energy summation.");
    reporter.report(Progress::PhaseStart {
        name: "Pair Summation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: workers as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..workers;

    #[cfg(feature = "parallel")]
    let iterator = (0..workers).into_par_iter();

    let results: Vec<Result<WorkerPartial, EngineError>> = iterator
        .map(|worker| {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                run_worker(worker, workers, count, &pair_energy)
            }))
            .unwrap_or_else(|payload| {
                Err(EngineError::WorkerFailed {
                    worker,
                    reason: panic_message(payload.as_ref()),
                })
            });
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut partials = Vec::with_capacity(workers);
    let mut pairs_visited = 0u64;
    for result in results {
        let partial = result?;
        partials.push(partial.sum);
        pairs_visited += partial.pairs;
    }

    let mut raw_energy = 0.0;
    for partial in &partials {
        raw_energy += partial;
    }

    info!(raw_energy, pairs_visited, "All-pairs energy summation finished.");
    reporter.report(Progress::PhaseFinish);
    Ok(PairSum {
        raw_energy,
        partials,
        pairs_visited,
    })
}

fn run_worker<F>(
    worker: usize,
    workers: usize,
    count: usize,
    pair_energy: &F,
) -> Result<WorkerPartial, EngineError>
where
    F: Fn(ParticleId, ParticleId) -> Result<f64, EngineError>,
{
    let mut sum = 0.0;
    let mut pairs = 0u64;
    for i in outer_indices(worker, workers, count) {
        let target = ParticleId::new(i);
        for j in 0..i {
            sum += pair_energy(ParticleId::new(j), target)?;
            pairs += 1;
        }
    }
    debug!(worker, pairs, partial = sum, "Worker finished.");
    Ok(WorkerPartial { sum, pairs })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
