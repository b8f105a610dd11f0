//! Parallel trial dispatch over a bounded rayon pool.

use std::ops::Range;

use rayon::prelude::*;

use super::executor::TrialExecutor;
use crate::error::Result;
use crate::models::{ScenarioModel, TrialOutcome};

/// Splits `[0, iterations)` into `workers` contiguous blocks.
///
/// Every block gets `iterations / workers` trials and the first
/// `iterations % workers` blocks one extra. Empty blocks are never produced.
///
/// ```rust
/// use mc_engine::mc::partition;
///
/// assert_eq!(partition(10, 3), vec![0..4, 4..7, 7..10]);
/// ```
pub fn partition(iterations: usize, workers: usize) -> Vec<Range<u64>> {
    let workers = workers.clamp(1, iterations.max(1));
    let base = iterations / workers;
    let remainder = iterations % workers;

    let mut blocks = Vec::with_capacity(workers);
    let mut start = 0u64;
    for block in 0..workers {
        let len = (base + usize::from(block < remainder)) as u64;
        if len > 0 {
            blocks.push(start..start + len);
        }
        start += len;
    }
    blocks
}

/// Runs trials on a dedicated pool of at most `num_threads` workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelDispatcher {
    num_threads: usize,
}

impl ParallelDispatcher {
    /// Creates a dispatcher bounded by `num_threads` (at least one).
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: num_threads.max(1),
        }
    }

    /// Workers used for a run of `iterations` trials.
    #[inline]
    pub fn worker_count(&self, iterations: usize) -> usize {
        self.num_threads.min(iterations).max(1)
    }

    /// Executes `iterations` trials and returns outcomes in trial order.
    ///
    /// Blocks until every trial has finished. If any trial fails the whole
    /// dispatch fails; the reported error is the one with the lowest trial
    /// index, independent of scheduling.
    ///
    /// # Errors
    ///
    /// - `TrialExecution` if a trial produced an invalid outcome
    /// - `WorkerPool` if the thread pool could not be built
    pub fn dispatch<M: ScenarioModel>(
        &self,
        executor: &TrialExecutor<'_, M>,
        iterations: usize,
    ) -> Result<Vec<TrialOutcome>> {
        let workers = self.worker_count(iterations);
        let blocks = partition(iterations, workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("mc-worker-{}", index))
            .build()?;

        let per_block: Vec<Result<Vec<TrialOutcome>>> = pool.install(|| {
            blocks
                .into_par_iter()
                .map(|block| {
                    block
                        .map(|trial| executor.execute(trial))
                        .collect::<Result<Vec<_>>>()
                })
                .collect()
        });

        let mut outcomes = Vec::with_capacity(iterations);
        for block in per_block {
            outcomes.extend(block?);
        }
        Ok(outcomes)
    }
}
