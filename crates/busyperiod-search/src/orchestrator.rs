//! Parallel search loop.
//!
//! Workers run trials independently, each with its own seeded random stream.
//! Counterexamples travel through a bounded channel to a single reporter
//! thread that invokes the caller's callback; a full channel blocks the
//! publishing worker until the reporter catches up.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam::channel::{self, Sender};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use crate::config::{SearchConfig, TrialLimit};
use crate::error::{SearchError, SearchResult};
use crate::stats::{SearchCounters, SearchSummary};
use crate::trial::{Counterexample, NuvdTrial, TrialOutcome, TrialRunner};

/// Name of the reporter thread.
pub const REPORTER_THREAD_NAME: &str = "busyp-reporter";

/// Mixing constant for per-worker seeds (2^64 / golden ratio).
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed of worker `index`'s random stream.
pub fn worker_seed(seed: u64, index: usize) -> u64 {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    seed ^ index.wrapping_mul(SEED_STRIDE)
}

/// Everything a worker borrows from the search.
struct Worker<'a, R> {
    index: usize,
    seed: u64,
    limit: TrialLimit,
    runner: &'a R,
    claimed: &'a AtomicU64,
    counters: &'a SearchCounters,
    stop: &'a AtomicBool,
    results: Sender<Counterexample>,
}

impl<R: TrialRunner> Worker<'_, R> {
    /// Reserve the next trial, if any remain.
    fn claim_trial(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return false;
        }
        match self.limit {
            TrialLimit::Unbounded => true,
            TrialLimit::Bounded(n) => self.claimed.fetch_add(1, Ordering::Relaxed) < n,
        }
    }

    fn run(self) {
        let mut rng = StdRng::seed_from_u64(worker_seed(self.seed, self.index));
        let mut completed = 0u64;
        while self.claim_trial() {
            let outcome = self.runner.run_trial(&mut rng);
            self.counters.record(&outcome);
            completed += 1;
            match outcome {
                TrialOutcome::Counterexample(found) => {
                    warn!(
                        worker = self.index,
                        violated_at = found.violated_at,
                        demand = found.demand,
                        "counterexample found"
                    );
                    if self.results.send(found).is_err() {
                        debug!(worker = self.index, "reporter gone, stopping worker");
                        break;
                    }
                }
                TrialOutcome::Discarded(reason) => {
                    trace!(worker = self.index, %reason, "trial discarded");
                }
                TrialOutcome::Schedulable { .. } => {}
            }
        }
        debug!(worker = self.index, trials = completed, "worker finished");
    }
}

/// A configured search.
///
/// ```no_run
/// use busyperiod_search::{SearchConfig, Searcher};
///
/// let searcher = Searcher::new(SearchConfig::new().with_trials(1_000))?;
/// let summary = searcher.run(|found| println!("violated at {}", found.violated_at))?;
/// println!("{summary}");
/// # Ok::<(), busyperiod_search::SearchError>(())
/// ```
#[derive(Debug)]
pub struct Searcher {
    config: SearchConfig,
    stop: Arc<AtomicBool>,
}

impl Searcher {
    /// Validate and normalize `config`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`SearchConfig::validate`].
    pub fn new(mut config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        config.normalize();
        Ok(Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The normalized configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Flag that ends the search once raised.
    ///
    /// Workers finish their current trial and exit; a bounded search raised
    /// early returns with fewer trials than configured.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Raise the stop flag.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Run the EDF-NUVD search, calling `on_counterexample` from the reporter
    /// thread for every counterexample as it is found.
    ///
    /// # Errors
    ///
    /// See [`Searcher::run_with`].
    pub fn run<F>(&self, on_counterexample: F) -> SearchResult<SearchSummary>
    where
        F: FnMut(Counterexample) + Send,
    {
        let runner = NuvdTrial::from_config(&self.config)?;
        self.run_with(&runner, on_counterexample)
    }

    /// Run the search with a custom trial runner.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Spawn`] if a thread cannot be started (the stop flag is
    ///   raised so already running workers exit)
    /// - [`SearchError::WorkerPanicked`] / [`SearchError::ReporterPanicked`]
    pub fn run_with<R, F>(&self, runner: &R, mut on_counterexample: F) -> SearchResult<SearchSummary>
    where
        R: TrialRunner,
        F: FnMut(Counterexample) + Send,
    {
        let workers = self.config.workers.max(1);
        let seed = self.config.seed.unwrap_or_default();
        let limit = self.config.trials;
        let counters = SearchCounters::new();
        let claimed = AtomicU64::new(0);
        let (tx, rx) = channel::bounded::<Counterexample>(self.config.queue_capacity.max(1));

        info!(
            workers,
            seed,
            trials = %limit,
            policy = %self.config.policy,
            queue_capacity = self.config.queue_capacity,
            "search started"
        );
        let started = Instant::now();

        thread::scope(|scope| {
            let reporter = thread::Builder::new()
                .name(REPORTER_THREAD_NAME.to_string())
                .spawn_scoped(scope, move || {
                    for found in rx {
                        on_counterexample(found);
                    }
                })
                .map_err(|source| self.spawn_failed(REPORTER_THREAD_NAME.to_string(), source))?;

            let mut handles = Vec::with_capacity(workers);
            for index in 0..workers {
                let name = format!("busyp-worker-{index}");
                let worker = Worker {
                    index,
                    seed,
                    limit,
                    runner,
                    claimed: &claimed,
                    counters: &counters,
                    stop: &self.stop,
                    results: tx.clone(),
                };
                let handle = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || worker.run())
                    .map_err(|source| self.spawn_failed(name.clone(), source))?;
                handles.push((name, handle));
            }
            // Only worker senders remain; the reporter exits once they finish.
            drop(tx);

            let mut result = Ok(());
            for (name, handle) in handles {
                if handle.join().is_err() && result.is_ok() {
                    result = Err(SearchError::WorkerPanicked(name));
                }
            }
            if reporter.join().is_err() && result.is_ok() {
                result = Err(SearchError::ReporterPanicked);
            }
            result
        })?;

        let summary = counters.snapshot();
        info!(
            trials = summary.trials,
            schedulable = summary.schedulable,
            discarded = summary.discarded(),
            counterexamples = summary.counterexamples,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "search finished"
        );
        Ok(summary)
    }

    fn spawn_failed(&self, name: String, source: std::io::Error) -> SearchError {
        self.stop();
        SearchError::Spawn { name, source }
    }
}

/// Validate `config` and run the EDF-NUVD search.
///
/// # Errors
///
/// See [`Searcher::new`] and [`Searcher::run_with`].
pub fn run_search<F>(config: SearchConfig, on_counterexample: F) -> SearchResult<SearchSummary>
where
    F: FnMut(Counterexample) + Send,
{
    Searcher::new(config)?.run(on_counterexample)
}
