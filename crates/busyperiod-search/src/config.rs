//! Search configuration.

use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use busyperiod_taskset::{GeneratorConfig, ScalingPolicy};
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Trial count of a default bounded search.
pub const DEFAULT_TRIALS: u64 = 100_000;

/// Upper bound on the worker count.
pub const MAX_WORKERS: usize = 1024;

/// Upper bound on the result queue capacity.
pub const MAX_QUEUE_CAPACITY: usize = 1 << 16;

/// How many trials a search runs.
///
/// Serialized as a plain integer where `0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum TrialLimit {
    /// Run exactly this many trials, then drain and return.
    Bounded(u64),
    /// Run until the stop flag is raised.
    Unbounded,
}

impl TrialLimit {
    /// The trial count of a bounded search.
    pub fn count(self) -> Option<u64> {
        match self {
            TrialLimit::Bounded(n) => Some(n),
            TrialLimit::Unbounded => None,
        }
    }

    /// Check whether the search runs until stopped.
    pub fn is_unbounded(self) -> bool {
        matches!(self, TrialLimit::Unbounded)
    }
}

impl Default for TrialLimit {
    fn default() -> Self {
        TrialLimit::Bounded(DEFAULT_TRIALS)
    }
}

impl From<u64> for TrialLimit {
    fn from(n: u64) -> Self {
        if n == 0 {
            TrialLimit::Unbounded
        } else {
            TrialLimit::Bounded(n)
        }
    }
}

impl From<TrialLimit> for u64 {
    fn from(limit: TrialLimit) -> Self {
        limit.count().unwrap_or(0)
    }
}

impl fmt::Display for TrialLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialLimit::Bounded(n) => write!(f, "{n}"),
            TrialLimit::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Search configuration.
///
/// Zero-valued `workers` and `queue_capacity` and an absent `seed` are
/// resolved by [`SearchConfig::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Number of trials, `0` for an endless search.
    pub trials: TrialLimit,

    /// Worker threads; `0` uses one per CPU.
    pub workers: usize,

    /// Capacity of the counterexample queue; `0` uses one slot per worker.
    pub queue_capacity: usize,

    /// Seed of the per-worker random streams; time-based when absent.
    pub seed: Option<u64>,

    /// Which lambda drives the virtual deadlines.
    pub policy: ScalingPolicy,

    /// Random task-set generation.
    pub generator: GeneratorConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: TrialLimit::default(),
            workers: 0,
            queue_capacity: 0,
            seed: None,
            policy: ScalingPolicy::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trial count, `0` for an endless search.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = TrialLimit::from(trials);
        self
    }

    /// Set the trial limit.
    pub fn with_trial_limit(mut self, limit: TrialLimit) -> Self {
        self.trials = limit;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the counterexample queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Fix the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the scaling policy.
    pub fn with_policy(mut self, policy: ScalingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the generator configuration.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Resolve automatic values.
    ///
    /// This ensures:
    /// - `workers >= 1` (CPU count when unset)
    /// - `queue_capacity >= 1` (worker count when unset)
    /// - `seed` is set (from the wall clock when unset)
    ///
    /// Normalizing twice is a no-op.
    pub fn normalize(&mut self) {
        if self.workers == 0 {
            self.workers = num_cpus::get().max(1);
        }
        if self.queue_capacity == 0 {
            self.queue_capacity = self.workers;
        }
        if self.seed.is_none() {
            self.seed = Some(time_seed());
        }
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfig`] if the worker count or queue capacity
    ///   exceeds its bound
    /// - [`SearchError::Generator`] if the generator cannot produce task sets
    pub fn validate(&self) -> SearchResult<()> {
        if self.workers > MAX_WORKERS {
            return Err(SearchError::InvalidConfig(format!(
                "workers {} exceeds the maximum of {MAX_WORKERS}",
                self.workers
            )));
        }
        if self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(SearchError::InvalidConfig(format!(
                "queue_capacity {} exceeds the maximum of {MAX_QUEUE_CAPACITY}",
                self.queue_capacity
            )));
        }
        self.generator.validate()?;
        Ok(())
    }
}

/// Seed derived from the current wall-clock time.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
