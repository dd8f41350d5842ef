//! One search trial: generate, scale, verify.

use core::fmt;

use busyperiod_taskset::{
    AnalysisError, DualCritMin, ErrorClass, ScalingPolicy, TaskSetGenerator, Violation,
    build_checkpoints, first_violation, scale_edf_nuvd,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::SearchResult;

/// Why a trial produced no verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscardReason {
    /// No EDF-NUVD lambda exists for the task set.
    Infeasible,
    /// The busy period did not converge below the safety bound.
    NonConvergent,
    /// The task set is outside the analysable task model.
    InvalidInput,
}

impl From<&AnalysisError> for DiscardReason {
    fn from(err: &AnalysisError) -> Self {
        match err.class() {
            ErrorClass::Infeasible => DiscardReason::Infeasible,
            ErrorClass::NonConvergent => DiscardReason::NonConvergent,
            ErrorClass::Precondition | ErrorClass::InvalidInput => DiscardReason::InvalidInput,
        }
    }
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::Infeasible => f.write_str("infeasible"),
            DiscardReason::NonConvergent => f.write_str("non-convergent"),
            DiscardReason::InvalidInput => f.write_str("invalid-input"),
        }
    }
}

/// A scaled task set whose demand exceeds the elapsed time at a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterexample {
    /// The task set after EDF-NUVD scaling.
    pub task_set: DualCritMin,
    /// Every checkpoint of the task set, ascending.
    pub checkpoints: Vec<i64>,
    /// The first violated checkpoint.
    pub violated_at: i64,
    /// Demand bound at `violated_at`.
    pub demand: f64,
}

impl Counterexample {
    /// Assemble a counterexample from a violation found among `checkpoints`.
    pub fn new(task_set: DualCritMin, checkpoints: Vec<i64>, violation: Violation) -> Self {
        Self {
            task_set,
            checkpoints,
            violated_at: violation.at,
            demand: violation.demand,
        }
    }
}

/// Result of a single trial.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    /// The instance fell outside the test's precondition.
    Discarded(DiscardReason),
    /// Every checkpoint passed.
    Schedulable {
        /// Number of checkpoints checked
        checkpoints: usize,
    },
    /// A checkpoint was violated.
    Counterexample(Counterexample),
}

/// Runs one trial with the caller's random stream.
///
/// Workers share one runner, hence the `Sync` bound.
pub trait TrialRunner: Sync {
    /// Run one trial.
    fn run_trial(&self, rng: &mut StdRng) -> TrialOutcome;
}

impl<F> TrialRunner for F
where
    F: Fn(&mut StdRng) -> TrialOutcome + Sync,
{
    fn run_trial(&self, rng: &mut StdRng) -> TrialOutcome {
        self(rng)
    }
}

/// Scale a task set and run the busy-period demand test on it.
pub fn verify_task_set(mut set: DualCritMin, policy: ScalingPolicy) -> TrialOutcome {
    if let Err(err) = scale_edf_nuvd(&mut set, policy) {
        return TrialOutcome::Discarded(DiscardReason::from(&err));
    }
    let checkpoints = match build_checkpoints(&set) {
        Ok(checkpoints) => checkpoints,
        Err(err) => return TrialOutcome::Discarded(DiscardReason::from(&err)),
    };
    match first_violation(&set, &checkpoints) {
        Some(violation) => {
            TrialOutcome::Counterexample(Counterexample::new(set, checkpoints, violation))
        }
        None => TrialOutcome::Schedulable {
            checkpoints: checkpoints.len(),
        },
    }
}

/// The production trial: a random task set verified under one policy.
#[derive(Debug, Clone, Default)]
pub struct NuvdTrial {
    generator: TaskSetGenerator,
    policy: ScalingPolicy,
}

impl NuvdTrial {
    /// Create a trial runner.
    pub fn new(generator: TaskSetGenerator, policy: ScalingPolicy) -> Self {
        Self { generator, policy }
    }

    /// Create a trial runner from a search configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Generator`] if the generator configuration
    /// is invalid.
    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        let generator = TaskSetGenerator::new(config.generator.clone())?;
        Ok(Self::new(generator, config.policy))
    }

    /// The scaling policy.
    pub fn policy(&self) -> ScalingPolicy {
        self.policy
    }
}

impl TrialRunner for NuvdTrial {
    fn run_trial(&self, rng: &mut StdRng) -> TrialOutcome {
        verify_task_set(self.generator.generate(rng), self.policy)
    }
}
