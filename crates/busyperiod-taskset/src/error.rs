//! Error types for the analysis crate.

use core::fmt;

/// Broad classification of an [`AnalysisError`].
///
/// The search loop uses this to decide how a failed trial is accounted for;
/// none of the classes is fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorClass {
    /// A quantity was requested that is undefined for the task's criticality.
    Precondition,
    /// EDF-NUVD cannot derive a valid lambda for the task set.
    Infeasible,
    /// The busy-period recurrence exceeded its safety bound.
    NonConvergent,
    /// The input violates the task model (bad period, bounds or shape).
    InvalidInput,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Precondition => write!(f, "precondition"),
            ErrorClass::Infeasible => write!(f, "infeasible"),
            ErrorClass::NonConvergent => write!(f, "non-convergent"),
            ErrorClass::InvalidInput => write!(f, "invalid-input"),
        }
    }
}

/// Errors produced by the task model and the schedulability analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Virtual deadline requested for a low-criticality task.
    #[error("low criticality task has no virtual deadline")]
    NoVirtualDeadline,

    /// High utilization requested for a low-criticality task.
    #[error("low criticality task has no high utilization")]
    NoHighUtilization,

    /// The high-criticality tasks leave no spare capacity in high mode.
    #[error("high mode utilization {utilization} of high criticality tasks leaves no spare capacity")]
    HighModeOverload {
        /// Sum of high-mode utilizations of the high-criticality tasks
        utilization: f64,
    },

    /// The high-criticality tasks have zero combined `sqrt(ul * uh)`.
    #[error("high criticality tasks are degenerate, lambda denominator is zero")]
    DegenerateHighTasks,

    /// The derived lambdas admit no valid scale.
    #[error("lambda ordering violated: low lambda {low} exceeds high lambda {high}")]
    LambdaOrdering {
        /// Lower bound on lambda
        low: f64,
        /// Upper bound on lambda
        high: f64,
    },

    /// The busy period grew past the safety bound before converging.
    #[error("busy period length {length} exceeds the safety bound of {limit} time units")]
    BusyPeriodDiverged {
        /// Length reached when the bound was hit
        length: f64,
        /// The safety bound
        limit: f64,
    },

    /// A task violates the task model.
    #[error("task {index} is invalid: {reason}")]
    InvalidTask {
        /// Position of the task in its set
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// The random generator cannot produce task sets with this configuration.
    #[error("invalid generator configuration: {0}")]
    InvalidGeneratorConfig(String),
}

impl AnalysisError {
    /// Create an [`AnalysisError::InvalidTask`].
    pub fn invalid_task(index: usize, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidTask {
            index,
            reason: reason.into(),
        }
    }

    /// Classify the error.
    pub fn class(&self) -> ErrorClass {
        match self {
            AnalysisError::NoVirtualDeadline | AnalysisError::NoHighUtilization => {
                ErrorClass::Precondition
            }
            AnalysisError::HighModeOverload { .. }
            | AnalysisError::DegenerateHighTasks
            | AnalysisError::LambdaOrdering { .. } => ErrorClass::Infeasible,
            AnalysisError::BusyPeriodDiverged { .. } => ErrorClass::NonConvergent,
            AnalysisError::InvalidTask { .. } | AnalysisError::InvalidGeneratorConfig(_) => {
                ErrorClass::InvalidInput
            }
        }
    }

    /// Check whether a trial hitting this error should simply be discarded.
    ///
    /// Infeasible and non-convergent instances carry no verdict; they are
    /// outside the test's precondition rather than faults.
    pub fn is_discard(&self) -> bool {
        matches!(
            self.class(),
            ErrorClass::Infeasible | ErrorClass::NonConvergent | ErrorClass::InvalidInput
        )
    }
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
