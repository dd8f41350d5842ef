//! The dual-criticality task model.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Tolerance for the implicit-deadline check.
const IMPLICIT_DEADLINE_TOLERANCE: f64 = 1e-9;

/// A recurring computation with two execution-time estimates.
///
/// `comp_low` bounds the execution time in the regular case and `comp_high`
/// in the worst case. `period` and `deadline` are relative; a job released at
/// `a` must complete by `a + deadline`.
///
/// Criticality is not tagged separately: a task is high-criticality exactly
/// when `scale != 0` and `comp_high > 0` (see [`Task::is_high`]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Task {
    /// Execution-time bound in the regular (low) mode.
    pub comp_low: f64,

    /// Worst-case execution-time bound, only meaningful for high-criticality tasks.
    pub comp_high: f64,

    /// Minimum inter-arrival time.
    pub period: f64,

    /// Relative deadline.
    pub deadline: f64,

    /// Virtual-deadline scale factor in `[0, 1]`; 0 for low-criticality tasks.
    pub scale: f64,
}

impl Task {
    /// Create an implicit-deadline low-criticality task.
    pub fn low(comp_low: f64, period: f64) -> Self {
        Self {
            comp_low,
            comp_high: 0.0,
            period,
            deadline: period,
            scale: 0.0,
        }
    }

    /// Create an implicit-deadline high-criticality task.
    ///
    /// The scale starts at 1.0 so the task is recognized as high-criticality;
    /// EDF-NUVD scaling overwrites it.
    pub fn high(comp_low: f64, comp_high: f64, period: f64) -> Self {
        Self {
            comp_low,
            comp_high,
            period,
            deadline: period,
            scale: 1.0,
        }
    }

    /// Set the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set a deadline different from the period.
    pub fn with_deadline(mut self, deadline: f64) -> Self {
        self.deadline = deadline;
        self
    }

    /// Check if the task is of high criticality.
    #[inline]
    pub fn is_high(&self) -> bool {
        self.scale != 0.0 && self.comp_high > 0.0
    }

    /// The earlier, virtual deadline `deadline * scale`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoVirtualDeadline`] for a low-criticality task.
    pub fn virtual_deadline(&self) -> AnalysisResult<f64> {
        if self.is_high() {
            Ok(self.deadline * self.scale)
        } else {
            Err(AnalysisError::NoVirtualDeadline)
        }
    }

    /// The deadline EDF schedules this task by in low mode: the virtual
    /// deadline for high-criticality tasks, the regular one otherwise.
    #[inline]
    pub fn effective_deadline(&self) -> f64 {
        self.virtual_deadline().unwrap_or(self.deadline)
    }

    /// Ratio of the low computation bound to the deadline.
    #[inline]
    pub fn low_utilization(&self) -> f64 {
        self.comp_low / self.deadline
    }

    /// Ratio of the high computation bound to the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoHighUtilization`] for a low-criticality task.
    pub fn high_utilization(&self) -> AnalysisResult<f64> {
        if self.is_high() {
            Ok(self.comp_high / self.deadline)
        } else {
            Err(AnalysisError::NoHighUtilization)
        }
    }

    /// Check whether the deadline equals the period.
    pub fn is_implicit_deadline(&self) -> bool {
        (self.deadline - self.period).abs() <= IMPLICIT_DEADLINE_TOLERANCE
    }

    /// Check the task against the model invariants.
    ///
    /// `index` is the task's position in its set and is only used for the
    /// error report.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidTask`] naming the first violated invariant.
    pub fn validate(&self, index: usize) -> AnalysisResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.period) {
            return Err(AnalysisError::invalid_task(index, "period must be positive"));
        }
        if !positive(self.deadline) {
            return Err(AnalysisError::invalid_task(index, "deadline must be positive"));
        }
        if !self.is_implicit_deadline() {
            return Err(AnalysisError::invalid_task(
                index,
                "deadline must equal period",
            ));
        }
        if !non_negative(self.comp_low) || !non_negative(self.comp_high) {
            return Err(AnalysisError::invalid_task(
                index,
                "computation bounds must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.scale) {
            return Err(AnalysisError::invalid_task(index, "scale must lie in [0, 1]"));
        }
        if self.comp_low > self.deadline {
            return Err(AnalysisError::invalid_task(
                index,
                "low computation bound exceeds deadline",
            ));
        }
        if self.is_high() && (self.comp_low > self.comp_high || self.comp_high > self.deadline) {
            return Err(AnalysisError::invalid_task(
                index,
                "high criticality task needs comp_low <= comp_high <= deadline",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    /// Tab-separated columns: low-comp, high-comp, period, deadline, scale,
    /// virtual deadline. Columns a low-criticality task lacks print as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.virtual_deadline() {
            Ok(vd) => write!(
                f,
                "{:3.2}\t{:3.2}\t{:3.2}\t{:3.2}\t{:3.2}\t{:3.2}",
                self.comp_low, self.comp_high, self.period, self.deadline, self.scale, vd
            ),
            Err(_) => write!(
                f,
                "{:3.2}\t-\t{:3.2}\t{:3.2}\t-\t-",
                self.comp_low, self.period, self.deadline
            ),
        }
    }
}
