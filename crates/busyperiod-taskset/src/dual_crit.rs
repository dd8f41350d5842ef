//! The minimal dual-criticality task set.

use core::fmt;
use core::ops::Index;

use serde::{Deserialize, Serialize};

use crate::checkpoints::{self, Violation};
use crate::error::{AnalysisError, AnalysisResult};
use crate::nuvd::{self, NuvdLambdas, ScalingPolicy};
use crate::task::Task;
use crate::{busy_period, work_bound};

/// Column header of the tabular rendering.
pub const TABLE_HEADER: &str = "c_L\tc_H\tp\td\ts\tvd";

/// A minimal dual-criticality task set: one low-criticality task at index 0
/// and two high-criticality tasks at indices 1 and 2.
///
/// The set is created whole; afterwards only the `scale` fields change, and
/// only through EDF-NUVD scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DualCritMin([Task; 3]);

impl DualCritMin {
    /// Number of tasks in the set.
    pub const LEN: usize = 3;

    /// Create a task set from its three tasks.
    pub fn new(tasks: [Task; 3]) -> Self {
        Self(tasks)
    }

    /// All tasks in index order.
    #[inline]
    pub fn tasks(&self) -> &[Task; 3] {
        &self.0
    }

    /// Iterate over the tasks in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// The low-criticality task.
    pub fn low_task(&self) -> &Task {
        let [low, _, _] = &self.0;
        low
    }

    /// The two high-criticality tasks.
    pub fn high_tasks(&self) -> [&Task; 2] {
        let [_, first, second] = &self.0;
        [first, second]
    }

    /// Mutable access for the scaling step.
    pub(crate) fn tasks_mut(&mut self) -> &mut [Task; 3] {
        &mut self.0
    }

    /// Check every task and the set's shape.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidTask`] for the first task that violates
    /// the task model or sits at the wrong criticality position.
    pub fn validate(&self) -> AnalysisResult<()> {
        for (index, task) in self.iter().enumerate() {
            task.validate(index)?;
            let should_be_high = index != 0;
            if task.is_high() != should_be_high {
                let reason = if should_be_high {
                    "expected a high criticality task"
                } else {
                    "expected a low criticality task"
                };
                return Err(AnalysisError::invalid_task(index, reason));
            }
        }
        Ok(())
    }

    /// Total low-mode utilization of all tasks.
    pub fn low_utilization(&self) -> f64 {
        self.iter().map(Task::low_utilization).sum()
    }

    /// See [`nuvd::calculate_edf_nuvd_lambda`].
    ///
    /// # Errors
    ///
    /// Returns an infeasibility error when no lambda exists.
    pub fn edf_nuvd_lambda(&self) -> AnalysisResult<NuvdLambdas> {
        nuvd::calculate_edf_nuvd_lambda(self)
    }

    /// See [`nuvd::edf_nuvd_schedulable`].
    pub fn is_edf_nuvd_schedulable(&self) -> bool {
        nuvd::edf_nuvd_schedulable(self)
    }

    /// See [`nuvd::scale_edf_nuvd`].
    ///
    /// # Errors
    ///
    /// Returns an infeasibility error and leaves every scale untouched when no
    /// lambda exists.
    pub fn scale_edf_nuvd(&mut self, policy: ScalingPolicy) -> AnalysisResult<NuvdLambdas> {
        nuvd::scale_edf_nuvd(self, policy)
    }

    /// See [`busy_period::busy_period`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::BusyPeriodDiverged`] when the recurrence does
    /// not converge below the safety bound.
    pub fn busy_period(&self) -> AnalysisResult<f64> {
        busy_period::busy_period(self)
    }

    /// See [`work_bound::work_bound`].
    pub fn work_bound(&self, t: f64) -> f64 {
        work_bound::work_bound(self, t)
    }

    /// See [`checkpoints::build_checkpoints`].
    ///
    /// # Errors
    ///
    /// Propagates busy-period divergence and rejects sub-unit periods.
    pub fn build_checkpoints(&self) -> AnalysisResult<Vec<i64>> {
        checkpoints::build_checkpoints(self)
    }

    /// See [`checkpoints::find_violation`].
    ///
    /// # Errors
    ///
    /// Propagates checkpoint construction failures.
    pub fn find_violation(&self) -> AnalysisResult<Option<Violation>> {
        checkpoints::find_violation(self)
    }
}

impl From<[Task; 3]> for DualCritMin {
    fn from(tasks: [Task; 3]) -> Self {
        Self::new(tasks)
    }
}

impl Index<usize> for DualCritMin {
    type Output = Task;

    #[allow(
        clippy::indexing_slicing,
        reason = "Index forwards the array's out-of-bounds panic"
    )]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a DualCritMin {
    type Item = &'a Task;
    type IntoIter = core::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for DualCritMin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TABLE_HEADER}")?;
        for task in self {
            writeln!(f, "{task}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DualCritMin {
        DualCritMin::new([
            Task::low(3.0, 10.0),
            Task::high(3.0, 4.0, 10.0),
            Task::high(2.0, 3.0, 10.0),
        ])
    }

    #[test]
    fn test_shape_accessors() {
        let set = sample();
        assert!(!set.low_task().is_high());
        assert!(set.high_tasks().iter().all(|t| t.is_high()));
        assert_eq!(set.iter().count(), DualCritMin::LEN);
    }

    #[test]
    fn test_validate_accepts_sample() -> AnalysisResult<()> {
        sample().validate()
    }

    #[test]
    fn test_validate_rejects_swapped_criticality() {
        let set = DualCritMin::new([
            Task::high(3.0, 4.0, 10.0),
            Task::low(3.0, 10.0),
            Task::high(2.0, 3.0, 10.0),
        ]);
        assert!(matches!(
            set.validate(),
            Err(AnalysisError::InvalidTask { index: 0, .. })
        ));
    }

    #[test]
    fn test_low_utilization_sum() {
        assert!((sample().low_utilization() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_index_matches_tasks() {
        let set = sample();
        assert_eq!(set[2], set.tasks()[2]);
    }
}
