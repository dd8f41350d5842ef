//! Checkpoint construction for the busy-period demand test.
//!
//! Within the synchronous busy period `[0, L)` the demand-bound function only
//! steps at absolute (virtual) deadlines `k * p + d`. Checking `h(t) <= t` at
//! those integer points below `L` is sufficient for EDF schedulability.

use serde::{Deserialize, Serialize};

use crate::busy_period::{busy_period, time_floor};
use crate::dual_crit::DualCritMin;
use crate::error::{AnalysisError, AnalysisResult};
use crate::work_bound::work_bound;

/// A checkpoint at which the demand exceeds the elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The violated checkpoint.
    pub at: i64,
    /// Demand bound `h(at)`, strictly greater than `at`.
    pub demand: f64,
}

/// Sort ascending and drop duplicates.
pub fn dedup_sorted(mut points: Vec<i64>) -> Vec<i64> {
    points.sort_unstable();
    points.dedup();
    points
}

/// Build the ordered set of integer checkpoints inside the busy period.
///
/// For every task the candidates are `k * p + d` for `k = 0, 1, 2, ...`
/// (periods and deadlines truncated to integers, `d` being the virtual
/// deadline of a high-criticality task) while the candidate stays below the
/// integer part of the busy-period length. An empty result is valid.
///
/// # Errors
///
/// - [`AnalysisError::BusyPeriodDiverged`] from the busy-period computation
/// - [`AnalysisError::InvalidTask`] for a period shorter than one time unit,
///   which cannot advance the enumeration
pub fn build_checkpoints(set: &DualCritMin) -> AnalysisResult<Vec<i64>> {
    let bound = time_floor(busy_period(set)?);

    let mut points = Vec::new();
    for (index, task) in set.iter().enumerate() {
        let period = time_floor(task.period);
        if period < 1 {
            return Err(AnalysisError::invalid_task(
                index,
                "checkpoint enumeration needs a period of at least one time unit",
            ));
        }
        let mut point = time_floor(task.effective_deadline());
        while point < bound {
            points.push(point);
            // An overflowing candidate is already past the busy period.
            match point.checked_add(period) {
                Some(next) => point = next,
                None => break,
            }
        }
    }
    Ok(dedup_sorted(points))
}

/// First checkpoint at which `work_bound(t) > t`, if any.
#[allow(
    clippy::cast_precision_loss,
    reason = "checkpoints stay below the busy-period safety bound"
)]
pub fn first_violation(set: &DualCritMin, checkpoints: &[i64]) -> Option<Violation> {
    checkpoints.iter().find_map(|&at| {
        let demand = work_bound(set, at as f64);
        (demand > at as f64).then_some(Violation { at, demand })
    })
}

/// Build the checkpoints and look for the first violated one.
///
/// # Errors
///
/// Propagates the errors of [`build_checkpoints`].
pub fn find_violation(set: &DualCritMin) -> AnalysisResult<Option<Violation>> {
    let checkpoints = build_checkpoints(set)?;
    Ok(first_violation(set, &checkpoints))
}
