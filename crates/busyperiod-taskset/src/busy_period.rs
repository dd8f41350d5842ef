//! Synchronous busy period in low-criticality mode.
//!
//! Starting from a simultaneous release of all tasks at `t = 0` with jobs
//! released as early as possible, the busy period is the interval up to the
//! first idle time. Its length is the least fixed point of
//!
//! ```text
//! L_0     = Σ c_L(i)
//! L_{n+1} = Σ ceil(L_n / p(i)) * c_L(i)
//! ```
//!
//! Convergence is checked on the integer parts of successive iterates, which
//! matches the integer time domain of the checkpoint construction.

use crate::BUSY_PERIOD_LIMIT;
use crate::dual_crit::DualCritMin;
use crate::error::{AnalysisError, AnalysisResult};

/// Demand requested by jobs released in `[0, length)`.
fn requested_work(set: &DualCritMin, length: f64) -> f64 {
    set.iter()
        .map(|task| (length / task.period).ceil() * task.comp_low)
        .sum()
}

/// Integer part of a time value.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "truncation to the integer time domain is the intent"
)]
pub(crate) fn time_floor(t: f64) -> i64 {
    t as i64
}

/// Compute the length of the synchronous low-mode busy period.
///
/// # Errors
///
/// Returns [`AnalysisError::BusyPeriodDiverged`] once an iterate exceeds
/// [`BUSY_PERIOD_LIMIT`] (or stops being finite) before converging.
pub fn busy_period(set: &DualCritMin) -> AnalysisResult<f64> {
    busy_period_bounded(set, BUSY_PERIOD_LIMIT)
}

/// [`busy_period`] with an explicit safety bound.
///
/// # Errors
///
/// Returns [`AnalysisError::BusyPeriodDiverged`] once an iterate exceeds
/// `limit` before converging.
pub fn busy_period_bounded(set: &DualCritMin, limit: f64) -> AnalysisResult<f64> {
    let mut length: f64 = set.iter().map(|task| task.comp_low).sum();
    loop {
        if !length.is_finite() || length > limit {
            return Err(AnalysisError::BusyPeriodDiverged { length, limit });
        }
        let next = requested_work(set, length);
        if !next.is_finite() {
            return Err(AnalysisError::BusyPeriodDiverged {
                length: next,
                limit,
            });
        }
        if time_floor(length) == time_floor(next) {
            return Ok(length);
        }
        length = next;
    }
}
