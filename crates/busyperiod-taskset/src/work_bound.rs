//! Low-mode demand-bound function.

use crate::dual_crit::DualCritMin;

/// Maximum cumulative low-mode computation that jobs with (effective)
/// deadlines at or before `t` can request:
///
/// ```text
/// h(t) = Σ max(0, 1 + floor((t - d(i)) / p(i))) * c_L(i)
/// ```
///
/// where `d(i)` is the virtual deadline of a high-criticality task and the
/// regular deadline otherwise. EDF meets every deadline of the synchronous
/// busy period iff `h(t) <= t` at all checkpoints.
pub fn work_bound(set: &DualCritMin, t: f64) -> f64 {
    set.iter()
        .map(|task| {
            let jobs = (1.0 + ((t - task.effective_deadline()) / task.period).floor()).max(0.0);
            jobs * task.comp_low
        })
        .sum()
}
