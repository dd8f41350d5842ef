//! EDF-NUVD lambda derivation and virtual-deadline scaling.
//!
//! For the high-criticality tasks let `ul`/`uh` be the low/high mode
//! utilizations. With
//!
//! - `S12 = Σ sqrt(ul * uh)` over high-criticality tasks,
//! - `Uhh = Σ uh` and `Uhl = Σ ul` over high-criticality tasks,
//! - `Ull = Σ ul` over low-criticality tasks,
//!
//! a valid lambda lies in `[S12 / (1 - Uhh), (1 - Ull - Uhl) / S12]`. Each
//! high-criticality task then gets `scale = 1 / (1 + lambda * sqrt(uh / ul))`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dual_crit::DualCritMin;
use crate::error::{AnalysisError, AnalysisResult};
use crate::task::Task;

/// The admissible lambda interval of an EDF-NUVD feasible task set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NuvdLambdas {
    /// Lower end, `S12 / (1 - Uhh)`.
    pub low: f64,
    /// Upper end, `(1 - Ull - Uhl) / S12`.
    pub high: f64,
}

impl NuvdLambdas {
    /// Pick the lambda a scaling policy uses.
    pub fn select(&self, policy: ScalingPolicy) -> f64 {
        match policy {
            ScalingPolicy::Plain => self.low,
            ScalingPolicy::Optimistic => self.high,
            ScalingPolicy::Midpoint => f64::midpoint(self.low, self.high),
        }
    }
}

/// Which lambda from the admissible interval drives the virtual deadlines.
///
/// Every policy shares the same failure semantics: if the interval is empty
/// nothing is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingPolicy {
    /// Lower end of the interval; the loosest virtual deadlines.
    #[default]
    Plain,
    /// Upper end of the interval; the tightest virtual deadlines.
    Optimistic,
    /// Middle of the interval.
    Midpoint,
}

impl ScalingPolicy {
    /// All policies, in declaration order.
    pub const ALL: [ScalingPolicy; 3] = [
        ScalingPolicy::Plain,
        ScalingPolicy::Optimistic,
        ScalingPolicy::Midpoint,
    ];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalingPolicy::Plain => "plain",
            ScalingPolicy::Optimistic => "optimistic",
            ScalingPolicy::Midpoint => "midpoint",
        }
    }
}

impl fmt::Display for ScalingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown scaling policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scaling policy '{0}', expected one of: plain, optimistic, midpoint")]
pub struct ParseScalingPolicyError(pub String);

impl FromStr for ScalingPolicy {
    type Err = ParseScalingPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalingPolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseScalingPolicyError(s.to_string()))
    }
}

/// Compute the admissible EDF-NUVD lambda interval.
///
/// Success implies the task set is schedulable under EDF-NUVD.
///
/// # Errors
///
/// - [`AnalysisError::HighModeOverload`] if `Uhh >= 1` (no spare capacity in
///   high mode)
/// - [`AnalysisError::DegenerateHighTasks`] if `S12 == 0` or the interval is
///   not finite
/// - [`AnalysisError::LambdaOrdering`] if the interval is empty
pub fn calculate_edf_nuvd_lambda(set: &DualCritMin) -> AnalysisResult<NuvdLambdas> {
    let mut s12 = 0.0;
    let mut uhh = 0.0; // high tasks, high mode
    let mut uhl = 0.0; // high tasks, low mode
    for task in set {
        if let Ok(uh) = task.high_utilization() {
            let ul = task.low_utilization();
            s12 += (ul * uh).sqrt();
            uhh += uh;
            uhl += ul;
        }
    }

    if uhh >= 1.0 {
        return Err(AnalysisError::HighModeOverload { utilization: uhh });
    }
    // A unit supply with S12 = 0 would divide by zero below.
    if s12 == 0.0 {
        return Err(AnalysisError::DegenerateHighTasks);
    }

    let ull: f64 = set
        .iter()
        .filter(|task| !task.is_high())
        .map(Task::low_utilization)
        .sum();

    let low = s12 / (1.0 - uhh);
    let high = (1.0 - ull - uhl) / s12;
    if !low.is_finite() || !high.is_finite() {
        return Err(AnalysisError::DegenerateHighTasks);
    }
    if low > high {
        return Err(AnalysisError::LambdaOrdering { low, high });
    }
    Ok(NuvdLambdas { low, high })
}

/// Check whether the task set is schedulable under EDF-NUVD.
pub fn edf_nuvd_schedulable(set: &DualCritMin) -> bool {
    calculate_edf_nuvd_lambda(set).is_ok()
}

/// Virtual-deadline scale of a high-criticality task for a given lambda.
#[inline]
pub fn virtual_deadline_scale(lambda: f64, high_utilization: f64, low_utilization: f64) -> f64 {
    1.0 / (1.0 + lambda * (high_utilization / low_utilization).sqrt())
}

/// Scale the virtual deadlines of all high-criticality tasks in place.
///
/// # Errors
///
/// Propagates the error of [`calculate_edf_nuvd_lambda`]; the task set is left
/// unmodified in that case.
pub fn scale_edf_nuvd(set: &mut DualCritMin, policy: ScalingPolicy) -> AnalysisResult<NuvdLambdas> {
    let lambdas = calculate_edf_nuvd_lambda(set)?;
    let lambda = lambdas.select(policy);
    for task in set.tasks_mut().iter_mut() {
        if let Ok(uh) = task.high_utilization() {
            task.scale = virtual_deadline_scale(lambda, uh, task.low_utilization());
        }
    }
    Ok(lambdas)
}

/// By-value variant of [`scale_edf_nuvd`] returning the scaled copy.
///
/// # Errors
///
/// Propagates the error of [`calculate_edf_nuvd_lambda`].
pub fn scaled_edf_nuvd(mut set: DualCritMin, policy: ScalingPolicy) -> AnalysisResult<DualCritMin> {
    scale_edf_nuvd(&mut set, policy)?;
    Ok(set)
}
