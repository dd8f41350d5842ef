//! Trial counters shared by the workers.
//!
//! All counters use `Ordering::Relaxed`; they are only read after the
//! workers have been joined or for progress reporting.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::trial::{DiscardReason, TrialOutcome};

/// Counter snapshot returned by [`SearchCounters::snapshot`] and by a
/// finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Completed trials
    pub trials: u64,
    /// Trials without a valid lambda
    pub infeasible: u64,
    /// Trials whose busy period diverged
    pub non_convergent: u64,
    /// Trials outside the task model
    pub invalid: u64,
    /// Trials that passed every checkpoint
    pub schedulable: u64,
    /// Trials that produced a counterexample
    pub counterexamples: u64,
}

impl SearchSummary {
    /// Trials discarded for any reason.
    pub fn discarded(&self) -> u64 {
        self.infeasible + self.non_convergent + self.invalid
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trials={} schedulable={} discarded={} (infeasible={} non-convergent={} invalid={}) counterexamples={}",
            self.trials,
            self.schedulable,
            self.discarded(),
            self.infeasible,
            self.non_convergent,
            self.invalid,
            self.counterexamples
        )
    }
}

/// Lock-free trial counters.
#[derive(Debug, Default)]
pub struct SearchCounters {
    trials: AtomicU64,
    infeasible: AtomicU64,
    non_convergent: AtomicU64,
    invalid: AtomicU64,
    schedulable: AtomicU64,
    counterexamples: AtomicU64,
}

impl SearchCounters {
    /// Create zeroed counters.
    pub const fn new() -> Self {
        Self {
            trials: AtomicU64::new(0),
            infeasible: AtomicU64::new(0),
            non_convergent: AtomicU64::new(0),
            invalid: AtomicU64::new(0),
            schedulable: AtomicU64::new(0),
            counterexamples: AtomicU64::new(0),
        }
    }

    /// Count one finished trial.
    #[inline]
    pub fn record(&self, outcome: &TrialOutcome) {
        self.trials.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            TrialOutcome::Discarded(DiscardReason::Infeasible) => &self.infeasible,
            TrialOutcome::Discarded(DiscardReason::NonConvergent) => &self.non_convergent,
            TrialOutcome::Discarded(DiscardReason::InvalidInput) => &self.invalid,
            TrialOutcome::Schedulable { .. } => &self.schedulable,
            TrialOutcome::Counterexample(_) => &self.counterexamples,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Completed trials so far.
    #[inline]
    pub fn trials(&self) -> u64 {
        self.trials.load(Ordering::Relaxed)
    }

    /// Read all counters.
    pub fn snapshot(&self) -> SearchSummary {
        SearchSummary {
            trials: self.trials.load(Ordering::Relaxed),
            infeasible: self.infeasible.load(Ordering::Relaxed),
            non_convergent: self.non_convergent.load(Ordering::Relaxed),
            invalid: self.invalid.load(Ordering::Relaxed),
            schedulable: self.schedulable.load(Ordering::Relaxed),
            counterexamples: self.counterexamples.load(Ordering::Relaxed),
        }
    }
}
