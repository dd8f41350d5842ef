//! Schedulability analysis for minimal dual-criticality task sets under EDF-NUVD.
//!
//! This crate models recurring real-time computations with two execution-time
//! estimates and implements the analytical pieces needed to check whether an
//! EDF-NUVD scaled task set survives a busy-period based demand test:
//!
//! - **Task / DualCritMin**: the task model and the fixed three-task set
//!   (one low-criticality, two high-criticality tasks)
//! - **TaskSetGenerator**: random implicit-deadline task sets
//! - **EDF-NUVD**: lambda derivation and virtual-deadline scaling
//! - **Busy period**: synchronous low-mode busy period via bounded fixed-point iteration
//! - **Work bound / checkpoints**: demand-bound function and the finite set of
//!   time points at which it must stay below elapsed time
//!
//! # Example
//!
//! ```
//! use busyperiod_taskset::{DualCritMin, Task, ScalingPolicy};
//!
//! let mut set = DualCritMin::new([
//!     Task::low(1.0, 5.0),
//!     Task::high(1.0, 2.0, 5.0),
//!     Task::high(1.0, 2.0, 10.0),
//! ]);
//!
//! let lambdas = set.scale_edf_nuvd(ScalingPolicy::Plain)?;
//! assert!(lambdas.low <= lambdas.high);
//!
//! let checkpoints = set.build_checkpoints()?;
//! for t in checkpoints {
//!     assert!(set.work_bound(t as f64) <= t as f64);
//! }
//! # Ok::<(), busyperiod_taskset::AnalysisError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(unused_must_use)]

pub mod busy_period;
pub mod checkpoints;
pub mod dual_crit;
pub mod error;
pub mod generator;
pub mod nuvd;
pub mod prelude;
pub mod task;
pub mod work_bound;

pub use busy_period::{busy_period, busy_period_bounded};
pub use checkpoints::{Violation, build_checkpoints, dedup_sorted, find_violation, first_violation};
pub use dual_crit::{DualCritMin, TABLE_HEADER};
pub use error::{AnalysisError, AnalysisResult, ErrorClass};
pub use generator::{
    GeneratorConfig, MIN_USABLE_PERIOD, TaskSetGenerator, generate_random_taskset,
};
pub use nuvd::{
    NuvdLambdas, ParseScalingPolicyError, ScalingPolicy, calculate_edf_nuvd_lambda,
    edf_nuvd_schedulable, scale_edf_nuvd, scaled_edf_nuvd, virtual_deadline_scale,
};
pub use task::Task;
pub use work_bound::work_bound;

/// Busy periods longer than this many time units are treated as unbounded.
pub const BUSY_PERIOD_LIMIT: f64 = 1e6;
