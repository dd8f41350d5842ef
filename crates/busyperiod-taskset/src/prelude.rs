//! Prelude module for common analysis types.
//!
//! ```
//! use busyperiod_taskset::prelude::*;
//! ```

pub use crate::checkpoints::Violation;
pub use crate::dual_crit::DualCritMin;
pub use crate::error::{AnalysisError, AnalysisResult, ErrorClass};
pub use crate::generator::{GeneratorConfig, TaskSetGenerator};
pub use crate::nuvd::{NuvdLambdas, ScalingPolicy};
pub use crate::task::Task;
pub use crate::BUSY_PERIOD_LIMIT;
