//! Convenience re-exports for common test utilities.

pub use crate::fixtures::{
    equal_periods, high_mode_overload, mixed_periods, nuvd_feasible, overscaled, seeded_rng,
};
pub use crate::must::{must, must_err, must_some};
pub use crate::{assert_approx_eq, assert_in_range, assert_strictly_ascending};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
