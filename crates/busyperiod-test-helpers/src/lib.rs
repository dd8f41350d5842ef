//! Shared test utilities for the busyperiod workspace.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - Assertion macros for floating-point analysis results
//! - [`fixtures`] - Hand-checked task sets and seeded RNGs
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use busyperiod_test_helpers::prelude::*;
//! ```

#![allow(clippy::panic, reason = "test helpers report failures by panicking")]

pub mod assertions;
pub mod fixtures;
pub mod must;
pub mod prelude;

pub use must::*;

/// Tolerance used by [`assert_approx_eq!`] when none is given.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
