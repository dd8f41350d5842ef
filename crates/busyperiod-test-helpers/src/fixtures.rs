//! Task sets with hand-checked analysis results.
//!
//! | fixture              | busy period | checkpoints            |
//! |----------------------|-------------|------------------------|
//! | [`equal_periods`]    | 8           | none                   |
//! | [`mixed_periods`]    | 28          | 7, 12, 14, 15, 21, 24  |
//! | [`overscaled`]       | 3           | 1 (violated, demand 2) |
//!
//! [`nuvd_feasible`] has the lambda interval
//! `[0.75 * sqrt(2), (5 / 6) * sqrt(2)]`.

use busyperiod_taskset::{DualCritMin, Task};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// All three periods equal to 10.
pub fn equal_periods() -> DualCritMin {
    DualCritMin::new([
        Task::low(3.0, 10.0),
        Task::high(3.0, 4.0, 10.0),
        Task::high(2.0, 3.0, 10.0),
    ])
}

/// Periods 7, 15 and 12 with unit scales.
pub fn mixed_periods() -> DualCritMin {
    DualCritMin::new([
        Task::low(4.0, 7.0),
        Task::high(3.0, 4.0, 15.0),
        Task::high(2.0, 3.0, 12.0),
    ])
}

/// EDF-NUVD feasible; plain scaling gives both high tasks scale 0.4.
pub fn nuvd_feasible() -> DualCritMin {
    DualCritMin::new([
        Task::low(1.0, 5.0),
        Task::high(1.0, 2.0, 5.0),
        Task::high(1.0, 2.0, 10.0),
    ])
}

/// Virtual deadlines pulled in far enough that the demand at `t = 1`
/// exceeds the elapsed time.
pub fn overscaled() -> DualCritMin {
    DualCritMin::new([
        Task::low(1.0, 4.0),
        Task::high(1.0, 2.0, 4.0).with_scale(0.25),
        Task::high(1.0, 2.0, 4.0).with_scale(0.25),
    ])
}

/// High-mode utilization of 1.0, so no lambda exists.
pub fn high_mode_overload() -> DualCritMin {
    DualCritMin::new([
        Task::low(1.0, 10.0),
        Task::high(1.0, 5.0, 10.0),
        Task::high(1.0, 5.0, 10.0),
    ])
}

/// Deterministic RNG for reproducible tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
