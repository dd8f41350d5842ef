//! Property-based tests for the analysis crate.

use busyperiod_taskset::{
    DualCritMin, GeneratorConfig, ScalingPolicy, Task, TaskSetGenerator, build_checkpoints,
    dedup_sorted, scale_edf_nuvd, work_bound,
};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn generated(seed: u64) -> DualCritMin {
    TaskSetGenerator::default().generate(&mut StdRng::seed_from_u64(seed))
}

fn policy_strategy() -> impl Strategy<Value = ScalingPolicy> {
    prop_oneof![
        Just(ScalingPolicy::Plain),
        Just(ScalingPolicy::Optimistic),
        Just(ScalingPolicy::Midpoint),
    ]
}

/// `(low, high, period)` with `1 <= low <= high <= period <= 20`.
fn bounds_strategy() -> impl Strategy<Value = (u32, u32, u32)> {
    (1u32..=20).prop_flat_map(|period| {
        (1..=period).prop_flat_map(move |high| (1..=high).prop_map(move |low| (low, high, period)))
    })
}

/// Arbitrary implicit-deadline task set with positive integer parameters,
/// not necessarily schedulable.
fn task_set_strategy() -> impl Strategy<Value = DualCritMin> {
    (bounds_strategy(), bounds_strategy(), bounds_strategy()).prop_map(|(a, b, c)| {
        DualCritMin::new([
            Task::low(f64::from(a.0), f64::from(a.2)),
            Task::high(f64::from(b.0), f64::from(b.1), f64::from(b.2)),
            Task::high(f64::from(c.0), f64::from(c.1), f64::from(c.2)),
        ])
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Generated sets always satisfy the task model.
    #[test]
    fn prop_generated_sets_validate(seed in any::<u64>()) {
        let set = generated(seed);
        prop_assert!(set.validate().is_ok(), "invalid set:\n{set}");
        prop_assert_eq!(set.iter().filter(|t| t.is_high()).count(), 2);
    }

    /// Generated periods stay within the configured range.
    #[test]
    fn prop_generated_periods_in_range(seed in any::<u64>(), min in 1u32..=10, span in 2u32..=20) {
        let config = GeneratorConfig::default().with_period_range(min, min + span);
        let generator = TaskSetGenerator::new(config).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let set = generator.generate(&mut StdRng::seed_from_u64(seed));
        for task in &set {
            prop_assert!(task.period >= f64::from(min));
            prop_assert!(task.period <= f64::from(min + span));
        }
    }

    /// Successful scaling keeps every scale in [0, 1] and preserves criticality.
    #[test]
    fn prop_scale_in_unit_interval(set in task_set_strategy(), policy in policy_strategy()) {
        let mut scaled = set;
        if scale_edf_nuvd(&mut scaled, policy).is_ok() {
            for (before, after) in set.iter().zip(&scaled) {
                prop_assert!((0.0..=1.0).contains(&after.scale));
                prop_assert_eq!(before.is_high(), after.is_high());
            }
        } else {
            prop_assert_eq!(scaled, set);
        }
    }

    /// Checkpoints are strictly ascending and reproducible.
    #[test]
    fn prop_checkpoints_sorted_and_idempotent(set in task_set_strategy()) {
        if let Ok(first) = build_checkpoints(&set) {
            prop_assert!(first.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(first.iter().all(|&t| t >= 0));
            let second = build_checkpoints(&set).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(first, second);
        }
    }

    /// The demand bound never decreases with time.
    #[test]
    fn prop_work_bound_monotonic(set in task_set_strategy(), t in 0.0f64..200.0, dt in 0.0f64..50.0) {
        prop_assert!(work_bound(&set, t) <= work_bound(&set, t + dt));
    }
}

#[quickcheck]
fn dedup_sorted_is_strictly_ascending(points: Vec<i64>) -> bool {
    dedup_sorted(points).windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn dedup_sorted_keeps_every_value(points: Vec<i64>) -> bool {
    let deduped = dedup_sorted(points.clone());
    points.iter().all(|p| deduped.binary_search(p).is_ok())
}

#[quickcheck]
fn dedup_sorted_is_idempotent(points: Vec<i64>) -> bool {
    let once = dedup_sorted(points);
    dedup_sorted(once.clone()) == once
}

#[quickcheck]
fn work_bound_is_zero_before_any_deadline(seed: u64) -> bool {
    let set = generated(seed);
    let earliest = set
        .iter()
        .map(Task::effective_deadline)
        .fold(f64::INFINITY, f64::min);
    work_bound(&set, earliest - 0.5).abs() < f64::EPSILON
}
