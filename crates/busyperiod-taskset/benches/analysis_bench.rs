//! Benchmarks for the analysis pipeline.
//!
//! Run with: cargo bench --bench analysis_bench

use std::hint::black_box;

use busyperiod_taskset::{
    DualCritMin, ScalingPolicy, Task, TaskSetGenerator, build_checkpoints, busy_period,
    find_violation, scale_edf_nuvd,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn mixed_periods() -> DualCritMin {
    DualCritMin::new([
        Task::low(4.0, 7.0),
        Task::high(3.0, 4.0, 15.0),
        Task::high(2.0, 3.0, 12.0),
    ])
}

fn feasible() -> DualCritMin {
    DualCritMin::new([
        Task::low(1.0, 5.0),
        Task::high(1.0, 2.0, 5.0),
        Task::high(1.0, 2.0, 10.0),
    ])
}

fn bench_busy_period(c: &mut Criterion) {
    let set = mixed_periods();
    c.bench_function("busy_period_mixed", |b| {
        b.iter(|| black_box(busy_period(black_box(&set))));
    });
}

fn bench_checkpoints(c: &mut Criterion) {
    let set = mixed_periods();
    c.bench_function("build_checkpoints_mixed", |b| {
        b.iter(|| black_box(build_checkpoints(black_box(&set))));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale_edf_nuvd");
    for policy in ScalingPolicy::ALL {
        group.bench_function(policy.as_str(), |b| {
            b.iter(|| {
                let mut set = feasible();
                black_box(scale_edf_nuvd(&mut set, black_box(policy)))
            });
        });
    }
    group.finish();
}

fn bench_full_trial(c: &mut Criterion) {
    let generator = TaskSetGenerator::default();
    let mut rng = StdRng::seed_from_u64(0x5EED);
    c.bench_function("generate_scale_check", |b| {
        b.iter(|| {
            let mut set = generator.generate(&mut rng);
            scale_edf_nuvd(&mut set, ScalingPolicy::Plain)
                .and_then(|_| find_violation(&set))
                .map(black_box)
        });
    });
}

criterion_group!(
    benches,
    bench_busy_period,
    bench_checkpoints,
    bench_scaling,
    bench_full_trial
);
criterion_main!(benches);
