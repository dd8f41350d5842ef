//! Integration tests for the search orchestrator.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use busyperiod_search::{
    Counterexample, DiscardReason, SearchConfig, SearchError, Searcher, TrialLimit, TrialOutcome,
    run_search, verify_task_set,
};
use busyperiod_taskset::{GeneratorConfig, ScalingPolicy, build_checkpoints, first_violation};
use busyperiod_test_helpers::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;

fn overscaled_counterexample() -> Counterexample {
    let set = overscaled();
    let checkpoints = must(build_checkpoints(&set));
    let violation = must_some(first_violation(&set, &checkpoints), "overscaled set passes");
    Counterexample::new(set, checkpoints, violation)
}

mod bounded {
    use super::*;

    #[test]
    fn test_every_trial_is_accounted_for() -> TestResult {
        let config = SearchConfig::new()
            .with_trials(2_000)
            .with_workers(4)
            .with_seed(5);
        let summary = run_search(config, |_| {})?;
        assert_eq!(summary.trials, 2_000);
        assert_eq!(
            summary.schedulable + summary.discarded() + summary.counterexamples,
            summary.trials
        );
        assert!(summary.schedulable > 0);
        assert!(summary.infeasible > 0);
        Ok(())
    }

    #[test]
    fn test_single_worker_is_deterministic() -> TestResult {
        let config = SearchConfig::new()
            .with_trials(1_000)
            .with_workers(1)
            .with_seed(1234);
        let first = run_search(config.clone(), |_| {})?;
        let second = run_search(config, |_| {})?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_every_policy_runs() -> TestResult {
        for policy in ScalingPolicy::ALL {
            let config = SearchConfig::new()
                .with_trials(300)
                .with_workers(2)
                .with_seed(77)
                .with_policy(policy);
            let mut found = Vec::new();
            let summary = run_search(config, |ce| found.push(ce))?;
            assert_eq!(summary.trials, 300);
            assert_eq!(
                summary.schedulable + summary.discarded() + summary.counterexamples,
                summary.trials
            );
            assert_eq!(summary.invalid, 0);
            assert_eq!(u64::try_from(found.len())?, summary.counterexamples);
            for ce in &found {
                assert!(ce.checkpoints.contains(&ce.violated_at));
                assert!(ce.demand > ce.violated_at as f64);
            }
        }
        Ok(())
    }
}

mod reporting {
    use super::*;

    #[test]
    fn test_counterexamples_reach_callback_through_small_queue() -> TestResult {
        let expected = overscaled_counterexample();
        let runner = |_: &mut StdRng| TrialOutcome::Counterexample(overscaled_counterexample());
        let searcher = Searcher::new(
            SearchConfig::new()
                .with_trials(64)
                .with_workers(4)
                .with_queue_capacity(1)
                .with_seed(3),
        )?;

        let mut found = Vec::new();
        let summary = searcher.run_with(&runner, |ce| {
            // Slow consumer: workers block on the full queue.
            thread::sleep(Duration::from_millis(1));
            found.push(ce);
        })?;

        assert_eq!(summary.counterexamples, 64);
        assert_eq!(found.len(), 64);
        assert!(found.iter().all(|ce| *ce == expected));
        assert_eq!(expected.violated_at, 1);
        assert_approx_eq!(expected.demand, 2.0);
        Ok(())
    }

    #[test]
    fn test_reporter_panic_is_reported() -> TestResult {
        let runner = |_: &mut StdRng| TrialOutcome::Counterexample(overscaled_counterexample());
        let searcher = Searcher::new(
            SearchConfig::new()
                .with_trials(16)
                .with_workers(2)
                .with_seed(3),
        )?;
        let err = must_err(searcher.run_with(&runner, |_| panic!("callback failed")));
        assert!(matches!(err, SearchError::ReporterPanicked));
        Ok(())
    }

    #[test]
    fn test_worker_panic_is_reported() -> TestResult {
        let runner = |_: &mut StdRng| -> TrialOutcome { panic!("runner failed") };
        let searcher = Searcher::new(
            SearchConfig::new()
                .with_trials(4)
                .with_workers(1)
                .with_seed(3),
        )?;
        let err = must_err(searcher.run_with(&runner, |_| {}));
        assert!(matches!(err, SearchError::WorkerPanicked(ref name) if name == "busyp-worker-0"));
        Ok(())
    }

    #[test]
    fn test_verify_rescales_from_task_parameters() {
        // Hand-picked scales are ignored; high-mode utilization 1.0 has no lambda.
        assert_eq!(
            verify_task_set(overscaled(), ScalingPolicy::Plain),
            TrialOutcome::Discarded(DiscardReason::Infeasible)
        );
    }
}

mod unbounded {
    use super::*;

    #[test]
    fn test_stop_flag_ends_search() -> TestResult {
        let searcher = Searcher::new(
            SearchConfig::new()
                .with_trials(0)
                .with_workers(2)
                .with_seed(8),
        )?;
        assert_eq!(searcher.config().trials, TrialLimit::Unbounded);

        let stop = searcher.stop_flag();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            stop.store(true, Ordering::Relaxed);
        });
        let summary = searcher.run(|_| {})?;
        must(stopper.join());
        assert_eq!(
            summary.schedulable + summary.discarded() + summary.counterexamples,
            summary.trials
        );
        Ok(())
    }

    #[test]
    fn test_discards_are_counted_by_reason() -> TestResult {
        let searcher = Searcher::new(
            SearchConfig::new()
                .with_trials(10)
                .with_workers(1)
                .with_seed(8),
        )?;
        let runner = |_: &mut StdRng| TrialOutcome::Discarded(DiscardReason::NonConvergent);
        let summary = searcher.run_with(&runner, |_| {})?;
        assert_eq!(summary.non_convergent, 10);
        assert_eq!(summary.discarded(), 10);
        Ok(())
    }
}

mod configuration {
    use super::*;

    #[test]
    fn test_yaml_config() -> TestResult {
        let yaml = "trials: 0\nworkers: 3\nseed: 42\npolicy: optimistic\ngenerator:\n  min_period: 2\n  max_period: 12\n";
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.trials, TrialLimit::Unbounded);
        assert_eq!(config.workers, 3);
        assert_eq!(config.queue_capacity, 0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.policy, ScalingPolicy::Optimistic);
        assert_eq!(
            config.generator,
            GeneratorConfig::default().with_period_range(2, 12)
        );
        Ok(())
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        let result: Result<SearchConfig, _> = serde_yaml::from_str("tries: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_yaml_is_default() -> TestResult {
        let config: SearchConfig = serde_yaml::from_str("{}")?;
        assert_eq!(config, SearchConfig::default());
        Ok(())
    }

    #[test]
    fn test_json_round_trip_keeps_trial_count() -> TestResult {
        let config = SearchConfig::new().with_trials(17).with_seed(1);
        let json = serde_json::to_string(&config)?;
        assert!(json.contains("\"trials\":17"));
        let back: SearchConfig = serde_json::from_str(&json)?;
        assert_eq!(back, config);
        Ok(())
    }

    #[test]
    fn test_invalid_generator_is_config_error() {
        let config =
            SearchConfig::new().with_generator(GeneratorConfig::default().with_period_range(5, 4));
        let err = must_err(Searcher::new(config));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_counterexample_json() -> TestResult {
        let value = serde_json::to_value(overscaled_counterexample())?;
        assert_eq!(value["violated_at"], serde_json::json!(1));
        assert_eq!(value["checkpoints"], serde_json::json!([1]));
        assert_eq!(value["task_set"][1]["scale"], serde_json::json!(0.25));
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_normalize_is_idempotent(workers in 0usize..64, queue in 0usize..64, seed in proptest::option::of(any::<u64>())) {
        let mut config = SearchConfig::new().with_workers(workers).with_queue_capacity(queue);
        config.seed = seed;
        config.normalize();
        let once = config.clone();
        config.normalize();
        prop_assert_eq!(&config, &once);
        prop_assert!(config.workers >= 1);
        prop_assert!(config.queue_capacity >= 1);
    }

    #[test]
    fn prop_trial_limit_integer_form(n in any::<u64>()) {
        let limit = TrialLimit::from(n);
        prop_assert_eq!(u64::from(limit), n);
        prop_assert_eq!(limit.is_unbounded(), n == 0);
    }
}
