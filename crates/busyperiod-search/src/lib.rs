//! Randomized counterexample search for EDF-NUVD scaled task sets.
//!
//! Each trial generates a random minimal dual-criticality task set, scales
//! its virtual deadlines with EDF-NUVD and runs the busy-period demand test.
//! A task set that is EDF-NUVD feasible but fails the demand test is a
//! counterexample. Trials run on a pool of named worker threads; results are
//! delivered through a bounded channel to one reporter thread.
//!
//! # Example
//!
//! ```
//! use busyperiod_search::{SearchConfig, run_search};
//!
//! let config = SearchConfig::new().with_trials(200).with_workers(2).with_seed(7);
//! let summary = run_search(config, |found| eprintln!("{}", found.task_set))?;
//! assert_eq!(summary.trials, 200);
//! # Ok::<(), busyperiod_search::SearchError>(())
//! ```

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod prelude;
pub mod stats;
pub mod trial;

pub use config::{DEFAULT_TRIALS, MAX_QUEUE_CAPACITY, MAX_WORKERS, SearchConfig, TrialLimit};
pub use error::{SearchError, SearchResult};
pub use orchestrator::{REPORTER_THREAD_NAME, Searcher, run_search, worker_seed};
pub use stats::{SearchCounters, SearchSummary};
pub use trial::{
    Counterexample, DiscardReason, NuvdTrial, TrialOutcome, TrialRunner, verify_task_set,
};
