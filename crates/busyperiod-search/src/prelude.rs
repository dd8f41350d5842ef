//! Prelude module for common search types.

pub use crate::config::{SearchConfig, TrialLimit};
pub use crate::error::{SearchError, SearchResult};
pub use crate::orchestrator::{Searcher, run_search};
pub use crate::stats::SearchSummary;
pub use crate::trial::{Counterexample, TrialOutcome, TrialRunner};
