//! Error types for the search crate.

use busyperiod_taskset::AnalysisError;

/// Errors that abort a search.
///
/// Failed trials are never errors; they are counted and discarded.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search configuration is out of range.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// The task-set generator rejected its configuration.
    #[error(transparent)]
    Generator(#[from] AnalysisError),

    /// A worker or reporter thread could not be started.
    #[error("failed to spawn thread {name}: {source}")]
    Spawn {
        /// Name of the thread
        name: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked.
    #[error("worker thread {0} panicked")]
    WorkerPanicked(String),

    /// The reporter thread (and with it the result callback) panicked.
    #[error("reporter thread panicked")]
    ReporterPanicked,
}

impl SearchError {
    /// Check whether the error stems from the configuration rather than the
    /// runtime.
    pub fn is_config_error(&self) -> bool {
        matches!(self, SearchError::InvalidConfig(_) | SearchError::Generator(_))
    }
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
