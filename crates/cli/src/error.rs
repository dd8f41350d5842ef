//! Error types for the busyp CLI

use std::io;
use std::path::PathBuf;

use busyperiod_search::SearchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Failed to record counterexample to {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ConfigRead { .. } | CliError::ConfigParse { .. } => 2,
            CliError::Search(e) if e.is_config_error() => 2,
            CliError::Search(_) => 3,
            CliError::Record { .. } | CliError::Output(_) => 4,
        }
    }

    /// Short machine-readable name used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::ConfigRead { .. } => "config_read",
            CliError::ConfigParse { .. } => "config_parse",
            CliError::Search(_) => "search",
            CliError::Record { .. } => "record",
            CliError::Output(_) => "output",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        let missing = CliError::ConfigRead {
            path: PathBuf::from("search.yaml"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(missing.exit_code(), 2);
        assert_eq!(missing.kind(), "config_read");
        assert_eq!(CliError::Search(SearchError::ReporterPanicked).exit_code(), 3);
        assert_eq!(
            CliError::Search(SearchError::InvalidConfig("workers".into())).exit_code(),
            2
        );
        let io = io::Error::other("disk full");
        assert_eq!(
            CliError::Record {
                path: PathBuf::from("found.jsonl"),
                source: io,
            }
            .exit_code(),
            4
        );
    }
}
