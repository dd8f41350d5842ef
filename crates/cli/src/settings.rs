//! Search configuration from file and flags.

use std::fs;
use std::path::Path;

use busyperiod_search::SearchConfig;
use busyperiod_taskset::ScalingPolicy;
use tracing::debug;

use crate::error::CliError;

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub tries: Option<u64>,
    pub workers: Option<usize>,
    pub seed: Option<u64>,
    pub policy: Option<ScalingPolicy>,
}

impl Overrides {
    pub fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(tries) = self.tries {
            config = config.with_trials(tries);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(policy) = self.policy {
            config = config.with_policy(policy);
        }
        config
    }
}

/// Read a YAML search configuration.
pub fn load_file(path: &Path) -> Result<SearchConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge the optional config file with the flags and validate the result.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<SearchConfig, CliError> {
    let base = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_file(path)?
        }
        None => SearchConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}
