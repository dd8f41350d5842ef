//! Random implicit-deadline dual-criticality task sets.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dual_crit::DualCritMin;
use crate::error::{AnalysisError, AnalysisResult};
use crate::task::Task;

/// Smallest period that can yield strictly positive integer low and high
/// bounds: `floor(U * p) >= 2` is needed for `floor(U' * c_H) >= 1`.
pub const MIN_USABLE_PERIOD: u32 = 3;

/// Generator configuration.
///
/// Periods are drawn uniformly from the integers in
/// `[min_period, max_period]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Smallest period drawn.
    pub min_period: u32,

    /// Largest period drawn.
    pub max_period: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_period: 1,
            max_period: 20,
        }
    }
}

impl GeneratorConfig {
    /// Set the period range.
    pub fn with_period_range(mut self, min_period: u32, max_period: u32) -> Self {
        self.min_period = min_period;
        self.max_period = max_period;
        self
    }

    /// Check that the configuration can produce task sets.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidGeneratorConfig`] if the range is empty,
    /// starts at zero, or cannot reach [`MIN_USABLE_PERIOD`] (the rejection
    /// loop would never terminate).
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.min_period == 0 {
            return Err(AnalysisError::InvalidGeneratorConfig(
                "min_period must be at least 1".to_string(),
            ));
        }
        if self.min_period > self.max_period {
            return Err(AnalysisError::InvalidGeneratorConfig(format!(
                "min_period {} exceeds max_period {}",
                self.min_period, self.max_period
            )));
        }
        if self.max_period < MIN_USABLE_PERIOD {
            return Err(AnalysisError::InvalidGeneratorConfig(format!(
                "max_period must be at least {MIN_USABLE_PERIOD} to yield positive computation bounds"
            )));
        }
        Ok(())
    }
}

/// One accepted draw: integer-valued period and bounds with
/// `0 < low <= high < period`.
#[derive(Debug, Clone, Copy)]
struct Draw {
    period: f64,
    high: f64,
    low: f64,
}

/// Random task-set generator.
///
/// The generator itself is stateless; randomness comes from the caller's
/// RNG so trials are reproducible under a fixed seed.
#[derive(Debug, Clone, Default)]
pub struct TaskSetGenerator {
    config: GeneratorConfig,
}

impl TaskSetGenerator {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidGeneratorConfig`] if `config` is invalid.
    pub fn new(config: GeneratorConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draw until both bounds are strictly positive.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Draw {
        loop {
            let period = f64::from(rng.random_range(self.config.min_period..=self.config.max_period));
            let high = (rng.random::<f64>() * period).floor();
            let low = (rng.random::<f64>() * high).floor();
            if high > 0.0 && low > 0.0 {
                return Draw { period, high, low };
            }
        }
    }

    /// Generate one task set: a low-criticality task at index 0 and two
    /// high-criticality tasks, all with `c_L <= c_H <= d = p`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> DualCritMin {
        let low = self.draw(rng);
        let first = self.draw(rng);
        let second = self.draw(rng);
        DualCritMin::new([
            Task::low(low.low, low.period),
            Task::high(first.low, first.high, first.period),
            Task::high(second.low, second.high, second.period),
        ])
    }
}

/// Generate a task set with the default configuration.
pub fn generate_random_taskset<R: Rng + ?Sized>(rng: &mut R) -> DualCritMin {
    TaskSetGenerator::default().generate(rng)
}
