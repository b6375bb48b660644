//! Engine configuration.

use crate::error::{EvolveError, EvolveResult};
use std::time::Duration;

/// Configuration for the steady-state engine.
///
/// Holds the numeric knobs of a search. Problem callbacks (fitness,
/// create, mutate, crossover, display) live on the
/// [`EngineBuilder`](super::EngineBuilder).
///
/// # Examples
///
/// ```
/// use u_evolve::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_pool_size(25)
///     .with_max_age(500)
///     .with_max_seconds(2.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Number of parallel lineages.
    ///
    /// 1 disables rotation: single-lineage hill climbing.
    pub pool_size: usize,

    /// Number of non-improving children a lineage tolerates before the
    /// annealing test applies.
    ///
    /// `None` disables annealing: worse children are always rejected.
    pub max_age: Option<usize>,

    /// Optional wall-clock bound.
    ///
    /// Checked before every iteration, so a run may overshoot by one
    /// strategy invocation plus one fitness evaluation. `None` removes the
    /// timeout path.
    pub time_limit: Option<Duration>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: 1,
            max_age: None,
            time_limit: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    pub fn with_max_age(mut self, age: usize) -> Self {
        self.max_age = Some(age);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the wall-clock bound in seconds. NaN and negative values are
    /// treated as zero; values beyond [`Duration::MAX`] saturate.
    pub fn with_max_seconds(mut self, seconds: f64) -> Self {
        let limit = if seconds.is_nan() || seconds <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
        };
        self.time_limit = Some(limit);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit = Some(Duration::from_millis(ms));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> EvolveResult<()> {
        if self.pool_size == 0 {
            return Err(EvolveError::config("pool_size must be at least 1"));
        }
        Ok(())
    }
}
