//! Search configuration.
//!
//! [`SearchConfig`] holds the stopping policy and retention parameters for
//! the sampling loop. The loop itself has no natural end, so every bound
//! here is optional and `0` means "no limit".

use crate::error::ConfigError;
use std::time::Duration;

/// Configuration for the random-search loop.
///
/// # Defaults
///
/// ```
/// use u_oncall::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.max_attempts, 100_000);
/// assert_eq!(config.keep_best, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::time::Duration;
/// use u_oncall::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_attempts(0)
///     .with_time_budget(Duration::from_secs(5))
///     .with_keep_best(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of generated candidates, valid or not. 0 = no limit.
    ///
    /// This is the guard against constraint sets that admit no valid
    /// schedule: without it such a search spins forever.
    pub max_attempts: usize,

    /// Stop after this many valid samples. 0 = no limit.
    pub max_samples: usize,

    /// Wall-clock budget for the whole run.
    pub time_budget: Option<Duration>,

    /// Number of lowest-penalty samples to retain.
    pub keep_best: usize,

    /// Stop as soon as a sample with penalty 0 is found.
    pub stop_at_zero: bool,

    /// Number of independent workers for [`SearchRunner::run_parallel`].
    ///
    /// [`SearchRunner::run_parallel`]: super::SearchRunner
    pub workers: usize,

    /// Random seed for reproducibility.
    ///
    /// In parallel runs worker `i` is seeded with `seed + i`.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100_000,
            max_samples: 0,
            time_budget: None,
            keep_best: 1,
            stop_at_zero: true,
            workers: 4,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// A configuration with no bounds at all.
    ///
    /// Runs driven by it end only through cancellation.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: 0,
            stop_at_zero: false,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_max_samples(mut self, n: usize) -> Self {
        self.max_samples = n;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn with_keep_best(mut self, n: usize) -> Self {
        self.keep_best = n;
        self
    }

    pub fn with_stop_at_zero(mut self, stop: bool) -> Self {
        self.stop_at_zero = stop;
        self
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keep_best == 0 {
            return Err(ConfigError::InvalidSearch(
                "keep_best must be at least 1".into(),
            ));
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidSearch(
                "workers must be at least 1".into(),
            ));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidSearch(
                "time_budget must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_attempts, 100_000);
        assert_eq!(config.max_samples, 0);
        assert!(config.time_budget.is_none());
        assert!(config.stop_at_zero);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(SearchConfig::unbounded().validate().is_ok());
    }

    #[test]
    fn test_unbounded_has_no_limits() {
        let config = SearchConfig::unbounded();
        assert_eq!(config.max_attempts, 0);
        assert_eq!(config.max_samples, 0);
        assert!(!config.stop_at_zero);
    }

    #[test]
    fn test_validate_zero_keep_best() {
        let config = SearchConfig::default().with_keep_best(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSearch(_))
        ));
    }

    #[test]
    fn test_validate_zero_workers() {
        let config = SearchConfig::default().with_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_budget() {
        let config = SearchConfig::default().with_time_budget(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
