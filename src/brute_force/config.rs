//! Brute-force search configuration.

use crate::error::{Result, TspError};
use crate::solver::MIN_CITIES;

/// Configuration for exhaustive tour enumeration.
///
/// # Examples
///
/// ```
/// use u_tsp::brute_force::BruteForceConfig;
///
/// let config = BruteForceConfig::default()
///     .with_parallel(false)
///     .with_warn_above(9);
/// assert_eq!(config.warn_above, 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BruteForceConfig {
    /// Whether to score permutations in parallel using rayon.
    ///
    /// Ignored without the `parallel` feature. The result is identical
    /// either way.
    pub parallel: bool,

    /// City count above which a factorial-cost warning is logged.
    ///
    /// The search itself is never truncated.
    pub warn_above: usize,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            warn_above: 10,
        }
    }
}

impl BruteForceConfig {
    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_warn_above(mut self, n: usize) -> Self {
        self.warn_above = n;
        self
    }

    /// Validates the configuration.
    ///
    /// A `warn_above` below the smallest solvable instance would warn on
    /// every run.
    pub fn validate(&self) -> Result<()> {
        if self.warn_above < MIN_CITIES {
            return Err(TspError::Config(format!(
                "warn_above must be at least {MIN_CITIES}"
            )));
        }
        Ok(())
    }
}
