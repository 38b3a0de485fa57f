//! Annealing configuration.

use std::time::Duration;

use crate::error::{Result, TspError};

/// Configuration for the simulated annealing solver.
///
/// The temperature starts at `initial_temperature` and drops by
/// `temperature_step` on every *accepted* move; the run ends once it is no
/// longer above `temperature_step`.
///
/// # Examples
///
/// ```
/// use u_tsp::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(10.0)
///     .with_temperature_step(0.01)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealingConfig {
    /// Initial temperature `t_0`. Must be positive.
    pub initial_temperature: f64,

    /// Temperature decrement `dt` per accepted move, `0 < dt < t_0`.
    pub temperature_step: f64,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock budget in milliseconds. `None` = no limit.
    pub time_limit_ms: Option<u64>,

    /// Whether to record the plottable path after every iteration.
    pub record_history: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: std::f64::consts::SQRT_2,
            temperature_step: 1e-4,
            max_iterations: 0,
            time_limit_ms: None,
            record_history: true,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_temperature_step(mut self, dt: f64) -> Self {
        self.temperature_step = dt;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis() as u64);
        self
    }

    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Upper bound on iterations if every proposal were accepted.
    pub fn accepted_move_budget(&self) -> usize {
        ((self.initial_temperature - self.temperature_step) / self.temperature_step).ceil()
            as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let t0 = self.initial_temperature;
        let dt = self.temperature_step;
        if !t0.is_finite() || t0 <= 0.0 {
            return Err(TspError::Config(format!(
                "initial_temperature must be positive, got {t0}"
            )));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(TspError::Config(format!(
                "temperature_step must be positive, got {dt}"
            )));
        }
        if dt >= t0 {
            return Err(TspError::Config(format!(
                "temperature_step ({dt}) must be less than initial_temperature ({t0})"
            )));
        }
        Ok(())
    }
}
