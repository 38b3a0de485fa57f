//! City generation configuration.

use crate::error::{Result, TspError};

/// Parameters for generating a random city set.
///
/// # Examples
///
/// ```
/// use u_tsp::registry::RegistryConfig;
///
/// let config = RegistryConfig::default()
///     .with_nr_of_cities(6)
///     .with_grid_size(25)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Number of cities to generate (at least 1).
    pub nr_of_cities: usize,

    /// Coordinates are drawn from `[0, grid_size)` in each dimension.
    pub grid_size: u32,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            nr_of_cities: 4,
            grid_size: 10,
            seed: None,
        }
    }
}

impl RegistryConfig {
    pub fn with_nr_of_cities(mut self, n: usize) -> Self {
        self.nr_of_cities = n;
        self
    }

    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.nr_of_cities == 0 {
            return Err(TspError::Config("nr_of_cities must be at least 1".into()));
        }
        if self.grid_size == 0 {
            return Err(TspError::Config("grid_size must be at least 1".into()));
        }
        Ok(())
    }
}
