//! Combined configuration for a problem instance and its solvers.
//!
//! With the `serde` feature, a whole run can be described in TOML:
//!
//! ```toml
//! [registry]
//! nr_of_cities = 6
//! grid_size = 20
//! seed = 7
//!
//! [annealing]
//! initial_temperature = 10.0
//! temperature_step = 0.01
//! max_iterations = 200000
//!
//! [brute_force]
//! parallel = false
//! ```
//!
//! Missing sections and fields fall back to their defaults.

#[cfg(feature = "serde")]
use std::path::Path;

use crate::annealing::{AnnealingConfig, SimulatedAnnealer};
use crate::brute_force::{BruteForceConfig, BruteForceSolver};
#[cfg(feature = "serde")]
use crate::error::TspError;
use crate::error::Result;
use crate::registry::{CityRegistry, RegistryConfig};

/// Configuration bundle for generating cities and running both strategies.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TspConfig {
    pub registry: RegistryConfig,
    pub annealing: AnnealingConfig,
    pub brute_force: BruteForceConfig,
}

impl TspConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.registry.validate()?;
        self.annealing.validate()?;
        self.brute_force.validate()
    }

    /// Generates the city set described by the `registry` section.
    pub fn build_registry(&self) -> Result<CityRegistry> {
        CityRegistry::from_config(&self.registry)
    }

    pub fn annealer(&self) -> SimulatedAnnealer {
        SimulatedAnnealer::new(self.annealing.clone())
    }

    pub fn brute_force_solver(&self) -> BruteForceSolver {
        BruteForceSolver::new(self.brute_force.clone())
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails validation.
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| TspError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
