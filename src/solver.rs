//! The common solving contract.
//!
//! Every strategy takes a borrowed [`CityRegistry`] and returns a fresh,
//! complete [`Tour`]. Strategy-specific parameters live in the solver value
//! itself, so strategies can be stored and invoked uniformly.

use crate::annealing::SimulatedAnnealer;
use crate::brute_force::BruteForceSolver;
use crate::error::{Result, TspError};
use crate::registry::CityRegistry;
use crate::tour::Tour;

/// Smallest registry for which a tour is defined.
pub const MIN_CITIES: usize = 2;

/// A TSP solving strategy.
///
/// Implementations must not mutate the registry and must return a
/// permutation of all its identifiers.
pub trait TspSolver {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Hard cap on the number of cities, if the strategy has one.
    fn max_cities(&self) -> Option<usize> {
        None
    }

    /// Solves the instance held by `registry`.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidProblem`] for fewer than [`MIN_CITIES`] cities,
    /// [`TspError::UnsupportedSize`] above [`max_cities`](Self::max_cities).
    fn solve_tsp(&self, registry: &CityRegistry) -> Result<Tour>;
}

/// Checks the registry size against the contract and an optional cap.
pub fn ensure_solvable(registry: &CityRegistry, max: Option<usize>) -> Result<()> {
    let cities = registry.len();
    if cities < MIN_CITIES {
        return Err(TspError::InvalidProblem {
            cities,
            required: MIN_CITIES,
        });
    }
    if let Some(max) = max {
        if cities > max {
            return Err(TspError::UnsupportedSize { cities, max });
        }
    }
    Ok(())
}

/// The available strategies as tagged variants.
#[derive(Debug, Clone)]
pub enum Strategy {
    BruteForce(BruteForceSolver),
    SimulatedAnnealing(SimulatedAnnealer),
}

impl TspSolver for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::BruteForce(s) => s.name(),
            Strategy::SimulatedAnnealing(s) => s.name(),
        }
    }

    fn max_cities(&self) -> Option<usize> {
        match self {
            Strategy::BruteForce(s) => s.max_cities(),
            Strategy::SimulatedAnnealing(s) => s.max_cities(),
        }
    }

    fn solve_tsp(&self, registry: &CityRegistry) -> Result<Tour> {
        match self {
            Strategy::BruteForce(s) => s.solve_tsp(registry),
            Strategy::SimulatedAnnealing(s) => s.solve_tsp(registry),
        }
    }
}

impl From<BruteForceSolver> for Strategy {
    fn from(s: BruteForceSolver) -> Self {
        Strategy::BruteForce(s)
    }
}

impl From<SimulatedAnnealer> for Strategy {
    fn from(s: SimulatedAnnealer) -> Self {
        Strategy::SimulatedAnnealing(s)
    }
}
