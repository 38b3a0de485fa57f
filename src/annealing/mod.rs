//! Simulated annealing.
//!
//! Randomized local search over swap neighbors with a linear temperature
//! schedule that advances only on accepted moves. A heuristic: the result
//! is always a valid tour, but not necessarily the shortest.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;

pub use config::AnnealingConfig;
pub use runner::{AnnealingResult, SimulatedAnnealer, Termination};
