//! Brute-force search.
//!
//! Scores every distinct tour and returns the global minimum. Only
//! tractable for small instances: the number of tours grows as `(N-1)!`.

mod config;
mod runner;

pub use config::BruteForceConfig;
pub use runner::{BruteForceResult, BruteForceSolver};
