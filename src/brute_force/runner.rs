//! Exhaustive enumeration.
//!
//! # Algorithm
//!
//! 1. Fix city 0 as the start (tours are cyclic)
//! 2. Enumerate all `(N-1)!` orders of `1..N` lexicographically
//! 3. Score `0 + order` with the registry's rounded cycle length
//! 4. Keep the first minimum in enumeration order
//!
//! Cost is `O(N! * N)`; nothing is pruned.

use itertools::Itertools;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::BruteForceConfig;
use crate::error::Result;
use crate::registry::CityRegistry;
use crate::solver::{ensure_solvable, TspSolver};
use crate::tour::Tour;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct BruteForceResult {
    /// The shortest tour, starting at city 0.
    pub tour: Tour,

    /// Its rounded length.
    pub distance: u64,

    /// Number of candidate tours scored, `(N-1)!`.
    pub evaluated: usize,
}

/// Exhaustive TSP search.
#[derive(Debug, Clone, Default)]
pub struct BruteForceSolver {
    config: BruteForceConfig,
}

impl BruteForceSolver {
    pub fn new(config: BruteForceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BruteForceConfig {
        &self.config
    }

    /// Scores every tour starting at city 0 and returns the shortest.
    ///
    /// Ties go to the tour enumerated first, in both the sequential and
    /// the parallel path.
    pub fn run(&self, registry: &CityRegistry) -> Result<BruteForceResult> {
        ensure_solvable(registry, None)?;
        self.config.validate()?;

        let n = registry.len();
        if n > self.config.warn_above {
            warn!(
                event = "factorial_search",
                cities = n,
                warn_above = self.config.warn_above,
                "brute force will score (N-1)! tours"
            );
        }
        info!(event = "solve_start", solver = "brute_force", cities = n);

        let (distance, index, tour) = if self.config.parallel {
            search_parallel(registry)
        } else {
            search_sequential(registry)
        };
        let evaluated = (1..n).product::<usize>();

        info!(
            event = "solve_end",
            solver = "brute_force",
            distance = distance,
            best_index = index,
            evaluated = evaluated,
        );

        Ok(BruteForceResult {
            tour: Tour::new(tour),
            distance,
            evaluated,
        })
    }
}

impl TspSolver for BruteForceSolver {
    fn name(&self) -> &'static str {
        "brute_force"
    }

    fn solve_tsp(&self, registry: &CityRegistry) -> Result<Tour> {
        self.run(registry).map(|r| r.tour)
    }
}

/// Candidate tours `0 + order` in lexicographic order of `order`.
fn candidates(n: usize) -> impl Iterator<Item = Vec<usize>> {
    (1..n).permutations(n - 1).map(|rest| {
        let mut tour = Vec::with_capacity(rest.len() + 1);
        tour.push(0);
        tour.extend(rest);
        tour
    })
}

fn search_sequential(registry: &CityRegistry) -> (u64, usize, Vec<usize>) {
    let mut best: Option<(u64, usize, Vec<usize>)> = None;
    for (index, tour) in candidates(registry.len()).enumerate() {
        let distance = registry.cycle_length(&tour);
        if best.as_ref().is_none_or(|(d, _, _)| distance < *d) {
            debug!(event = "new_minimum", distance = distance, index = index);
            best = Some((distance, index, tour));
        }
    }
    // n >= 2 yields at least one candidate.
    best.unwrap_or_default()
}

#[cfg(feature = "parallel")]
fn search_parallel(registry: &CityRegistry) -> (u64, usize, Vec<usize>) {
    candidates(registry.len())
        .enumerate()
        .par_bridge()
        .map(|(index, tour)| (registry.cycle_length(&tour), index, tour))
        .min_by_key(|(distance, index, _)| (*distance, *index))
        .unwrap_or_default()
}

#[cfg(not(feature = "parallel"))]
fn search_parallel(registry: &CityRegistry) -> (u64, usize, Vec<usize>) {
    search_sequential(registry)
}
