//! Annealing execution loop.
//!
//! # Algorithm
//!
//! 1. Start from the identity tour `0, 1, .., N-1` at temperature `t_0`
//! 2. While `T > dt`:
//!    a. Swap the cities at two distinct random positions
//!    b. Accept with probability `exp(-ΔL / T)` (Metropolis)
//!    c. On acceptance, adopt the neighbor and lower `T` by `dt`
//!    d. Record the current closed path
//! 3. Return the tour held when the loop exits
//!
//! Cooling is tied to acceptances, not iterations, so a run at low
//! temperature where moves are rarely accepted can take very long.
//! `max_iterations`, `time_limit_ms` and the cancellation flag bound it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::config::AnnealingConfig;
use crate::error::{Result, TspError};
use crate::random::{create_rng, rng_from_option};
use crate::registry::{CityRegistry, Point};
use crate::solver::{ensure_solvable, TspSolver};
use crate::tour::Tour;

/// Stream spacing between restart seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Why an annealing run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Temperature dropped to `dt` or below.
    Cooled,
    /// `max_iterations` reached.
    IterationLimit,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// The cancellation flag was set.
    Cancelled,
}

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// Final tour as city identifiers.
    pub tour: Tour,

    /// Final tour as coordinates, indexed by position.
    pub coordinates: Vec<Point>,

    /// Rounded length of the final tour.
    pub distance: u64,

    /// Temperature when the loop exited.
    pub final_temperature: f64,

    /// Total number of proposals.
    pub iterations: usize,

    /// Number of accepted proposals (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted proposals that shortened the tour.
    pub improving_moves: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Closed coordinate path after every iteration, if recorded.
    pub history: Vec<Vec<Point>>,

    /// Temperature after every iteration, parallel to `history`.
    pub temperatures: Vec<f64>,
}

impl AnnealingResult {
    /// Whether the run was stopped externally (flag or deadline).
    pub fn cancelled(&self) -> bool {
        matches!(
            self.termination,
            Termination::Cancelled | Termination::TimeLimit
        )
    }
}

/// Simulated annealing TSP solver.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealer {
    config: AnnealingConfig,
}

impl SimulatedAnnealer {
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Runs one annealing pass with a generator seeded from the config.
    pub fn run(&self, registry: &CityRegistry) -> Result<AnnealingResult> {
        self.run_with_cancel(registry, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If the flag becomes `true`, the loop stops before its next proposal
    /// and returns the tour held at that point.
    pub fn run_with_cancel(
        &self,
        registry: &CityRegistry,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealingResult> {
        let mut rng = rng_from_option(self.config.seed);
        self.run_with_rng(registry, &mut rng, cancel.as_deref())
    }

    /// Runs with a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        &self,
        registry: &CityRegistry,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<AnnealingResult> {
        ensure_solvable(registry, None)?;
        self.config.validate()?;

        let config = &self.config;
        let n = registry.len();
        let dt = config.temperature_step;
        let deadline = config.time_limit().map(|limit| Instant::now() + limit);

        let mut current: Vec<usize> = (0..n).collect();
        let mut current_distance = registry.cycle_length(&current);
        let mut temperature = config.initial_temperature;

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut termination = Termination::Cooled;
        let mut history = Vec::new();
        let mut temperatures = Vec::new();

        info!(
            event = "solve_start",
            solver = "simulated_annealing",
            cities = n,
            initial_temperature = temperature,
            temperature_step = dt,
            distance = current_distance,
        );

        while temperature > dt {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                termination = Termination::Cancelled;
                break;
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                termination = Termination::IterationLimit;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                termination = Termination::TimeLimit;
                break;
            }

            let neighbor = swap_neighbor(&current, rng);
            let neighbor_distance = registry.cycle_length(&neighbor);
            let delta = neighbor_distance as f64 - current_distance as f64;

            // Metropolis criterion; p >= 1 whenever delta <= 0.
            let probability = (-delta / temperature).exp();
            let threshold: f64 = rng.random();
            trace!(delta = delta, probability = probability, temperature = temperature);

            if probability > threshold {
                if neighbor_distance < current_distance {
                    improving_moves += 1;
                }
                current = neighbor;
                current_distance = neighbor_distance;
                temperature -= dt;
                accepted_moves += 1;
                debug!(
                    event = "move_accepted",
                    distance = current_distance,
                    temperature = temperature,
                );
            }
            iterations += 1;

            if config.record_history {
                history.push(registry.plot_path(&current)?);
                temperatures.push(temperature);
            }
        }

        info!(
            event = "solve_end",
            solver = "simulated_annealing",
            distance = current_distance,
            iterations = iterations,
            accepted = accepted_moves,
            final_temperature = temperature,
            termination = ?termination,
        );

        let coordinates = current
            .iter()
            .filter_map(|&id| registry.point(id))
            .collect();

        Ok(AnnealingResult {
            tour: Tour::new(current),
            coordinates,
            distance: current_distance,
            final_temperature: temperature,
            iterations,
            accepted_moves,
            improving_moves,
            termination,
            history,
            temperatures,
        })
    }

    /// Runs `restarts` independent passes and returns the shortest result.
    ///
    /// Restart `k` is seeded with `seed + k * stride`, so restart 0 equals a
    /// plain [`run`](Self::run). Ties go to the lowest restart index. Passes
    /// run in parallel when the `parallel` feature is enabled; they share no
    /// state.
    pub fn run_multi_start(
        &self,
        registry: &CityRegistry,
        restarts: usize,
    ) -> Result<AnnealingResult> {
        if restarts == 0 {
            return Err(TspError::Config("restarts must be at least 1".into()));
        }
        let base = self.config.seed.unwrap_or_else(rand::random);
        let single = |k: usize| {
            let mut rng = create_rng(base.wrapping_add((k as u64).wrapping_mul(SEED_STRIDE)));
            self.run_with_rng(registry, &mut rng, None)
        };

        #[cfg(feature = "parallel")]
        let results = (0..restarts)
            .into_par_iter()
            .map(single)
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let results = (0..restarts).map(single).collect::<Result<Vec<_>>>()?;

        let (best_restart, best) = results
            .into_iter()
            .enumerate()
            .min_by_key(|(_, r)| r.distance)
            .ok_or_else(|| TspError::Config("restarts must be at least 1".into()))?;

        info!(
            event = "multi_start_end",
            restarts = restarts,
            best_restart = best_restart,
            distance = best.distance,
        );
        Ok(best)
    }
}

impl TspSolver for SimulatedAnnealer {
    fn name(&self) -> &'static str {
        "simulated_annealing"
    }

    fn solve_tsp(&self, registry: &CityRegistry) -> Result<Tour> {
        self.run(registry).map(|r| r.tour)
    }
}

/// Copy of `tour` with the cities at two distinct random positions swapped.
fn swap_neighbor<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let n = tour.len();
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    let mut neighbor = tour.to_vec();
    neighbor.swap(i, j);
    neighbor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::BruteForceSolver;
    use crate::registry::TravelDistance;

    fn registry(coords: &[(f64, f64)]) -> CityRegistry {
        CityRegistry::from_points(coords.iter().map(|&c| Point::from(c)).collect()).unwrap()
    }

    fn square() -> CityRegistry {
        registry(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)])
    }

    fn config() -> AnnealingConfig {
        AnnealingConfig::default()
            .with_initial_temperature(20.0)
            .with_temperature_step(0.01)
            .with_seed(42)
    }

    /// Random instances can sit in a strict local minimum once cold, where
    /// no move is accepted and the temperature stops falling.
    fn capped() -> AnnealingConfig {
        config()
            .with_max_iterations(100_000)
            .with_record_history(false)
    }

    #[test]
    fn test_swap_neighbor_changes_exactly_two_positions() {
        let mut rng = create_rng(3);
        let tour: Vec<usize> = (0..6).collect();
        for _ in 0..200 {
            let neighbor = swap_neighbor(&tour, &mut rng);
            let changed = tour.iter().zip(&neighbor).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 2);
        }
    }

    #[test]
    fn test_returns_valid_permutation() {
        let mut rng = create_rng(8);
        let reg = CityRegistry::random(9, 40, &mut rng).unwrap();
        let result = SimulatedAnnealer::new(capped()).run(&reg).unwrap();
        assert!(reg.is_complete_tour(&result.tour));
        assert_eq!(
            reg.total_travel_distance(&result.tour),
            TravelDistance::Distance(result.distance)
        );
        assert_eq!(result.coordinates.len(), 9);
        for (pos, &id) in result.tour.iter().enumerate() {
            assert_eq!(Some(result.coordinates[pos]), reg.point(id));
        }
    }

    #[test]
    fn test_terminates_cooled() {
        let result = SimulatedAnnealer::new(config()).run(&square()).unwrap();
        assert_eq!(result.termination, Termination::Cooled);
        assert!(result.final_temperature <= 0.01);
        assert!(result.accepted_moves <= config().accepted_move_budget() + 1);
        assert!(result.iterations >= result.accepted_moves);
    }

    #[test]
    fn test_degenerate_all_same_point() {
        let reg = registry(&[(5.0, 5.0); 6]);
        let cfg = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_temperature_step(0.1)
            .with_seed(1);
        let result = SimulatedAnnealer::new(cfg.clone()).run(&reg).unwrap();
        assert_eq!(result.distance, 0);
        // Every proposal has dL = 0 and is accepted.
        assert_eq!(result.iterations, result.accepted_moves);
        assert!(result.iterations <= cfg.accepted_move_budget() + 1);
        assert_eq!(result.improving_moves, 0);
    }

    #[test]
    fn test_history_one_path_per_iteration() {
        let result = SimulatedAnnealer::new(config()).run(&square()).unwrap();
        assert_eq!(result.history.len(), result.iterations);
        for path in &result.history {
            assert_eq!(path.len(), 5);
            assert_eq!(path[0], path[4]);
        }

        let quiet = SimulatedAnnealer::new(config().with_record_history(false))
            .run(&square())
            .unwrap();
        assert!(quiet.history.is_empty());
        assert!(quiet.temperatures.is_empty());
    }

    #[test]
    fn test_history_ends_at_final_tour() {
        let reg = square();
        let result = SimulatedAnnealer::new(config()).run(&reg).unwrap();
        assert_eq!(
            result.history.last(),
            Some(&reg.plot_path(&result.tour).unwrap())
        );
    }

    #[test]
    fn test_temperature_never_rises() {
        let result = SimulatedAnnealer::new(config()).run(&square()).unwrap();
        assert_eq!(result.temperatures.len(), result.iterations);
        assert!(result.temperatures[0] <= 20.0);
        assert!(result.temperatures.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(result.temperatures.last(), Some(&result.final_temperature));

        // Only accepted moves cool.
        let drops = result.temperatures.windows(2).filter(|w| w[1] < w[0]).count();
        let first_drop = usize::from(result.temperatures[0] < 20.0);
        assert_eq!(drops + first_drop, result.accepted_moves);
    }

    #[test]
    fn test_finds_square_optimum() {
        let result = SimulatedAnnealer::new(config()).run(&square()).unwrap();
        assert_eq!(result.distance, 40);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let mut rng = create_rng(21);
        let reg = CityRegistry::random(8, 30, &mut rng).unwrap();
        let a = SimulatedAnnealer::new(capped()).run(&reg).unwrap();
        let b = SimulatedAnnealer::new(capped()).run(&reg).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_two_cities() {
        let reg = registry(&[(0.0, 0.0), (1.0, 1.0)]);
        let result = SimulatedAnnealer::new(config()).run(&reg).unwrap();
        assert_eq!(result.distance, 2);
        assert_eq!(result.iterations, result.accepted_moves);
    }

    #[test]
    fn test_single_city_rejected() {
        let reg = registry(&[(0.0, 0.0)]);
        let err = SimulatedAnnealer::new(config()).run(&reg).unwrap_err();
        assert!(matches!(err, TspError::InvalidProblem { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_temperature_step(2.0);
        let err = SimulatedAnnealer::new(cfg).run(&square()).unwrap_err();
        assert!(matches!(err, TspError::Config(_)));
    }

    #[test]
    fn test_cancellation() {
        // Set before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = SimulatedAnnealer::new(config())
            .run_with_cancel(&square(), Some(cancel))
            .unwrap();
        assert!(result.cancelled());
        assert_eq!(result.iterations, 0);
        assert_eq!(result.tour, Tour::identity(4));
    }

    #[test]
    fn test_max_iterations_limit() {
        let cfg = config()
            .with_initial_temperature(1e6)
            .with_temperature_step(1e-6)
            .with_max_iterations(500);
        let result = SimulatedAnnealer::new(cfg).run(&square()).unwrap();
        assert_eq!(result.iterations, 500);
        assert_eq!(result.termination, Termination::IterationLimit);
    }

    #[test]
    fn test_time_limit() {
        let cfg = config()
            .with_initial_temperature(1e12)
            .with_temperature_step(1e-6)
            .with_record_history(false)
            .with_time_limit(std::time::Duration::from_millis(20));
        let result = SimulatedAnnealer::new(cfg).run(&square()).unwrap();
        assert_eq!(result.termination, Termination::TimeLimit);
        assert!(result.cancelled());
        assert!(square().is_complete_tour(&result.tour));
    }

    #[test]
    fn test_multi_start_restart_zero_matches_run() {
        let mut rng = create_rng(4);
        let reg = CityRegistry::random(7, 25, &mut rng).unwrap();
        let annealer = SimulatedAnnealer::new(capped());
        let single = annealer.run(&reg).unwrap();
        let multi = annealer.run_multi_start(&reg, 1).unwrap();
        assert_eq!(single.tour, multi.tour);
    }

    #[test]
    fn test_multi_start_never_worse_and_near_optimal() {
        let mut rng = create_rng(17);
        let reg = CityRegistry::random(7, 25, &mut rng).unwrap();
        let annealer = SimulatedAnnealer::new(capped());
        let single = annealer.run(&reg).unwrap();
        let multi = annealer.run_multi_start(&reg, 6).unwrap();
        let optimum = BruteForceSolver::default().run(&reg).unwrap().distance;
        assert!(multi.distance <= single.distance);
        assert!(multi.distance >= optimum);
        assert!(reg.is_complete_tour(&multi.tour));
    }

    #[test]
    fn test_multi_start_zero_restarts_rejected() {
        let err = SimulatedAnnealer::new(config())
            .run_multi_start(&square(), 0)
            .unwrap_err();
        assert!(matches!(err, TspError::Config(_)));
    }
}
