//! Small-instance Travelling Salesman solvers.
//!
//! Provides a shared city model and interchangeable solving strategies:
//!
//! - **Registry**: contiguous city identifiers `0..N` with 2-D coordinates,
//!   a rounded Euclidean metric, sequence validation and tour scoring.
//! - **Brute force**: exhaustive enumeration of all `(N-1)!` tours with a
//!   deterministic first-minimum tie-break, optionally parallel.
//! - **Simulated annealing**: swap-neighborhood local search under the
//!   Metropolis criterion, cooling once per accepted move.
//! - **Solver contract**: the [`TspSolver`](solver::TspSolver) trait every
//!   strategy implements, so strategies can be swapped behind one call.
//!
//! # Example
//!
//! ```
//! use u_tsp::brute_force::BruteForceSolver;
//! use u_tsp::registry::{CityRegistry, Point, TravelDistance};
//! use u_tsp::solver::TspSolver;
//!
//! let registry = CityRegistry::from_points(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 10.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.0, 0.0),
//! ])
//! .unwrap();
//!
//! let tour = BruteForceSolver::default().solve_tsp(&registry).unwrap();
//! assert_eq!(registry.total_travel_distance(&tour), TravelDistance::Distance(40));
//! ```
//!
//! Randomness is always injected through a seedable generator
//! ([`random::create_rng`]); no operation touches process-wide state.

pub mod annealing;
pub mod brute_force;
pub mod config;
pub mod error;
pub mod random;
pub mod registry;
pub mod solver;
pub mod tour;

pub use error::{Result, TspError};
