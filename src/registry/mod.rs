//! City model shared by all solvers.
//!
//! A [`CityRegistry`] owns the contiguous identifier → coordinate mapping
//! and the rounded Euclidean metric. It validates sequences and scores
//! tours; solvers only ever read from it.

mod city_registry;
mod config;
mod types;

pub use city_registry::CityRegistry;
pub use config::RegistryConfig;
pub use types::{DistanceTable, PairKey, Point, TravelDistance};
