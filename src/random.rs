//! Seedable random source shared by city generation and annealing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator type threaded through every randomized operation.
pub type TspRng = ChaCha8Rng;

/// Creates a deterministic generator from `seed`.
///
/// ChaCha streams are portable, so a fixed seed reproduces the same
/// cities and the same annealing trajectory on every platform.
pub fn create_rng(seed: u64) -> TspRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from a fresh random seed when `None`.
pub fn rng_from_option(seed: Option<u64>) -> TspRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
