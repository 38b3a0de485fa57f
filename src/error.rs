//! Error types for TSP operations.

use thiserror::Error;

/// Result type alias for TSP operations.
pub type Result<T> = std::result::Result<T, TspError>;

/// Errors raised at the boundaries of the city model and the solvers.
///
/// These indicate caller programming errors and are never retried.
/// A structurally invalid tour passed to
/// [`CityRegistry::total_travel_distance`](crate::registry::CityRegistry::total_travel_distance)
/// is not an error; it yields [`TravelDistance::Invalid`](crate::registry::TravelDistance::Invalid).
#[derive(Debug, Error)]
pub enum TspError {
    /// The registry holds too few cities for the requested operation.
    #[error("invalid problem: {cities} cities given, at least {required} required")]
    InvalidProblem {
        /// Number of cities present.
        cities: usize,
        /// Minimum number the operation needs.
        required: usize,
    },

    /// A strategy imposes a hard cap on the number of cities.
    #[error("unsupported size: {cities} cities given, strategy supports at most {max}")]
    UnsupportedSize {
        /// Number of cities present.
        cities: usize,
        /// Hard cap of the strategy.
        max: usize,
    },

    /// A city identifier outside `0..N`, or a non-contiguous assignment.
    #[error("invalid city index: {0}")]
    InvalidCityIndex(String),

    /// Malformed sequence input (e.g. not starting at city 0).
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// Invalid configuration parameter.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error while reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TspError::InvalidProblem {
            cities: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid problem: 1 cities given, at least 2 required"
        );

        let err = TspError::UnsupportedSize { cities: 5, max: 4 };
        assert!(err.to_string().contains("at most 4"));

        let err = TspError::InvalidSequence("must start at city 0".into());
        assert_eq!(err.to_string(), "invalid sequence: must start at city 0");
    }
}
