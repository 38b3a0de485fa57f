//! Value types of the city model.

use std::collections::BTreeMap;
use std::fmt;

/// A 2-D city coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Exact Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Euclidean distance rounded to the nearest integer, ties to even.
    ///
    /// All tour scoring goes through this value, never through the exact
    /// distance, so two tours compare equal whenever their rounded legs do.
    pub fn rounded_distance(&self, other: &Point) -> u64 {
        self.distance(other).round_ties_even() as u64
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Outcome of scoring a sequence against a registry.
///
/// A sequence with repeated or foreign identifiers scores as
/// [`TravelDistance::Invalid`]; it is never mixed into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDistance {
    /// Rounded length of the closed cycle.
    Distance(u64),
    /// The sequence failed [`CityRegistry::is_sequence_valid`](super::CityRegistry::is_sequence_valid).
    Invalid,
}

impl TravelDistance {
    /// Returns the distance, or `None` for an invalid sequence.
    pub fn value(self) -> Option<u64> {
        match self {
            TravelDistance::Distance(d) => Some(d),
            TravelDistance::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, TravelDistance::Distance(_))
    }
}

impl fmt::Display for TravelDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelDistance::Distance(d) => write!(f, "{d}"),
            TravelDistance::Invalid => f.write_str("Invalid"),
        }
    }
}

/// Unordered city pair, stored with `first > second`.
///
/// Displays as the concatenation `"{first}{second}"`. That string form is
/// only unambiguous while every identifier is a single digit; lookups should
/// go through the typed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub first: usize,
    pub second: usize,
}

impl PairKey {
    /// Normalizes `(a, b)` so the larger identifier comes first.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.max(b),
            second: a.min(b),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Symmetric table of rounded pairwise distances for `i > j`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistanceTable {
    cities: usize,
    entries: BTreeMap<PairKey, u64>,
}

impl DistanceTable {
    pub(crate) fn with_cities(cities: usize) -> Self {
        Self {
            cities,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: PairKey, distance: u64) {
        self.entries.insert(key, distance);
    }

    /// Order-independent lookup; `None` for identifiers outside the table.
    pub fn get(&self, a: usize, b: usize) -> Option<u64> {
        if a >= self.cities || b >= self.cities {
            return None;
        }
        if a == b {
            return Some(0);
        }
        self.entries.get(&PairKey::new(a, b)).copied()
    }

    /// Number of cities the table was built for.
    pub fn cities(&self) -> usize {
        self.cities
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &u64)> {
        self.entries.iter()
    }

    /// The table keyed by the concatenated `"{i}{j}"` strings.
    pub fn to_string_keyed(&self) -> BTreeMap<String, u64> {
        self.entries
            .iter()
            .map(|(k, &d)| (k.to_string(), d))
            .collect()
    }
}
