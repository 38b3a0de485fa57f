//! The city set shared read-only by every solver.

use rand::Rng;
use tracing::debug;

use super::config::RegistryConfig;
use super::types::{DistanceTable, PairKey, Point, TravelDistance};
use crate::error::{Result, TspError};
use crate::random::rng_from_option;

/// Cities keyed by contiguous identifiers `0..N`.
///
/// A registry never holds an empty or gapped identifier set: every
/// constructor and every assignment re-validates the whole mapping, and the
/// mapping is only ever replaced wholesale. Solvers borrow it immutably.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RegistryData"))]
pub struct CityRegistry {
    cities: Vec<Point>,
    grid_size: Option<u32>,
}

/// Unvalidated wire form of a registry; deserialization goes through
/// [`CityRegistry::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RegistryData {
    cities: Vec<Point>,
    #[serde(default)]
    grid_size: Option<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RegistryData> for CityRegistry {
    type Error = TspError;

    fn try_from(data: RegistryData) -> Result<Self> {
        if data.grid_size == Some(0) {
            return Err(TspError::Config("grid_size must be at least 1".into()));
        }
        let mut registry = Self::from_points(data.cities)?;
        registry.grid_size = data.grid_size;
        Ok(registry)
    }
}

impl CityRegistry {
    /// Builds a registry from an explicit identifier → coordinate mapping.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidCityIndex`] if the identifiers are not exactly
    /// `{0, .., n-1}`; [`TspError::InvalidProblem`] if the mapping is empty.
    pub fn new<I>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Point)>,
    {
        Ok(Self {
            cities: contiguous_cities(mapping)?,
            grid_size: None,
        })
    }

    /// Builds a registry from coordinates already ordered by identifier.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        Self::new(points.into_iter().enumerate())
    }

    /// Generates `n` random cities on a `grid_size` grid.
    pub fn random<R: Rng>(n: usize, grid_size: u32, rng: &mut R) -> Result<Self> {
        let mut registry = Self {
            cities: Vec::new(),
            grid_size: None,
        };
        registry.set_cities_coordinates(n, grid_size, rng)?;
        Ok(registry)
    }

    /// Generates cities from a validated [`RegistryConfig`].
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_option(config.seed);
        Self::random(config.nr_of_cities, config.grid_size, &mut rng)
    }

    /// Replaces the city set with `n` cities whose integer coordinates are
    /// drawn uniformly from `[0, grid_size)` in each dimension.
    ///
    /// Returns the new coordinates, indexed by identifier.
    pub fn set_cities_coordinates<R: Rng>(
        &mut self,
        n: usize,
        grid_size: u32,
        rng: &mut R,
    ) -> Result<&[Point]> {
        if n == 0 {
            return Err(TspError::InvalidProblem {
                cities: 0,
                required: 1,
            });
        }
        if grid_size == 0 {
            return Err(TspError::Config("grid_size must be at least 1".into()));
        }

        self.cities = (0..n)
            .map(|_| {
                let x = rng.random_range(0..grid_size);
                let y = rng.random_range(0..grid_size);
                Point::new(f64::from(x), f64::from(y))
            })
            .collect();
        self.grid_size = Some(grid_size);

        debug!(event = "cities_generated", cities = n, grid_size = grid_size);
        Ok(&self.cities)
    }

    /// Replaces the city set with a caller-supplied mapping.
    ///
    /// On error the previous city set is kept untouched. The grid bound of
    /// an earlier generation no longer applies and is cleared.
    pub fn assign_cities<I>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, Point)>,
    {
        self.cities = contiguous_cities(mapping)?;
        self.grid_size = None;
        debug!(event = "cities_assigned", cities = self.cities.len());
        Ok(())
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false` for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Coordinates indexed by city identifier.
    pub fn points(&self) -> &[Point] {
        &self.cities
    }

    pub fn point(&self, id: usize) -> Option<Point> {
        self.cities.get(id).copied()
    }

    /// Grid bound of the last generation, if the cities were generated.
    pub fn grid_size(&self) -> Option<u32> {
        self.grid_size
    }

    /// True iff `sequence` repeats no identifier and uses only identifiers
    /// of this registry.
    ///
    /// Shorter-than-N sequences pass; use [`is_complete_tour`](Self::is_complete_tour)
    /// to also require every city.
    pub fn is_sequence_valid(&self, sequence: &[usize]) -> bool {
        let mut seen = vec![false; self.cities.len()];
        for &id in sequence {
            match seen.get_mut(id) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// True iff `sequence` is a permutation of all identifiers.
    pub fn is_complete_tour(&self, sequence: &[usize]) -> bool {
        sequence.len() == self.cities.len() && self.is_sequence_valid(sequence)
    }

    /// Rounded distance between city `i` and city `j mod N`.
    ///
    /// The modulo lets callers ask for the cyclic successor with `i + 1`.
    pub fn inter_city_distance(&self, i: usize, j: usize) -> Result<u64> {
        let n = self.cities.len();
        let j = j % n;
        let a = self.cities.get(i).ok_or_else(|| {
            TspError::InvalidCityIndex(format!("city {i} is not in 0..{n}"))
        })?;
        Ok(a.rounded_distance(&self.cities[j]))
    }

    /// Total rounded length of `sequence` as a closed cycle.
    pub fn total_travel_distance(&self, sequence: &[usize]) -> TravelDistance {
        if !self.is_sequence_valid(sequence) {
            return TravelDistance::Invalid;
        }
        TravelDistance::Distance(self.cycle_length(sequence))
    }

    /// Sum of rounded legs over an already validated sequence.
    ///
    /// Saturates at `u64::MAX` for astronomically distant cities.
    pub(crate) fn cycle_length(&self, sequence: &[usize]) -> u64 {
        let len = sequence.len();
        sequence
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let b = sequence[(i + 1) % len];
                self.cities[a].rounded_distance(&self.cities[b])
            })
            .fold(0u64, u64::saturating_add)
    }

    /// All rounded pairwise distances for `i > j`.
    pub fn calculate_distances(&self) -> DistanceTable {
        let n = self.cities.len();
        let mut table = DistanceTable::with_cities(n);
        for i in 1..n {
            for j in 0..i {
                table.insert(
                    PairKey::new(i, j),
                    self.cities[i].rounded_distance(&self.cities[j]),
                );
            }
        }
        table
    }

    /// Coordinates of `sequence` with its first point repeated at the end.
    pub fn plot_path(&self, sequence: &[usize]) -> Result<Vec<Point>> {
        let n = self.cities.len();
        let mut path = sequence
            .iter()
            .map(|&id| {
                self.point(id).ok_or_else(|| {
                    TspError::InvalidCityIndex(format!("city {id} is not in 0..{n}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if let Some(&first) = path.first() {
            path.push(first);
        }
        Ok(path)
    }
}

/// Checks that `mapping` covers exactly `0..n` once each with finite
/// coordinates, and orders it.
fn contiguous_cities<I>(mapping: I) -> Result<Vec<Point>>
where
    I: IntoIterator<Item = (usize, Point)>,
{
    let entries: Vec<(usize, Point)> = mapping.into_iter().collect();
    let n = entries.len();
    if n == 0 {
        return Err(TspError::InvalidProblem {
            cities: 0,
            required: 1,
        });
    }

    let mut slots: Vec<Option<Point>> = vec![None; n];
    for (id, point) in entries {
        match slots.get_mut(id) {
            None => {
                return Err(TspError::InvalidCityIndex(format!(
                    "each index from 0 to {} must occur, got {id}",
                    n - 1
                )))
            }
            Some(Some(_)) => {
                return Err(TspError::InvalidCityIndex(format!(
                    "city {id} assigned twice"
                )))
            }
            Some(_) if !(point.x.is_finite() && point.y.is_finite()) => {
                return Err(TspError::InvalidCityIndex(format!(
                    "city {id} has non-finite coordinates ({}, {})",
                    point.x, point.y
                )))
            }
            Some(slot) => *slot = Some(point),
        }
    }

    // n distinct ids all below n fill every slot.
    Ok(slots.into_iter().flatten().collect())
}
