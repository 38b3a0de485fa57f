//! Tours: cyclic visiting orders over city identifiers.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{Result, TspError};
use crate::registry::{CityRegistry, TravelDistance};

/// An ordered, implicitly closed sequence of city identifiers.
///
/// Solvers hand out fresh tours; nothing mutates a tour after it is returned.
/// Parses from digit notation (`"0123"`) or comma lists (`"0,1,12"`) and
/// displays back in the shortest of those that stays unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn new(ids: Vec<usize>) -> Self {
        Self(ids)
    }

    /// The identity order `0, 1, .., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Scores this tour against `registry`.
    pub fn distance(&self, registry: &CityRegistry) -> TravelDistance {
        registry.total_travel_distance(&self.0)
    }

    /// Rotates the tour to start at city 0 and picks the direction whose
    /// second city is smaller.
    ///
    /// Two complete tours describe the same cycle iff their canonical forms
    /// are equal. Tours without city 0 are returned unchanged.
    pub fn canonical(&self) -> Tour {
        let Some(start) = self.0.iter().position(|&id| id == 0) else {
            return self.clone();
        };
        let mut ids = self.0.clone();
        ids.rotate_left(start);
        if ids.len() > 2 && ids[ids.len() - 1] < ids[1] {
            ids[1..].reverse();
        }
        Tour(ids)
    }
}

impl Deref for Tour {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Tour {
    fn from(ids: Vec<usize>) -> Self {
        Self(ids)
    }
}

impl FromStr for Tour {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let ids = if s.contains(',') {
            s.split(',')
                .map(|part| {
                    part.trim().parse::<usize>().map_err(|_| {
                        TspError::InvalidSequence(format!("'{part}' is not a city index"))
                    })
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            s.chars()
                .map(|c| {
                    c.to_digit(10).map(|d| d as usize).ok_or_else(|| {
                        TspError::InvalidSequence(format!("'{c}' is not a city index"))
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };
        Ok(Self(ids))
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let single_digit = self.0.iter().all(|&id| id < 10);
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 && !single_digit {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

/// True iff two sequences starting at city 0 describe the same cycle:
/// identical, or one is the other travelled backwards with city 0 held
/// in place.
///
/// # Errors
///
/// [`TspError::InvalidSequence`] if either sequence does not start at city 0.
pub fn sequences_are_equal(a: &[usize], b: &[usize]) -> Result<bool> {
    if a.first() != Some(&0) || b.first() != Some(&0) {
        return Err(TspError::InvalidSequence(
            "sequence has to start in the first city".into(),
        ));
    }
    if a == b {
        return Ok(true);
    }
    Ok(a.len() == b.len() && a[1..].iter().eq(b[1..].iter().rev()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(s: &str) -> Tour {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_digit_notation() {
        assert_eq!(tour("0123").as_slice(), &[0, 1, 2, 3]);
        assert_eq!(tour("0,1,12").as_slice(), &[0, 1, 12]);
        assert!("01x".parse::<Tour>().is_err());
        assert!("0,,1".parse::<Tour>().is_err());
    }

    #[test]
    fn test_display_round_trips_notation() {
        assert_eq!(tour("3102").to_string(), "3102");
        assert_eq!(Tour::new(vec![0, 11, 2]).to_string(), "0,11,2");
    }

    #[test]
    fn test_sequences_are_equal_reflection() {
        assert!(sequences_are_equal(&tour("0123"), &tour("0321")).unwrap());
        assert!(sequences_are_equal(&tour("0123"), &tour("0123")).unwrap());
        assert!(!sequences_are_equal(&tour("0123"), &tour("0213")).unwrap());
        assert!(!sequences_are_equal(&tour("012"), &tour("0123")).unwrap());
    }

    #[test]
    fn test_sequences_are_equal_requires_start_city() {
        let err = sequences_are_equal(&tour("0123"), &tour("1023")).unwrap_err();
        assert!(matches!(err, TspError::InvalidSequence(_)));
        assert!(sequences_are_equal(&[], &tour("0")).is_err());
    }

    #[test]
    fn test_canonical_rotation_and_reflection() {
        let expected = tour("0123");
        for s in ["0123", "1230", "2301", "0321", "3210", "2103"] {
            assert_eq!(tour(s).canonical(), expected, "{s}");
        }
        assert_eq!(tour("0213").canonical(), tour("0213"));
        assert_eq!(tour("12").canonical(), tour("12"));
    }

    #[test]
    fn test_identity() {
        assert_eq!(Tour::identity(4), tour("0123"));
        assert!(Tour::identity(0).is_empty());
    }
}
