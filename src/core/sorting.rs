use crate::core::error::FilterError;
use crate::models::{keys, Attributes};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to filtered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Highest rating first
    Rating,
    /// Most reviewed first
    ReviewCount,
    /// Nearest first
    Distance,
    /// Alphabetical by display name
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::ReviewCount => "reviewCount",
            SortKey::Distance => "distance",
            SortKey::Name => "name",
        }
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(SortKey::Rating),
            "reviewCount" => Ok(SortKey::ReviewCount),
            "distance" => Ok(SortKey::Distance),
            "name" => Ok(SortKey::Name),
            other => Err(FilterError::InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two candidates under a sort key.
///
/// Ties compare `Equal` and are left to the stable sort. Candidates missing
/// the sort attribute order after those that have it.
pub fn compare<A: Attributes + ?Sized>(a: &A, b: &A, key: SortKey) -> Ordering {
    match key {
        SortKey::Rating => descending(a.numeric(keys::RATING), b.numeric(keys::RATING)),
        SortKey::ReviewCount => descending(
            a.numeric(keys::REVIEW_COUNT),
            b.numeric(keys::REVIEW_COUNT),
        ),
        SortKey::Distance => ascending(
            a.numeric(keys::DISTANCE_KM),
            b.numeric(keys::DISTANCE_KM),
        ),
        SortKey::Name => a.display_name().cmp(b.display_name()),
    }
}

/// Stable in-place sort
pub fn sort_candidates<A: Attributes>(candidates: &mut [A], key: SortKey) {
    candidates.sort_by(|a, b| compare(a, b, key));
}

#[inline]
fn ascending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => unsigned_zero(a).total_cmp(&unsigned_zero(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[inline]
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => unsigned_zero(b).total_cmp(&unsigned_zero(a)),
        _ => ascending(a, b),
    }
}

/// `total_cmp` orders `-0.0` before `0.0`; both are the same sort value
#[inline]
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, Place};

    fn create_test_place(id: &str, name: &str, rating: Option<f64>, distance_km: f64) -> Candidate {
        Candidate::from(Place {
            id: id.to_string(),
            name: name.to_string(),
            rating,
            review_count: rating.map(|r| (r * 10.0) as u32),
            distance_km: Some(distance_km),
            ..Default::default()
        })
    }

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.id()).collect()
    }

    #[test]
    fn test_parse_sort_keys() {
        assert_eq!("rating".parse::<SortKey>(), Ok(SortKey::Rating));
        assert_eq!("reviewCount".parse::<SortKey>(), Ok(SortKey::ReviewCount));
        assert_eq!("distance".parse::<SortKey>(), Ok(SortKey::Distance));
        assert_eq!("name".parse::<SortKey>(), Ok(SortKey::Name));
        assert_eq!(
            "popularity".parse::<SortKey>(),
            Err(FilterError::InvalidSortKey("popularity".to_string()))
        );
    }

    #[test]
    fn test_rating_ties_keep_source_order() {
        let mut places = vec![
            create_test_place("1", "A", Some(4.5), 1.0),
            create_test_place("2", "B", Some(4.5), 2.0),
            create_test_place("3", "C", Some(4.9), 3.0),
        ];

        sort_candidates(&mut places, SortKey::Rating);
        assert_eq!(ids(&places), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_signed_zero_ratings_tie() {
        let mut places = vec![
            create_test_place("1", "A", Some(0.0), 1.0),
            create_test_place("2", "B", Some(-0.0), 1.0),
            create_test_place("3", "C", Some(0.0), 1.0),
        ];

        sort_candidates(&mut places, SortKey::Rating);
        assert_eq!(ids(&places), vec!["1", "2", "3"]);

        sort_candidates(&mut places, SortKey::ReviewCount);
        assert_eq!(ids(&places), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_distance_ascending() {
        let mut places = vec![
            create_test_place("1", "A", None, 7.5),
            create_test_place("2", "B", None, 0.4),
            create_test_place("3", "C", None, 3.0),
        ];

        sort_candidates(&mut places, SortKey::Distance);
        assert_eq!(ids(&places), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_name_is_bytewise() {
        let mut places = vec![
            create_test_place("1", "bar", None, 1.0),
            create_test_place("2", "Zed", None, 1.0),
            create_test_place("3", "Alpha", None, 1.0),
        ];

        sort_candidates(&mut places, SortKey::Name);
        assert_eq!(ids(&places), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let mut places = vec![
            create_test_place("1", "A", None, 1.0),
            create_test_place("2", "B", Some(3.0), 1.0),
            create_test_place("3", "C", Some(4.0), 1.0),
        ];

        sort_candidates(&mut places, SortKey::ReviewCount);
        assert_eq!(ids(&places), vec!["3", "2", "1"]);
    }
}
