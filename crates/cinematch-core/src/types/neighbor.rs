use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A catalog entry returned by a ranking, with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Row index into the catalog.
    pub index: usize,
    /// Euclidean distance to the query (non-negative).
    pub distance: f64,
}

impl Neighbor {
    #[must_use]
    pub fn new(index: usize, distance: f64) -> Self {
        Self { index, distance }
    }

    /// Ranking order: ascending distance, then ascending index.
    ///
    /// A NaN distance sorts after every number, so malformed rows end up
    /// last instead of making the order depend on the sort algorithm.
    #[must_use]
    pub fn rank_order(&self, other: &Self) -> Ordering {
        compare_distance(self.distance, other.distance).then(self.index.cmp(&other.index))
    }
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} (d={:.3})", self.index, self.distance)
    }
}
