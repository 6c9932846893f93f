//! # Exhaustive k-Nearest-Neighbour Ranking
//!
//! Computes the Euclidean distance from a query to every catalog row, keeps
//! the `k` closest and orders them by `(distance, index)`.

use tracing::debug;

use crate::error::{CinematchError, Result};
use crate::knn::distance::euclidean_distance;
use crate::types::catalog::check_uniform;
use crate::types::{Catalog, Neighbor};

/// Stateless ranking engine over an immutable catalog.
///
/// The engine holds no mutable state, so a single instance can serve any
/// number of concurrent callers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct NearestNeighborEngine {
    catalog: Catalog,
}

impl NearestNeighborEngine {
    /// Wraps an already validated catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Builds the catalog from raw rows and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `CinematchError::DimensionMismatch` if the rows are ragged.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Catalog::new(rows).map(Self::new)
    }

    /// The catalog being searched.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the indices of the `k` rows closest to `query`, nearest first.
    ///
    /// # Errors
    ///
    /// * `CinematchError::InvalidK` if `k` is zero.
    /// * `CinematchError::DimensionMismatch` if the query length differs
    ///   from the catalog dimensionality.
    ///
    /// # Examples
    /// ```
    /// use cinematch_core::NearestNeighborEngine;
    ///
    /// let engine = NearestNeighborEngine::from_rows(&[
    ///     vec![1.0, 0.0, 0.0],
    ///     vec![0.0, 1.0, 0.0],
    ///     vec![0.0, 0.0, 1.0],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(engine.rank(&[1.0, 0.0, 0.0], 2).unwrap(), vec![0, 1]);
    /// ```
    pub fn rank(&self, query: &[f64], k: usize) -> Result<Vec<usize>> {
        Ok(indices(self.neighbors(query, k)?))
    }

    /// Same as [`rank`](Self::rank) but keeps the distance of every result.
    ///
    /// # Errors
    ///
    /// See [`rank`](Self::rank).
    pub fn neighbors(&self, query: &[f64], k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 {
            return Err(CinematchError::InvalidK);
        }
        if self.catalog.is_empty() {
            return Ok(Vec::new());
        }
        check_query(self.catalog.dimension(), query)?;

        Ok(nearest(self.catalog.rows(), query, k))
    }
}

/// Ranks raw catalog rows against `query` without building a [`Catalog`].
///
/// Row uniformity is validated on every call.
///
/// # Errors
///
/// * `CinematchError::InvalidK` if `k` is zero.
/// * `CinematchError::DimensionMismatch` if rows disagree among themselves
///   or with the query.
pub fn rank<R: AsRef<[f64]>>(catalog: &[R], query: &[f64], k: usize) -> Result<Vec<usize>> {
    Ok(indices(rank_with_distances(catalog, query, k)?))
}

/// Like [`rank`] but returns each index with its distance.
///
/// # Errors
///
/// See [`rank`].
pub fn rank_with_distances<R: AsRef<[f64]>>(
    catalog: &[R],
    query: &[f64],
    k: usize,
) -> Result<Vec<Neighbor>> {
    if k == 0 {
        return Err(CinematchError::InvalidK);
    }
    if catalog.is_empty() {
        return Ok(Vec::new());
    }
    let dimension = check_uniform(catalog)?;
    check_query(dimension, query)?;

    Ok(nearest(catalog.iter().map(|row| row.as_ref()), query, k))
}

fn check_query(dimension: usize, query: &[f64]) -> Result<()> {
    if query.len() != dimension {
        return Err(CinematchError::DimensionMismatch {
            expected: dimension,
            found: query.len(),
            row: None,
        });
    }
    Ok(())
}

fn indices(neighbors: Vec<Neighbor>) -> Vec<usize> {
    neighbors.into_iter().map(|n| n.index).collect()
}

/// Scores every row and keeps the `k` best in ranking order.
fn nearest<'a>(rows: impl Iterator<Item = &'a [f64]>, query: &[f64], k: usize) -> Vec<Neighbor> {
    let candidates: Vec<Neighbor> = rows
        .enumerate()
        .map(|(index, row)| Neighbor::new(index, euclidean_distance(query, row)))
        .collect();

    let total = candidates.len();
    let selected = select_smallest(candidates, k);
    debug!(catalog_len = total, k, returned = selected.len(), "ranked query");
    selected
}

/// Partial selection of the `k` smallest candidates followed by a sort of
/// the kept prefix.
///
/// `rank_order` is a total order (indices are unique), so the unstable
/// selection and sort still give a deterministic result.
fn select_smallest(mut candidates: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    let k = k.min(candidates.len());
    if k == 0 {
        return Vec::new();
    }

    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, Neighbor::rank_order);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(Neighbor::rank_order);
    candidates
}
