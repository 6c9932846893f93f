use serde::{Deserialize, Serialize};

use crate::error::{CinematchError, Result};

/// Immutable, row-major catalog of feature vectors.
///
/// Every row has the same dimensionality; this is checked once on
/// construction so ranking only has to validate the query. Row `i` is the
/// stable identity of the `i`-th catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Catalog {
    dimension: usize,
    len: usize,
    /// Concatenated rows of length `dimension`.
    values: Vec<f64>,
}

impl Catalog {
    /// Builds a catalog from its rows.
    ///
    /// # Errors
    ///
    /// Returns `CinematchError::DimensionMismatch` naming the first row whose
    /// length differs from row 0.
    pub fn new<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let dimension = check_uniform(rows)?;
        let mut values = Vec::with_capacity(dimension * rows.len());
        for row in rows {
            values.extend_from_slice(row.as_ref());
        }

        Ok(Self {
            dimension,
            len: rows.len(),
            values,
        })
    }

    /// Number of attributes per row (0 for an empty catalog).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns row `index`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[f64]> {
        if index >= self.len {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.values[start..start + self.dimension])
    }

    /// Iterates rows in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.len).map(move |i| {
            let start = i * self.dimension;
            &self.values[start..start + self.dimension]
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for Catalog {
    type Error = CinematchError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(&rows)
    }
}

impl From<Catalog> for Vec<Vec<f64>> {
    fn from(catalog: Catalog) -> Self {
        catalog.rows().map(<[f64]>::to_vec).collect()
    }
}

/// Checks that all rows share the dimensionality of row 0 and returns it.
pub(crate) fn check_uniform<R: AsRef<[f64]>>(rows: &[R]) -> Result<usize> {
    let Some(first) = rows.first() else {
        return Ok(0);
    };
    let expected = first.as_ref().len();

    for (row, values) in rows.iter().enumerate().skip(1) {
        let found = values.as_ref().len();
        if found != expected {
            return Err(CinematchError::DimensionMismatch {
                expected,
                found,
                row: Some(row),
            });
        }
    }

    Ok(expected)
}
