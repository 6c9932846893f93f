//! Distance metric used by the ranking engine.

/// Sum of squared per-attribute differences.
///
/// Both slices must have the same length; callers validate dimensionality
/// before reaching this point.
#[inline]
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Euclidean distance between two vectors of equal length.
///
/// Each differing genre flag contributes one unit to the squared sum and
/// score differences contribute proportionally.
#[inline]
#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}
