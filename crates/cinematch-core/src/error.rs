use thiserror::Error;

/// Errors that can occur during nearest-neighbour ranking.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CinematchError {
    /// A vector does not have the dimensionality of the catalog it is
    /// compared against.
    #[error("dimension mismatch: expected {expected}, got {found}{}", row_suffix(*row))]
    DimensionMismatch {
        /// Dimensionality of the catalog (or of its first row).
        expected: usize,
        /// Dimensionality of the offending vector.
        found: usize,
        /// Catalog row that disagrees with the first row, `None` for the query.
        row: Option<usize>,
    },

    /// The requested neighbour count is zero.
    #[error("k must be at least 1")]
    InvalidK,
}

fn row_suffix(row: Option<usize>) -> String {
    match row {
        Some(row) => format!(" (catalog row {row})"),
        None => " (query)".to_owned(),
    }
}

/// Result type alias for Cinematch core operations.
pub type Result<T> = std::result::Result<T, CinematchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CinematchError::InvalidK;
        assert_eq!(err.to_string(), "k must be at least 1");

        let err = CinematchError::DimensionMismatch {
            expected: 27,
            found: 3,
            row: None,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 27, got 3 (query)");

        let err = CinematchError::DimensionMismatch {
            expected: 2,
            found: 3,
            row: Some(4),
        };
        assert!(err.to_string().contains("catalog row 4"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CinematchError>();
    }
}
