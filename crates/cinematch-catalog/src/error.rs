use std::path::PathBuf;

use cinematch_core::CinematchError;
use thiserror::Error;

/// Errors raised while loading the movie dataset or building recommendations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A dataset file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON of the expected shape.
    #[error("failed to parse {what}: {source}")]
    Json {
        /// Which file or document was being parsed.
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset contains no movies.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Feature rows and title rows disagree in count.
    #[error("dataset has {vectors} feature rows but {titles} titles")]
    LengthMismatch { vectors: usize, titles: usize },

    /// Feature rows are not genre flags plus a score.
    #[error("feature rows have {found} attributes, expected {expected}")]
    UnexpectedDimension { expected: usize, found: usize },

    /// A genre name is not part of the vocabulary.
    #[error("unknown genre: {0:?}")]
    UnknownGenre(String),

    /// A genre query was built without any genre.
    #[error("select at least one genre")]
    NoGenresSelected,

    /// No movie title matches the lookup.
    #[error("no movie titled {0:?}")]
    UnknownTitle(String),

    /// A catalog index is out of range.
    #[error("movie index {index} out of range (catalog has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The ranking engine rejected the query.
    #[error(transparent)]
    Engine(#[from] CinematchError),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A scraping pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CatalogError::LengthMismatch {
            vectors: 10,
            titles: 9,
        };
        assert_eq!(err.to_string(), "dataset has 10 feature rows but 9 titles");

        let err = CatalogError::UnknownGenre("Anime".into());
        assert!(err.to_string().contains("Anime"));
    }

    #[test]
    fn engine_errors_pass_through() {
        let err: CatalogError = CinematchError::InvalidK.into();
        assert_eq!(err.to_string(), "k must be at least 1");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogError>();
    }
}
