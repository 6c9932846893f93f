//! # Movie Dataset
//!
//! Loads the feature catalog (`movie_data.json`) and the parallel title
//! table (`movie_titles.json`) and keeps them side by side: row `i` of the
//! catalog describes title `i`.

use std::fs;
use std::path::{Path, PathBuf};

use cinematch_core::{Catalog, NearestNeighborEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::genres::{FEATURE_DIMENSION, Genre};

/// File holding one feature row per movie.
pub const DATA_FILE: &str = "movie_data.json";
/// File holding one `[title, _, link]` row per movie.
pub const TITLES_FILE: &str = "movie_titles.json";

/// Fuzzy title matches below this Jaro-Winkler similarity are rejected.
const TITLE_MATCH_THRESHOLD: f64 = 0.85;

/// Default dataset directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinematch")
}

/// Display metadata for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<serde_json::Value>")]
pub struct MovieTitle {
    pub title: String,
    /// IMDb page, absolute or site-relative.
    pub link: String,
}

impl TryFrom<Vec<serde_json::Value>> for MovieTitle {
    type Error = String;

    fn try_from(row: Vec<serde_json::Value>) -> std::result::Result<Self, String> {
        let field = |i: usize, name: &str| {
            row.get(i)
                .and_then(serde_json::Value::as_str)
                .map(|s| s.trim().to_owned())
                .ok_or_else(|| format!("title row is missing its {name} (column {i})"))
        };
        Ok(Self {
            title: field(0, "title")?,
            link: field(2, "link")?,
        })
    }
}

/// The movie catalog together with its title table.
#[derive(Debug, Clone)]
pub struct Dataset {
    engine: NearestNeighborEngine,
    titles: Vec<MovieTitle>,
}

impl Dataset {
    /// Pairs a catalog with its title table.
    ///
    /// # Errors
    ///
    /// * `CatalogError::EmptyDataset` if there are no rows.
    /// * `CatalogError::LengthMismatch` if the two tables differ in length.
    /// * `CatalogError::UnexpectedDimension` if rows are not
    ///   [`FEATURE_DIMENSION`] wide.
    pub fn new(catalog: Catalog, titles: Vec<MovieTitle>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(CatalogError::EmptyDataset);
        }
        if catalog.len() != titles.len() {
            return Err(CatalogError::LengthMismatch {
                vectors: catalog.len(),
                titles: titles.len(),
            });
        }
        if catalog.dimension() != FEATURE_DIMENSION {
            return Err(CatalogError::UnexpectedDimension {
                expected: FEATURE_DIMENSION,
                found: catalog.dimension(),
            });
        }

        Ok(Self {
            engine: NearestNeighborEngine::new(catalog),
            titles,
        })
    }

    /// Parses both tables from JSON documents.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed documents,
    /// `CatalogError::Engine` for ragged feature rows, and the
    /// validation errors of [`Dataset::new`].
    pub fn from_json(data: &str, titles: &str) -> Result<Self> {
        let rows: Vec<Vec<f64>> = serde_json::from_str(data).map_err(|source| CatalogError::Json {
            what: DATA_FILE.to_owned(),
            source,
        })?;
        let titles: Vec<MovieTitle> =
            serde_json::from_str(titles).map_err(|source| CatalogError::Json {
                what: TITLES_FILE.to_owned(),
                source,
            })?;

        Self::new(Catalog::new(&rows)?, titles)
    }

    /// Loads [`DATA_FILE`] and [`TITLES_FILE`] from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if either file cannot be read, then
    /// anything [`Dataset::from_json`] reports.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let data = read(&dir.join(DATA_FILE))?;
        let titles = read(&dir.join(TITLES_FILE))?;

        let dataset = Self::from_json(&data, &titles)?;
        info!(movies = dataset.len(), dir = %dir.display(), "loaded movie dataset");
        Ok(dataset)
    }

    /// Number of movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Always `false`: construction rejects empty datasets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    #[must_use]
    pub fn engine(&self) -> &NearestNeighborEngine {
        &self.engine
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }

    #[must_use]
    pub fn titles(&self) -> &[MovieTitle] {
        &self.titles
    }

    /// Title row for `index`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IndexOutOfRange` for an invalid index.
    pub fn title(&self, index: usize) -> Result<&MovieTitle> {
        self.titles.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Feature row for `index`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IndexOutOfRange` for an invalid index.
    pub fn features(&self, index: usize) -> Result<&[f64]> {
        self.catalog()
            .get(index)
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// IMDb score of `index` (the last feature attribute).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IndexOutOfRange` for an invalid index.
    pub fn score(&self, index: usize) -> Result<f64> {
        Ok(self.features(index)?[FEATURE_DIMENSION - 1])
    }

    /// Genres flagged for `index`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IndexOutOfRange` for an invalid index.
    pub fn genres(&self, index: usize) -> Result<Vec<Genre>> {
        Ok(Genre::flagged_in(self.features(index)?))
    }

    /// Resolves a user-typed title to a catalog index.
    ///
    /// Tries an exact match, then a case-insensitive one, then the closest
    /// Jaro-Winkler match (lowest index wins among equals).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownTitle` if nothing is close enough.
    pub fn find_title(&self, name: &str) -> Result<usize> {
        let wanted = name.trim();

        if let Some(index) = self.titles.iter().position(|t| t.title == wanted) {
            return Ok(index);
        }

        let wanted_lower = wanted.to_lowercase();
        if let Some(index) = self
            .titles
            .iter()
            .position(|t| t.title.to_lowercase() == wanted_lower)
        {
            return Ok(index);
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, entry) in self.titles.iter().enumerate() {
            let similarity = strsim::jaro_winkler(&wanted_lower, &entry.title.to_lowercase());
            if best.is_none_or(|(_, best_similarity)| similarity > best_similarity) {
                best = Some((index, similarity));
            }
        }

        match best {
            Some((index, similarity)) if similarity >= TITLE_MATCH_THRESHOLD => {
                debug!(query = wanted, matched = %self.titles[index].title, similarity, "fuzzy title match");
                Ok(index)
            }
            _ => Err(CatalogError::UnknownTitle(wanted.to_owned())),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a feature row from genres and a score.
    pub(crate) fn row(genres: &[Genre], score: f64) -> Vec<f64> {
        let mut row = vec![0.0; FEATURE_DIMENSION];
        for genre in genres {
            row[genre.column()] = 1.0;
        }
        row[FEATURE_DIMENSION - 1] = score;
        row
    }

    pub(crate) fn sample_json() -> (String, String) {
        let rows = vec![
            row(&[Genre::Action, Genre::Adventure, Genre::SciFi], 7.9),
            row(&[Genre::Action, Genre::SciFi], 8.8),
            row(&[Genre::Comedy, Genre::Romance], 7.0),
            row(&[Genre::Drama], 9.3),
            row(&[Genre::Action, Genre::Adventure, Genre::SciFi], 7.9),
            row(&[Genre::Horror, Genre::Thriller], 6.5),
        ];
        let titles = serde_json::json!([
            ["Avatar\u{a0}", "Action|Adventure|Sci-Fi", "http://www.imdb.com/title/tt0499549/"],
            ["Inception", "Action|Sci-Fi", "/title/tt1375666/"],
            ["Notting Hill", "Comedy|Romance", "/title/tt0125439/"],
            ["The Shawshank Redemption", "Drama", "/title/tt0111161/"],
            ["Avatar: Extended", "Action|Adventure|Sci-Fi", "/title/tt0000001/"],
            ["Scream", "Horror|Thriller", "/title/tt0117571/"],
        ]);
        (
            serde_json::to_string(&rows).unwrap(),
            serde_json::to_string(&titles).unwrap(),
        )
    }

    pub(crate) fn sample_dataset() -> Dataset {
        let (data, titles) = sample_json();
        Dataset::from_json(&data, &titles).unwrap()
    }

    #[test]
    fn dataset_from_json() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 6);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.catalog().dimension(), FEATURE_DIMENSION);

        let avatar = dataset.title(0).unwrap();
        assert_eq!(avatar.title, "Avatar");
        assert_eq!(avatar.link, "http://www.imdb.com/title/tt0499549/");
        assert_eq!(dataset.score(1).unwrap(), 8.8);
        assert_eq!(dataset.genres(2).unwrap(), vec![Genre::Comedy, Genre::Romance]);
    }

    #[test]
    fn out_of_range_index() {
        let dataset = sample_dataset();
        assert!(matches!(
            dataset.title(6),
            Err(CatalogError::IndexOutOfRange { index: 6, len: 6 })
        ));
        assert!(dataset.score(99).is_err());
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (data, titles) = sample_json();
        fs::write(dir.path().join(DATA_FILE), data).unwrap();
        fs::write(dir.path().join(TITLES_FILE), titles).unwrap();

        let dataset = Dataset::load(dir.path()).unwrap();
        assert_eq!(dataset.len(), 6);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(dir.path()).unwrap_err();
        match err {
            CatalogError::Io { path, .. } => assert!(path.ends_with(DATA_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let (data, _) = sample_json();
        let titles = r#"[["Avatar", "", "/title/tt0499549/"]]"#;
        let err = Dataset::from_json(&data, titles).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::LengthMismatch {
                vectors: 6,
                titles: 1
            }
        ));
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let err = Dataset::from_json("[[1, 0, 7.5]]", r#"[["A", "", "/a"]]"#).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnexpectedDimension {
                expected: 27,
                found: 3
            }
        ));
    }

    #[test]
    fn ragged_rows_surface_engine_error() {
        let err = Dataset::from_json("[[1, 0], [1]]", r#"[["A", "", "/a"], ["B", "", "/b"]]"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Engine(_)));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = Dataset::from_json("[]", "[]").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyDataset));
    }

    #[test]
    fn malformed_title_row() {
        let (data, _) = sample_json();
        let err = Dataset::from_json(&data, r#"[["only a title"]]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn find_title_exact_and_case_insensitive() {
        let dataset = sample_dataset();
        assert_eq!(dataset.find_title("Inception").unwrap(), 1);
        assert_eq!(dataset.find_title("  notting hill ").unwrap(), 2);
        assert_eq!(dataset.find_title("Avatar").unwrap(), 0);
    }

    #[test]
    fn find_title_fuzzy() {
        let dataset = sample_dataset();
        assert_eq!(dataset.find_title("The Shawshank Redemptoin").unwrap(), 3);
        assert_eq!(dataset.find_title("Inceptoin").unwrap(), 1);
    }

    #[test]
    fn find_title_unknown() {
        let dataset = sample_dataset();
        assert!(matches!(
            dataset.find_title("Zzzz"),
            Err(CatalogError::UnknownTitle(name)) if name == "Zzzz"
        ));
    }

    #[test]
    fn default_data_dir_is_namespaced() {
        assert!(default_data_dir().to_string_lossy().contains("cinematch"));
    }
}
