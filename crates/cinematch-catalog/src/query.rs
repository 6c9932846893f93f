use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::clamp_score;
use crate::error::{CatalogError, Result};
use crate::genres::{FEATURE_DIMENSION, Genre};

/// A synthetic query: the genres a viewer wants plus the score they expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreQuery {
    genres: BTreeSet<Genre>,
    min_score: f64,
}

impl GenreQuery {
    /// Builds a query from a non-empty genre selection. The score is
    /// clamped with [`clamp_score`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoGenresSelected` if `genres` is empty.
    pub fn new(genres: impl IntoIterator<Item = Genre>, min_score: f64) -> Result<Self> {
        let genres: BTreeSet<Genre> = genres.into_iter().collect();
        if genres.is_empty() {
            return Err(CatalogError::NoGenresSelected);
        }
        Ok(Self {
            genres,
            min_score: clamp_score(min_score),
        })
    }

    /// Parses genre names, e.g. from command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownGenre` for the first unrecognised name,
    /// or `CatalogError::NoGenresSelected` if `names` is empty.
    pub fn from_names<S: AsRef<str>>(names: &[S], min_score: f64) -> Result<Self> {
        let genres = names
            .iter()
            .map(|name| name.as_ref().parse::<Genre>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(genres, min_score)
    }

    /// Selected genres in column order.
    pub fn genres(&self) -> impl Iterator<Item = Genre> + '_ {
        self.genres.iter().copied()
    }

    #[must_use]
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// One flag per genre (1 when selected) followed by the score.
    #[must_use]
    pub fn to_vector(&self) -> Vec<f64> {
        let mut vector = Vec::with_capacity(FEATURE_DIMENSION);
        vector.extend(
            Genre::ALL
                .iter()
                .map(|genre| if self.genres.contains(genre) { 1.0 } else { 0.0 }),
        );
        vector.push(self.min_score);
        vector
    }
}
