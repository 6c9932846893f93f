//! # Recommendation Modes
//!
//! Two ways of asking the ranking engine for movies:
//! 1. **Movie based**: the selected movie's own feature row is the query.
//!    The movie is always among its own nearest neighbours, so one extra
//!    neighbour is requested and the movie itself is removed.
//! 2. **Genre based**: a synthetic row built from a [`GenreQuery`].

use cinematch_core::{CinematchError, Neighbor};
use serde::Serialize;
use tracing::debug;

use crate::config::RecommendConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::query::GenreQuery;

/// How to seed a recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendMode {
    /// Movies similar to the catalog entry at this index.
    Movie(usize),
    /// Movies matching a genre selection and target score.
    Genres(GenreQuery),
}

/// One recommended movie, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the result list.
    pub rank: usize,
    /// Catalog index.
    pub index: usize,
    pub title: String,
    pub link: String,
    /// IMDb score.
    pub score: f64,
    /// Distance from the query.
    pub distance: f64,
}

impl Dataset {
    /// Runs a request with the count from `config`.
    ///
    /// # Errors
    ///
    /// See [`Dataset::similar_to`] and [`Dataset::by_genres`].
    pub fn recommend(
        &self,
        mode: &RecommendMode,
        config: &RecommendConfig,
    ) -> Result<Vec<Recommendation>> {
        match mode {
            RecommendMode::Movie(index) => self.similar_to(*index, config.count),
            RecommendMode::Genres(query) => self.by_genres(query, config.count),
        }
    }

    /// Up to `count` movies closest to the movie at `index`, excluding it.
    ///
    /// # Errors
    ///
    /// * `CatalogError::IndexOutOfRange` for an invalid index.
    /// * `CatalogError::Engine(InvalidK)` if `count` is zero.
    pub fn similar_to(&self, index: usize, count: usize) -> Result<Vec<Recommendation>> {
        if count == 0 {
            return Err(CinematchError::InvalidK.into());
        }
        let query = self.features(index)?;

        let neighbors: Vec<Neighbor> = self
            .engine()
            .neighbors(query, count.saturating_add(1))?
            .into_iter()
            .filter(|neighbor| neighbor.index != index)
            .take(count)
            .collect();

        debug!(index, count, returned = neighbors.len(), "movie-based recommendations");
        self.describe(neighbors)
    }

    /// Up to `count` movies closest to a genre query.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Engine(InvalidK)` if `count` is zero.
    pub fn by_genres(&self, query: &GenreQuery, count: usize) -> Result<Vec<Recommendation>> {
        let neighbors = self.engine().neighbors(&query.to_vector(), count)?;

        debug!(count, returned = neighbors.len(), "genre-based recommendations");
        self.describe(neighbors)
    }

    fn describe(&self, neighbors: Vec<Neighbor>) -> Result<Vec<Recommendation>> {
        neighbors
            .into_iter()
            .enumerate()
            .map(|(position, neighbor)| {
                let entry = self.title(neighbor.index)?;
                Ok(Recommendation {
                    rank: position + 1,
                    index: neighbor.index,
                    title: entry.title.clone(),
                    link: entry.link.clone(),
                    score: self.score(neighbor.index)?,
                    distance: neighbor.distance,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCORE;
    use crate::dataset::tests::sample_dataset;
    use crate::error::CatalogError;
    use crate::genres::Genre;

    fn indices(recommendations: &[Recommendation]) -> Vec<usize> {
        recommendations.iter().map(|r| r.index).collect()
    }

    #[test]
    fn similar_movies_exclude_the_selection() {
        let dataset = sample_dataset();
        let recommendations = dataset.similar_to(0, 2).unwrap();

        assert_eq!(indices(&recommendations), vec![4, 1]);
        assert_eq!(recommendations[0].rank, 1);
        assert_eq!(recommendations[0].title, "Avatar: Extended");
        assert_eq!(recommendations[0].distance, 0.0);
        assert_eq!(recommendations[1].rank, 2);
        assert_eq!(recommendations[1].score, 8.8);
    }

    #[test]
    fn selection_is_removed_even_when_not_first() {
        // Row 4 duplicates row 0, which wins the tie on index.
        let dataset = sample_dataset();
        let recommendations = dataset.similar_to(4, 2).unwrap();
        assert_eq!(indices(&recommendations), vec![0, 1]);
    }

    #[test]
    fn similar_count_is_clamped_to_catalog() {
        let dataset = sample_dataset();
        let recommendations = dataset.similar_to(3, 50).unwrap();
        assert_eq!(recommendations.len(), dataset.len() - 1);
        assert!(recommendations.iter().all(|r| r.index != 3));
    }

    #[test]
    fn genre_recommendations() {
        let dataset = sample_dataset();
        let query = GenreQuery::new([Genre::Action, Genre::SciFi], 8.0).unwrap();
        let recommendations = dataset.by_genres(&query, 2).unwrap();

        assert_eq!(indices(&recommendations), vec![1, 0]);
        assert!((recommendations[0].distance - 0.8).abs() < 1e-9);
        assert_eq!(recommendations[1].link, "http://www.imdb.com/title/tt0499549/");
    }

    #[test]
    fn distances_are_non_decreasing() {
        let dataset = sample_dataset();
        let query = GenreQuery::new([Genre::Drama, Genre::Romance], 7.5).unwrap();
        let recommendations = dataset.by_genres(&query, 6).unwrap();

        assert_eq!(recommendations.len(), 6);
        for pair in recommendations.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn zero_count_is_rejected() {
        let dataset = sample_dataset();
        assert!(matches!(
            dataset.similar_to(0, 0),
            Err(CatalogError::Engine(CinematchError::InvalidK))
        ));

        let query = GenreQuery::new([Genre::War], 5.0).unwrap();
        assert!(matches!(
            dataset.by_genres(&query, 0),
            Err(CatalogError::Engine(CinematchError::InvalidK))
        ));
    }

    #[test]
    fn unknown_movie_index() {
        let dataset = sample_dataset();
        assert!(matches!(
            dataset.similar_to(42, 5),
            Err(CatalogError::IndexOutOfRange { index: 42, .. })
        ));
    }

    #[test]
    fn recommend_uses_configured_count() {
        let dataset = sample_dataset();
        let config = RecommendConfig::new().with_count(5);

        let by_movie = dataset.recommend(&RecommendMode::Movie(2), &config).unwrap();
        assert_eq!(by_movie.len(), 5);

        let query = GenreQuery::new([Genre::Horror], DEFAULT_SCORE).unwrap();
        let by_genre = dataset
            .recommend(&RecommendMode::Genres(query), &config)
            .unwrap();
        assert_eq!(by_genre.len(), 5);
        assert_eq!(by_genre[0].index, 5);
    }
}
