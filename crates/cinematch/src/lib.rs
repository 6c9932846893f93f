//! # Cinematch
//!
//! Movie recommendations by similarity to a chosen movie or by genre and
//! score, backed by an exhaustive nearest-neighbour search.
//!
//! This crate re-exports [`cinematch_core`] (the ranking engine) and
//! [`cinematch_catalog`] (the movie dataset and recommendation modes).
pub use cinematch_catalog as catalog;
pub use cinematch_core as engine;

pub use cinematch_catalog::{
    CatalogError, Dataset, Genre, GenreQuery, MetadataClient, MovieDetails, RecommendConfig,
    RecommendMode, Recommendation,
};
pub use cinematch_core::{Catalog, CinematchError, NearestNeighborEngine, Neighbor, rank};
