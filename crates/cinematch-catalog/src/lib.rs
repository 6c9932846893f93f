//! # Cinematch Catalog
//!
//! The IMDb 5000 movie dataset on top of the Cinematch ranking engine:
//! loading the feature and title tables, building genre queries, the
//! movie-based and genre-based recommendation modes, and scraping poster
//! and description metadata for the results.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cinematch_catalog::{Dataset, Genre, GenreQuery};
//!
//! let dataset = Dataset::load("data").unwrap();
//!
//! let index = dataset.find_title("Inception").unwrap();
//! for rec in dataset.similar_to(index, 5).unwrap() {
//!     println!("({}) {} [{}]", rec.rank, rec.title, rec.score);
//! }
//!
//! let query = GenreQuery::new([Genre::Action, Genre::SciFi], 8.0).unwrap();
//! let picks = dataset.by_genres(&query, 10).unwrap();
//! assert!(picks.len() <= 10);
//! ```
pub mod config;
pub mod dataset;
pub mod error;
pub mod genres;
pub mod metadata;
pub mod query;
pub mod recommend;

pub use config::{RecommendConfig, clamp_score};
pub use dataset::{Dataset, MovieTitle, default_data_dir};
pub use error::{CatalogError, Result};
pub use genres::{FEATURE_DIMENSION, Genre};
pub use metadata::{MetadataClient, MovieDetails, PageParser};
pub use query::GenreQuery;
pub use recommend::{RecommendMode, Recommendation};
