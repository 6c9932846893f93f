//! # Cinematch Core
//!
//! The ranking engine behind Cinematch. Holds an immutable catalog of
//! feature vectors and returns the `k` entries closest to a query by
//! Euclidean distance, nearest first, ties broken by catalog index.
//!
//! ## Quick Start
//!
//! ```rust
//! use cinematch_core::rank;
//!
//! let catalog = vec![vec![0.0, 0.0]; 10];
//! let nearest = rank(&catalog, &[0.0, 0.0], 5).unwrap();
//!
//! assert_eq!(nearest, vec![0, 1, 2, 3, 4]);
//! ```
pub mod error;
pub mod knn;
pub mod types;

// Re-export primary API
pub use error::{CinematchError, Result};
pub use knn::{NearestNeighborEngine, euclidean_distance, rank, rank_with_distances};
pub use types::{Catalog, Neighbor};
