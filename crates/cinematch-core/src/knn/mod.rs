pub mod distance;
pub mod engine;

pub use distance::{euclidean_distance, squared_euclidean};
pub use engine::{NearestNeighborEngine, rank, rank_with_distances};
