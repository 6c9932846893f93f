pub mod catalog;
pub mod neighbor;

pub use catalog::Catalog;
pub use neighbor::Neighbor;
