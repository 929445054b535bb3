//! Influence maps: where allies, enemies and loot are
//!
//! Rebuilt once per turn by diffusing unit strength across the grid.

pub mod field;
pub mod generator;
pub mod maps;

pub use field::{apply, apply_standard, halving_rolloff, sum_aggregate};
pub use generator::InfluenceMapGenerator;
pub use maps::{FieldSet, InfluenceMaps};
