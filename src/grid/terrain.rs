//! Tile terrain, shape and improvements

use serde::{Deserialize, Serialize};

/// Base terrain of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Grassland,
    Plains,
    Desert,
    Tundra,
    Snow,
    Coast,
    Ocean,
    Lake,
}

impl Terrain {
    pub fn is_water(&self) -> bool {
        matches!(self, Terrain::Coast | Terrain::Ocean | Terrain::Lake)
    }

    /// Movement points needed to enter (land units)
    pub fn movement_cost(&self) -> f32 {
        match self {
            Terrain::Grassland | Terrain::Plains | Terrain::Desert => 1.0,
            Terrain::Tundra | Terrain::Snow => 1.0,
            Terrain::Coast | Terrain::Ocean | Terrain::Lake => f32::INFINITY,
        }
    }
}

/// Relief of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TerrainShape {
    #[default]
    Flat,
    Forest,
    Hills,
    Mountains,
}

impl TerrainShape {
    pub fn is_mountainous(&self) -> bool {
        matches!(self, TerrainShape::Mountains)
    }

    /// Extra movement points on top of the base terrain
    pub fn movement_cost_modifier(&self) -> f32 {
        match self {
            TerrainShape::Flat => 0.0,
            TerrainShape::Forest | TerrainShape::Hills => 1.0,
            TerrainShape::Mountains => f32::INFINITY,
        }
    }

    /// Additive defense bonus (0.25 = +25%)
    pub fn defense_bonus(&self) -> f32 {
        match self {
            TerrainShape::Flat => 0.0,
            TerrainShape::Forest | TerrainShape::Hills => 0.25,
            TerrainShape::Mountains => 0.5,
        }
    }
}

/// Worked tile improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Improvement {
    Farm,
    Mine,
    Pasture,
    LumberMill,
    TradingPost,
    Road,
}

impl Improvement {
    /// Loot a raider expects from pillaging it
    pub fn pillage_value(&self) -> f32 {
        match self {
            Improvement::Farm => 4.0,
            Improvement::Mine => 5.0,
            Improvement::Pasture => 3.0,
            Improvement::LumberMill => 3.0,
            Improvement::TradingPost => 6.0,
            Improvement::Road => 1.0,
        }
    }
}

/// Everything the core reads about a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TileInfo {
    pub terrain: Terrain,
    pub shape: TerrainShape,
    pub improvement: Option<Improvement>,
}

impl TileInfo {
    pub fn new(terrain: Terrain, shape: TerrainShape) -> Self {
        Self {
            terrain,
            shape,
            improvement: None,
        }
    }

    /// Total movement cost for a land unit entering this tile
    pub fn movement_cost(&self) -> f32 {
        self.terrain.movement_cost() + self.shape.movement_cost_modifier()
    }

    pub fn is_passable(&self) -> bool {
        self.movement_cost().is_finite()
    }
}
