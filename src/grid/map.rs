//! Rectangular hex map with dense cell indices

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::CellId;
use crate::grid::hex::HexCoord;
use crate::grid::terrain::{Improvement, Terrain, TerrainShape, TileInfo};
use crate::grid::HexGrid;

/// Hex map laid out as `width` columns by `height` rows of axial coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexMap {
    pub width: u32,
    pub height: u32,
    coords: Vec<HexCoord>,
    tiles: Vec<TileInfo>,
    #[serde(skip)]
    lookup: AHashMap<HexCoord, CellId>,
}

impl HexMap {
    /// Create a new map of flat grassland
    pub fn new(width: u32, height: u32) -> Self {
        let mut coords = Vec::with_capacity((width * height) as usize);
        for r in 0..height as i32 {
            for q in 0..width as i32 {
                coords.push(HexCoord::new(q, r));
            }
        }
        let tiles = vec![TileInfo::default(); coords.len()];
        let mut map = Self {
            width,
            height,
            coords,
            tiles,
            lookup: AHashMap::new(),
        };
        map.rebuild_lookup();
        map
    }

    /// Create a map with random terrain, shapes and improvements
    pub fn generate(width: u32, height: u32, rng: &mut impl Rng) -> Self {
        let mut map = Self::new(width, height);
        for tile in map.tiles.iter_mut() {
            let roll: f32 = rng.gen();
            tile.terrain = if roll < 0.12 {
                Terrain::Ocean
            } else if roll < 0.18 {
                Terrain::Lake
            } else if roll < 0.45 {
                Terrain::Plains
            } else if roll < 0.55 {
                Terrain::Desert
            } else if roll < 0.6 {
                Terrain::Tundra
            } else {
                Terrain::Grassland
            };
            if tile.terrain.is_water() {
                continue;
            }
            let relief: f32 = rng.gen();
            tile.shape = if relief < 0.08 {
                TerrainShape::Mountains
            } else if relief < 0.2 {
                TerrainShape::Hills
            } else if relief < 0.35 {
                TerrainShape::Forest
            } else {
                TerrainShape::Flat
            };
            if !tile.shape.is_mountainous() && rng.gen::<f32>() < 0.1 {
                tile.improvement = Some(match rng.gen_range(0..4) {
                    0 => Improvement::Farm,
                    1 => Improvement::Mine,
                    2 => Improvement::Pasture,
                    _ => Improvement::TradingPost,
                });
            }
        }
        map
    }

    /// Restore the coordinate index after deserialization
    pub fn rebuild_lookup(&mut self) {
        self.lookup = self
            .coords
            .iter()
            .enumerate()
            .map(|(i, coord)| (*coord, CellId(i as u32)))
            .collect();
    }

    pub fn tile_mut(&mut self, cell: CellId) -> Option<&mut TileInfo> {
        self.tiles.get_mut(cell.index())
    }

    /// Set terrain at a coordinate
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) {
        if let Some(tile) = self.cell_at(coord).and_then(|c| self.tile_mut(c)) {
            tile.terrain = terrain;
        }
    }

    /// Set relief at a coordinate
    pub fn set_shape(&mut self, coord: HexCoord, shape: TerrainShape) {
        if let Some(tile) = self.cell_at(coord).and_then(|c| self.tile_mut(c)) {
            tile.shape = shape;
        }
    }

    /// Place or remove an improvement at a coordinate
    pub fn set_improvement(&mut self, coord: HexCoord, improvement: Option<Improvement>) {
        if let Some(tile) = self.cell_at(coord).and_then(|c| self.tile_mut(c)) {
            tile.improvement = improvement;
        }
    }
}

impl HexGrid for HexMap {
    fn cell_count(&self) -> usize {
        self.coords.len()
    }

    fn coord_of(&self, cell: CellId) -> Option<HexCoord> {
        self.coords.get(cell.index()).copied()
    }

    fn cell_at(&self, coord: HexCoord) -> Option<CellId> {
        self.lookup.get(&coord).copied()
    }

    fn tile(&self, cell: CellId) -> Option<&TileInfo> {
        self.tiles.get(cell.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_map_creation() {
        let map = HexMap::new(10, 8);
        assert_eq!(map.cell_count(), 80);
    }

    #[test]
    fn test_cell_lookup_round_trips() {
        let map = HexMap::new(10, 10);
        let cell = map.cell_at(HexCoord::new(3, 4)).expect("in bounds");
        assert_eq!(map.coord_of(cell), Some(HexCoord::new(3, 4)));
    }

    #[test]
    fn test_out_of_bounds() {
        let map = HexMap::new(10, 10);
        assert!(map.cell_at(HexCoord::new(100, 100)).is_none());
        assert!(map.tile(CellId(1000)).is_none());
    }

    #[test]
    fn test_radius_clipped_at_edge() {
        let map = HexMap::new(10, 10);
        let corner = map.cell_at(HexCoord::new(0, 0)).unwrap();
        let cells = map.cells_in_radius(corner, 1);
        // Corner hex keeps two on-map neighbours plus itself
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], corner);
    }

    #[test]
    fn test_set_terrain() {
        let mut map = HexMap::new(5, 5);
        map.set_terrain(HexCoord::new(2, 2), Terrain::Ocean);
        let cell = map.cell_at(HexCoord::new(2, 2)).unwrap();
        assert_eq!(map.tile(cell).unwrap().terrain, Terrain::Ocean);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = HexMap::generate(12, 12, &mut ChaCha8Rng::seed_from_u64(7));
        let b = HexMap::generate(12, 12, &mut ChaCha8Rng::seed_from_u64(7));
        let cells = a.cells();
        assert!(cells.iter().all(|c| a.tile(*c) == b.tile(*c)));
    }
}
