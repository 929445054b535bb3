//! Hex grid topology consumed by the AI
//!
//! The host game owns the grid. `HexGrid` is the query surface the
//! decision core needs; `HexMap` is a self-contained implementation used
//! by the headless driver and the tests.

pub mod hex;
pub mod map;
pub mod pathfinding;
pub mod terrain;

pub use hex::HexCoord;
pub use map::HexMap;
pub use pathfinding::{cost_to_all, reachable_within};
pub use terrain::{Improvement, Terrain, TerrainShape, TileInfo};

use crate::core::types::CellId;

/// Read-only hex grid topology
pub trait HexGrid {
    /// Number of cells; cell indices run `0..cell_count()`
    fn cell_count(&self) -> usize;

    fn coord_of(&self, cell: CellId) -> Option<HexCoord>;

    fn cell_at(&self, coord: HexCoord) -> Option<CellId>;

    fn tile(&self, cell: CellId) -> Option<&TileInfo>;

    /// Hex distance between two cells, `u32::MAX` if either is off the grid
    fn distance(&self, a: CellId, b: CellId) -> u32 {
        match (self.coord_of(a), self.coord_of(b)) {
            (Some(a), Some(b)) => a.distance(&b),
            _ => u32::MAX,
        }
    }

    /// Existing cells within `radius` of `origin` (inclusive), nearest first
    fn cells_in_radius(&self, origin: CellId, radius: u32) -> Vec<CellId> {
        let Some(center) = self.coord_of(origin) else {
            return Vec::new();
        };
        center
            .hexes_in_range(radius)
            .into_iter()
            .filter_map(|coord| self.cell_at(coord))
            .collect()
    }

    fn neighbors(&self, cell: CellId) -> Vec<CellId> {
        let Some(coord) = self.coord_of(cell) else {
            return Vec::new();
        };
        coord
            .neighbors()
            .into_iter()
            .filter_map(|n| self.cell_at(n))
            .collect()
    }

    fn cells(&self) -> Vec<CellId> {
        (0..self.cell_count() as u32).map(CellId).collect()
    }
}
