//! Live encampments, their cell bindings and the placement rule

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{BarbarianError, Result};
use crate::core::types::{CellId, EncampmentId};
use crate::grid::HexGrid;

/// A barbarian spawn point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encampment {
    pub id: EncampmentId,
    /// Accumulates every turn until a unit spawn is attempted
    pub spawn_progress: u32,
}

/// Owns every live encampment and which cell it sits on
#[derive(Debug, Clone, Default)]
pub struct EncampmentRegistry {
    live: Vec<Encampment>,
    locations: AHashMap<EncampmentId, CellId>,
    by_cell: AHashMap<CellId, EncampmentId>,
    next_id: u32,
}

impl EncampmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Can a new encampment be placed on `cell`
    ///
    /// Requires land, no mountains, no improvement and no encampment yet.
    pub fn can_accept<G: HexGrid + ?Sized>(&self, grid: &G, cell: CellId) -> bool {
        let Some(tile) = grid.tile(cell) else {
            return false;
        };
        !tile.terrain.is_water()
            && !tile.shape.is_mountainous()
            && tile.improvement.is_none()
            && !self.by_cell.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live encampments in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Encampment> {
        self.live.iter()
    }

    pub fn get(&self, id: EncampmentId) -> Option<&Encampment> {
        self.live.iter().find(|e| e.id == id)
    }

    /// Spawn progress is the only field callers may change
    pub fn progress_mut(&mut self, id: EncampmentId) -> Option<&mut u32> {
        self.live
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.spawn_progress)
    }

    pub fn location_of(&self, id: EncampmentId) -> Option<CellId> {
        self.locations.get(&id).copied()
    }

    pub fn encampment_at(&self, cell: CellId) -> Option<EncampmentId> {
        self.by_cell.get(&cell).copied()
    }

    pub fn has_encampment(&self, cell: CellId) -> bool {
        self.by_cell.contains_key(&cell)
    }

    /// Cells hosting an encampment, in creation order
    pub fn occupied_cells(&self) -> Vec<CellId> {
        self.live
            .iter()
            .filter_map(|e| self.location_of(e.id))
            .collect()
    }

    fn insert(&mut self, cell: CellId) -> EncampmentId {
        let id = EncampmentId(self.next_id);
        self.next_id += 1;
        self.live.push(Encampment {
            id,
            spawn_progress: 0,
        });
        self.locations.insert(id, cell);
        self.by_cell.insert(cell, id);
        id
    }

    fn remove(&mut self, id: EncampmentId) -> Option<(Encampment, CellId)> {
        let index = self.live.iter().position(|e| e.id == id)?;
        let encampment = self.live.remove(index);
        let cell = self.locations.remove(&id)?;
        self.by_cell.remove(&cell);
        Some((encampment, cell))
    }
}

/// The only way encampments are created or destroyed
#[derive(Debug, Clone, Copy, Default)]
pub struct EncampmentFactory;

impl EncampmentFactory {
    /// Validate `cell`, then create an encampment with zero progress on it
    pub fn create<G: HexGrid + ?Sized>(
        registry: &mut EncampmentRegistry,
        grid: &G,
        cell: Option<CellId>,
    ) -> Result<EncampmentId> {
        let cell = cell.ok_or(BarbarianError::MissingCell)?;
        if grid.tile(cell).is_none() {
            return Err(BarbarianError::UnknownCell(cell));
        }
        if !registry.can_accept(grid, cell) {
            return Err(BarbarianError::InvalidPlacement(cell));
        }
        let id = registry.insert(cell);
        info!(?id, ?cell, "encampment created");
        Ok(id)
    }

    /// Unbind and remove an encampment, returning it with its former cell
    pub fn destroy(
        registry: &mut EncampmentRegistry,
        id: Option<EncampmentId>,
    ) -> Result<(Encampment, CellId)> {
        let id = id.ok_or(BarbarianError::MissingEncampment)?;
        let removed = registry
            .remove(id)
            .ok_or(BarbarianError::UnknownEncampment(id))?;
        info!(?id, cell = ?removed.1, "encampment destroyed");
        Ok(removed)
    }
}
