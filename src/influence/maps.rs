//! Per-turn influence fields

use crate::core::types::CellId;

/// Ally presence, enemy presence and pillage value, one entry per cell
///
/// All three arrays always share the grid's cell count.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceMaps {
    ally_presence: Vec<f32>,
    enemy_presence: Vec<f32>,
    pillage_value: Vec<f32>,
}

impl InfluenceMaps {
    /// Zero-filled maps for `cell_count` cells
    pub fn zeroed(cell_count: usize) -> Self {
        Self {
            ally_presence: vec![0.0; cell_count],
            enemy_presence: vec![0.0; cell_count],
            pillage_value: vec![0.0; cell_count],
        }
    }

    /// Number of cells covered
    pub fn len(&self) -> usize {
        self.ally_presence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ally_presence.is_empty()
    }

    pub fn ally_presence(&self, cell: CellId) -> f32 {
        self.ally_presence.get(cell.index()).copied().unwrap_or(0.0)
    }

    pub fn enemy_presence(&self, cell: CellId) -> f32 {
        self.enemy_presence.get(cell.index()).copied().unwrap_or(0.0)
    }

    pub fn pillage_value(&self, cell: CellId) -> f32 {
        self.pillage_value.get(cell.index()).copied().unwrap_or(0.0)
    }

    /// Enemy minus ally presence
    pub fn net_hostility(&self, cell: CellId) -> f32 {
        self.enemy_presence(cell) - self.ally_presence(cell)
    }

    pub fn ally_field(&self) -> &[f32] {
        &self.ally_presence
    }

    pub fn enemy_field(&self) -> &[f32] {
        &self.enemy_presence
    }

    pub fn pillage_field(&self) -> &[f32] {
        &self.pillage_value
    }

    pub(crate) fn fields_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        (
            &mut self.ally_presence,
            &mut self.enemy_presence,
            &mut self.pillage_value,
        )
    }
}

/// The current turn's maps, or nothing between turns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    maps: Option<InfluenceMaps>,
}

impl FieldSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ready(maps: InfluenceMaps) -> Self {
        Self { maps: Some(maps) }
    }

    pub fn is_ready(&self) -> bool {
        self.maps.is_some()
    }

    pub fn maps(&self) -> Option<&InfluenceMaps> {
        self.maps.as_ref()
    }

    /// Invalidate all three fields at once
    pub fn clear(&mut self) {
        self.maps = None;
    }
}
