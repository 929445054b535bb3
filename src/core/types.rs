//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Dense, zero-based handle to a grid cell
///
/// Owned by the grid. The index addresses array-backed influence fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for factions (civilizations, city-states, barbarians)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl FactionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for encampments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EncampmentId(pub u32);

/// Turn counter (simulation time unit)
pub type Turn = u32;

/// Broad unit class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitKind {
    /// Workers, settlers, captured prisoners
    Civilian,
    #[default]
    Melee,
    Ranged,
    Mounted,
}

impl UnitKind {
    pub fn is_civilian(&self) -> bool {
        matches!(self, UnitKind::Civilian)
    }

    pub fn all() -> [UnitKind; 4] {
        [
            UnitKind::Civilian,
            UnitKind::Melee,
            UnitKind::Ranged,
            UnitKind::Mounted,
        ]
    }
}

/// A unit as seen by the decision core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub owner: FactionId,
    pub location: CellId,
    /// Movement points left this turn
    pub movement: f32,
    /// Movement points at the start of a turn
    pub max_movement: f32,
    /// Base combat strength before terrain and support
    pub strength: f32,
}

impl Unit {
    pub fn is_civilian(&self) -> bool {
        self.kind.is_civilian()
    }
}

/// Faction template data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    /// Barbaric factions are driven by this crate
    pub barbaric: bool,
}
