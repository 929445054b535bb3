//! World collaborators the AI consumes
//!
//! The host game implements these traits; `SimWorld` implements all of
//! them in memory.

pub mod sim;

pub use sim::SimWorld;

use crate::core::types::{CellId, Faction, FactionId, Unit, UnitId};
use crate::grid::HexGrid;

/// Unit and faction possession registry
pub trait UnitRoster {
    fn unit(&self, id: UnitId) -> Option<&Unit>;

    /// All unit ids in a stable order
    fn unit_ids(&self) -> Vec<UnitId>;

    fn units_at(&self, cell: CellId) -> Vec<&Unit>;

    fn units_of(&self, faction: FactionId) -> Vec<UnitId>;

    fn faction(&self, id: FactionId) -> Option<&Faction>;

    /// All faction ids in a stable order
    fn faction_ids(&self) -> Vec<FactionId>;

    fn is_barbaric(&self, faction: FactionId) -> bool {
        self.faction(faction).is_some_and(|f| f.barbaric)
    }
}

/// Movement and combat legality
pub trait UnitRules {
    /// Can `unit` end its move on `cell`
    fn can_occupy(&self, unit: &Unit, cell: CellId) -> bool;

    /// Cost for `unit` to step between adjacent cells, `None` if forbidden
    fn movement_cost(&self, unit: &Unit, from: CellId, to: CellId) -> Option<f32>;

    fn can_melee_attack(&self, attacker: &Unit, defender: &Unit) -> bool;
}

/// Combat strength estimates
pub trait StrengthEstimator {
    fn offensive_strength(&self, unit: &Unit) -> f32;

    /// Defensive strength at `at`, or at the unit's own cell when `None`
    fn defensive_strength(&self, unit: &Unit, at: Option<CellId>) -> f32;
}

/// Per-cell loot value
pub trait PillageSource {
    fn pillage_value(&self, cell: CellId) -> f32;
}

/// Everything the decision core reads from the world
pub trait WorldView: HexGrid + UnitRoster + UnitRules + StrengthEstimator + PillageSource {}

impl<T> WorldView for T where
    T: HexGrid + UnitRoster + UnitRules + StrengthEstimator + PillageSource
{
}

/// Creates units at encampments
pub trait UnitSpawner {
    /// Try to place a new unit of `faction` on `cell`
    fn spawn_unit(&mut self, cell: CellId, faction: FactionId) -> Option<UnitId>;
}

/// Faction gold
pub trait Treasury {
    fn credit_gold(&mut self, faction: FactionId, amount: f32);
}

/// Aggregated faction-level bonuses
pub trait FactionModifiers {
    /// Multiplier applied to encampment bounties (1.0 = none)
    fn bounty_multiplier(&self, faction: FactionId) -> f32;
}
