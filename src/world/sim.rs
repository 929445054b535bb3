//! In-memory world: map, units, factions and gold

use std::collections::BTreeMap;

use ahash::AHashMap;
use tracing::trace;

use crate::command::Command;
use crate::core::types::{CellId, Faction, FactionId, Unit, UnitId, UnitKind};
use crate::encampment::clearing::UnitEnteredCell;
use crate::grid::hex::HexCoord;
use crate::grid::map::HexMap;
use crate::grid::terrain::TileInfo;
use crate::grid::HexGrid;
use crate::world::{
    FactionModifiers, PillageSource, StrengthEstimator, Treasury, UnitRoster, UnitRules,
    UnitSpawner,
};

/// Strength of a freshly spawned barbarian warrior
pub const SPAWNED_UNIT_STRENGTH: f32 = 8.0;
/// Movement points of a freshly spawned barbarian warrior
pub const SPAWNED_UNIT_MOVEMENT: f32 = 2.0;

/// The simulated world
#[derive(Debug, Clone)]
pub struct SimWorld {
    pub map: HexMap,
    units: BTreeMap<UnitId, Unit>,
    factions: BTreeMap<FactionId, Faction>,
    gold: AHashMap<FactionId, f32>,
    bounty_multipliers: AHashMap<FactionId, f32>,
    next_unit_id: u32,
    next_faction_id: u32,
}

impl SimWorld {
    pub fn new(map: HexMap) -> Self {
        Self {
            map,
            units: BTreeMap::new(),
            factions: BTreeMap::new(),
            gold: AHashMap::new(),
            bounty_multipliers: AHashMap::new(),
            next_unit_id: 0,
            next_faction_id: 0,
        }
    }

    pub fn add_faction(&mut self, name: &str, barbaric: bool) -> FactionId {
        let id = FactionId(self.next_faction_id);
        self.next_faction_id += 1;
        self.factions.insert(
            id,
            Faction {
                id,
                name: name.to_string(),
                barbaric,
            },
        );
        id
    }

    /// Add a unit with default stats for its kind
    pub fn add_unit(&mut self, kind: UnitKind, owner: FactionId, location: CellId) -> UnitId {
        let (strength, movement) = match kind {
            UnitKind::Civilian => (0.0, 2.0),
            UnitKind::Melee => (8.0, 2.0),
            UnitKind::Ranged => (6.0, 2.0),
            UnitKind::Mounted => (12.0, 4.0),
        };
        self.add_unit_with(kind, owner, location, strength, movement)
    }

    pub fn add_unit_with(
        &mut self,
        kind: UnitKind,
        owner: FactionId,
        location: CellId,
        strength: f32,
        movement: f32,
    ) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(
            id,
            Unit {
                id,
                kind,
                owner,
                location,
                movement,
                max_movement: movement,
                strength,
            },
        );
        id
    }

    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Shorthand for `map.cell_at`
    pub fn cell(&self, q: i32, r: i32) -> Option<CellId> {
        self.map.cell_at(HexCoord::new(q, r))
    }

    pub fn gold(&self, faction: FactionId) -> f32 {
        self.gold.get(&faction).copied().unwrap_or(0.0)
    }

    pub fn set_bounty_multiplier(&mut self, faction: FactionId, multiplier: f32) {
        self.bounty_multipliers.insert(faction, multiplier);
    }

    /// Restore every unit's movement points
    pub fn begin_turn(&mut self) {
        for unit in self.units.values_mut() {
            unit.movement = unit.max_movement;
        }
    }

    /// Teleport a unit, reporting the entry
    pub fn move_unit(&mut self, id: UnitId, cell: CellId) -> Option<UnitEnteredCell> {
        let unit = self.units.get_mut(&id)?;
        unit.location = cell;
        Some(UnitEnteredCell { unit: id, cell })
    }

    /// Carry out a command, returning the cell entered if the unit moved
    pub fn apply(&mut self, command: &Command) -> Option<UnitEnteredCell> {
        match *command {
            Command::MoveTo { unit, target } => {
                let entered = self.move_unit(unit, target)?;
                if let Some(u) = self.units.get_mut(&unit) {
                    u.movement = 0.0;
                }
                trace!(?unit, ?target, "unit moved");
                Some(entered)
            }
            Command::Pillage { unit, cell } => {
                if let Some(tile) = self.map.tile_mut(cell) {
                    if let Some(improvement) = tile.improvement.take() {
                        trace!(?unit, ?cell, ?improvement, "improvement pillaged");
                    }
                }
                None
            }
        }
    }

    fn tile_info(&self, cell: CellId) -> Option<&TileInfo> {
        self.map.tile(cell)
    }

    fn has_foreign_unit(&self, unit: &Unit, cell: CellId) -> bool {
        self.units
            .values()
            .any(|other| other.location == cell && other.owner != unit.owner)
    }
}

impl HexGrid for SimWorld {
    fn cell_count(&self) -> usize {
        self.map.cell_count()
    }

    fn coord_of(&self, cell: CellId) -> Option<HexCoord> {
        self.map.coord_of(cell)
    }

    fn cell_at(&self, coord: HexCoord) -> Option<CellId> {
        self.map.cell_at(coord)
    }

    fn tile(&self, cell: CellId) -> Option<&TileInfo> {
        self.map.tile(cell)
    }
}

impl UnitRoster for SimWorld {
    fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    fn unit_ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    fn units_at(&self, cell: CellId) -> Vec<&Unit> {
        self.units.values().filter(|u| u.location == cell).collect()
    }

    fn units_of(&self, faction: FactionId) -> Vec<UnitId> {
        self.units
            .values()
            .filter(|u| u.owner == faction)
            .map(|u| u.id)
            .collect()
    }

    fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(&id)
    }

    fn faction_ids(&self) -> Vec<FactionId> {
        self.factions.keys().copied().collect()
    }
}

impl UnitRules for SimWorld {
    /// Land only, no foreign units, one civilian and one combat unit per cell
    fn can_occupy(&self, unit: &Unit, cell: CellId) -> bool {
        let Some(tile) = self.tile_info(cell) else {
            return false;
        };
        if !tile.is_passable() || self.has_foreign_unit(unit, cell) {
            return false;
        }
        !self.units.values().any(|other| {
            other.id != unit.id
                && other.location == cell
                && other.is_civilian() == unit.is_civilian()
        })
    }

    fn movement_cost(&self, unit: &Unit, _from: CellId, to: CellId) -> Option<f32> {
        let tile = self.tile_info(to)?;
        if !tile.is_passable() || self.has_foreign_unit(unit, to) {
            return None;
        }
        Some(tile.movement_cost())
    }

    fn can_melee_attack(&self, attacker: &Unit, defender: &Unit) -> bool {
        !attacker.is_civilian()
            && attacker.owner != defender.owner
            && self.distance(attacker.location, defender.location) <= attacker.max_movement as u32
    }
}

impl StrengthEstimator for SimWorld {
    fn offensive_strength(&self, unit: &Unit) -> f32 {
        unit.strength
    }

    fn defensive_strength(&self, unit: &Unit, at: Option<CellId>) -> f32 {
        let cell = at.unwrap_or(unit.location);
        let bonus = self
            .tile_info(cell)
            .map(|t| t.shape.defense_bonus())
            .unwrap_or(0.0);
        unit.strength * (1.0 + bonus)
    }
}

impl PillageSource for SimWorld {
    fn pillage_value(&self, cell: CellId) -> f32 {
        self.tile_info(cell)
            .and_then(|t| t.improvement)
            .map(|i| i.pillage_value())
            .unwrap_or(0.0)
    }
}

impl UnitSpawner for SimWorld {
    /// Fails when a combat unit already stands on the cell
    fn spawn_unit(&mut self, cell: CellId, faction: FactionId) -> Option<UnitId> {
        self.tile_info(cell)?;
        if self
            .units
            .values()
            .any(|u| u.location == cell && !u.is_civilian())
        {
            return None;
        }
        Some(self.add_unit_with(
            UnitKind::Melee,
            faction,
            cell,
            SPAWNED_UNIT_STRENGTH,
            SPAWNED_UNIT_MOVEMENT,
        ))
    }
}

impl Treasury for SimWorld {
    fn credit_gold(&mut self, faction: FactionId, amount: f32) {
        *self.gold.entry(faction).or_insert(0.0) += amount;
    }
}

impl FactionModifiers for SimWorld {
    fn bounty_multiplier(&self, faction: FactionId) -> f32 {
        self.bounty_multipliers.get(&faction).copied().unwrap_or(1.0)
    }
}
