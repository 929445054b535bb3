//! Per-cell scoring functions shared by behaviors
//!
//! Every tool is pure: it reads the unit, the maps and the world and
//! returns a closure scoring one cell.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;

use crate::core::config::BehaviorConfig;
use crate::core::types::{CellId, Unit};
use crate::influence::InfluenceMaps;
use crate::world::WorldView;

/// Normalized logistic curve `1 / (1 + e^(-slope * (x - shift)))`
pub fn normalized_logistic(x: f32, slope: f32, shift: f32) -> f32 {
    1.0 / (1.0 + (-slope * (x - shift)).exp())
}

/// Pillage value scaled by `coefficient`, divided by distance + 1, clamped to [0, 1]
pub fn pillage_utility<'a, W: WorldView + ?Sized>(
    unit: &'a Unit,
    maps: &'a InfluenceMaps,
    world: &'a W,
    coefficient: f32,
) -> impl Fn(CellId) -> f32 + 'a {
    move |cell| {
        let distance = world.distance(unit.location, cell) as f32;
        (maps.pillage_value(cell) * coefficient / (distance + 1.0)).clamp(0.0, 1.0)
    }
}

/// How much a unit wants to wander to a cell; never below zero
///
/// Far cells are favored, crowded cells of either side are avoided. The
/// unit's own cell and cells it cannot occupy score zero.
pub fn wander_weight<'a, W: WorldView + ?Sized>(
    unit: &'a Unit,
    maps: &'a InfluenceMaps,
    world: &'a W,
    config: &'a BehaviorConfig,
) -> impl Fn(CellId) -> u32 + 'a {
    move |cell| {
        if cell == unit.location || !world.can_occupy(unit, cell) {
            return 0;
        }
        let distance = world.distance(cell, unit.location) as f32;
        let raw = distance * config.wander_distance_weight
            - maps.ally_presence(cell) * config.wander_ally_weight
            - maps.enemy_presence(cell) * config.wander_enemy_weight;
        raw.round().max(0.0) as u32
    }
}

/// How attractive a cell is as a refuge; higher is better
pub fn flee_weight<'a, W: WorldView + ?Sized>(
    unit: &'a Unit,
    maps: &'a InfluenceMaps,
    world: &'a W,
) -> impl Fn(CellId) -> f32 + 'a {
    move |cell| {
        world.defensive_strength(unit, Some(cell)) + maps.ally_presence(cell)
            - maps.enemy_presence(cell)
            + world.distance(unit.location, cell) as f32
    }
}

/// Rounded pillage value for ranking discrete candidates
pub fn pillage_weight(maps: &InfluenceMaps) -> impl Fn(CellId) -> i32 + '_ {
    move |cell| maps.pillage_value(cell).round() as i32
}

/// True if `cell` holds only civilians and `unit` may melee at least one
pub fn capture_civilian_filter<'a, W: WorldView + ?Sized>(
    unit: &'a Unit,
    world: &'a W,
) -> impl Fn(CellId) -> bool + 'a {
    move |cell| {
        let present = world.units_at(cell);
        !present.is_empty()
            && present.iter().all(|u| u.is_civilian())
            && present.iter().any(|u| world.can_melee_attack(unit, u))
    }
}

/// Draw one candidate with probability proportional to its weight
///
/// `None` when there are no candidates or every weight is zero. Weights are
/// summed as `u64`, so saturated `u32::MAX` entries cannot overflow the total.
pub fn sample_weighted<T: Copy, R: Rng>(candidates: &[(T, u32)], rng: &mut R) -> Option<T> {
    let index = WeightedIndex::new(candidates.iter().map(|(_, w)| u64::from(*w))).ok()?;
    Some(candidates[index.sample(rng)].0)
}
