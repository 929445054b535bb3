//! Builds the per-turn influence maps from unit strengths

use tracing::debug;

use crate::core::config::InfluenceConfig;
use crate::influence::field::apply_standard;
use crate::influence::maps::{FieldSet, InfluenceMaps};
use crate::world::WorldView;

/// Diffuses every unit's strength into ally or enemy presence
#[derive(Debug, Clone)]
pub struct InfluenceMapGenerator {
    max_radius: u32,
}

impl InfluenceMapGenerator {
    pub fn new(config: &InfluenceConfig) -> Self {
        Self {
            max_radius: config.max_radius,
        }
    }

    /// Allocate and populate fresh maps for the current world
    ///
    /// Barbaric units feed ally presence, everyone else enemy presence.
    /// Pillage value is copied from the world.
    pub fn generate_maps<W: WorldView + ?Sized>(&self, world: &W) -> FieldSet {
        let cell_count = world.cell_count();
        let mut maps = InfluenceMaps::zeroed(cell_count);
        let (ally, enemy, pillage) = maps.fields_mut();

        let mut allies = 0usize;
        let mut enemies = 0usize;
        for id in world.unit_ids() {
            let Some(unit) = world.unit(id) else {
                continue;
            };
            let strength = world.offensive_strength(unit);
            if world.is_barbaric(unit.owner) {
                apply_standard(strength, ally, world, unit.location, self.max_radius);
                allies += 1;
            } else {
                apply_standard(strength, enemy, world, unit.location, self.max_radius);
                enemies += 1;
            }
        }

        for cell in world.cells() {
            pillage[cell.index()] = world.pillage_value(cell);
        }

        debug!(cell_count, allies, enemies, "influence maps generated");
        FieldSet::ready(maps)
    }

    /// Invalidate `set` so stale maps are never read next turn
    pub fn clear_maps(&self, set: &mut FieldSet) {
        set.clear();
    }
}
