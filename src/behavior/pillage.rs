//! Raiders strip nearby improvements

use ordered_float::OrderedFloat;
use rand::Rng;
use std::cmp::Reverse;

use crate::behavior::tools::{pillage_utility, pillage_weight};
use crate::behavior::{BehaviorContext, Brain};
use crate::command::Command;
use crate::core::types::{CellId, Unit};
use crate::grid::pathfinding::reachable_within;
use crate::world::WorldView;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pillage;

impl Brain for Pillage {
    /// Best distance-discounted pillage value within the unit's full movement
    fn utility<W: WorldView + ?Sized>(&self, unit: &Unit, ctx: &BehaviorContext<W>) -> f32 {
        if unit.is_civilian() {
            return 0.0;
        }
        let radius = unit.max_movement.max(0.0) as u32;
        let score = pillage_utility(unit, ctx.maps, ctx.world, ctx.config.pillage_coefficient);
        ctx.world
            .cells_in_radius(unit.location, radius)
            .into_iter()
            .map(score)
            .fold(0.0, f32::max)
    }

    /// Walk to the richest reachable improvement and pillage it
    ///
    /// Ties go to the cheaper cell, then to the lower cell id.
    fn commands<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        _rng: &mut R,
    ) -> Vec<Command> {
        let world = ctx.world;
        let weight = pillage_weight(ctx.maps);
        let reachable = reachable_within(world, unit.location, unit.movement, |from, to| {
            world.movement_cost(unit, from, to)
        });

        let target = reachable
            .into_iter()
            .filter(|(cell, _)| weight(*cell) > 0 && world.can_occupy(unit, *cell))
            .max_by_key(|(cell, cost)| (weight(*cell), Reverse(OrderedFloat(*cost)), Reverse(*cell)));

        let Some((cell, _)) = target else {
            return Vec::new();
        };
        let mut commands = Vec::with_capacity(2);
        if cell != unit.location {
            commands.push(Command::move_to(unit.id, cell));
        }
        commands.push(Command::pillage(unit.id, cell));
        commands
    }
}
