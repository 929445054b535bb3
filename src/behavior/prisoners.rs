//! Captured civilians walk to the nearest encampment

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::behavior::{BehaviorContext, Brain};
use crate::command::Command;
use crate::core::types::Unit;
use crate::grid::pathfinding::cost_to_all;
use crate::world::WorldView;

/// Civilians always want this; combat units never do
#[derive(Debug, Clone, Copy, Default)]
pub struct BePrisoners;

impl Brain for BePrisoners {
    fn utility<W: WorldView + ?Sized>(&self, unit: &Unit, _ctx: &BehaviorContext<W>) -> f32 {
        if unit.is_civilian() {
            1.0
        } else {
            0.0
        }
    }

    /// Move toward the cheapest-to-reach encampment
    ///
    /// Nothing when no encampment is reachable or the unit already sits on
    /// the cheapest one; a move onto the current cell would be a no-op.
    fn commands<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        _rng: &mut R,
    ) -> Vec<Command> {
        let world = ctx.world;
        let costs = cost_to_all(world, unit.location, |from, to| {
            world.movement_cost(unit, from, to)
        });

        let nearest = ctx
            .encampments
            .occupied_cells()
            .into_iter()
            .filter_map(|cell| costs.get(&cell).map(|cost| (cell, *cost)))
            .min_by_key(|(cell, cost)| (OrderedFloat(*cost), *cell));

        match nearest {
            Some((cell, _)) if cell != unit.location => vec![Command::move_to(unit.id, cell)],
            _ => Vec::new(),
        }
    }
}
