//! Outmatched units retreat toward safer ground

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::behavior::tools::{flee_weight, normalized_logistic};
use crate::behavior::{BehaviorContext, Brain};
use crate::command::Command;
use crate::core::types::{CellId, Unit};
use crate::grid::pathfinding::reachable_within;
use crate::world::WorldView;

#[derive(Debug, Clone, Copy, Default)]
pub struct Flee;

impl Brain for Flee {
    /// Logistic curve over the unit's defensive strength, shifted by the
    /// net hostile presence (enemy minus ally) on its cell
    fn utility<W: WorldView + ?Sized>(&self, unit: &Unit, ctx: &BehaviorContext<W>) -> f32 {
        let strength = ctx.world.defensive_strength(unit, None);
        let hostility = ctx.maps.net_hostility(unit.location);
        normalized_logistic(strength, ctx.config.flee_slope, hostility)
    }

    /// Move to the best refuge reachable with the movement left this turn
    ///
    /// Nothing when no occupiable cell is reachable, or when the unit's own
    /// cell scores best, since a move onto the current cell is a no-op.
    fn commands<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        _rng: &mut R,
    ) -> Vec<Command> {
        let world = ctx.world;
        let reachable = reachable_within(world, unit.location, unit.movement, |from, to| {
            world.movement_cost(unit, from, to)
        });

        let mut cells: Vec<CellId> = reachable
            .into_keys()
            .filter(|cell| world.can_occupy(unit, *cell))
            .collect();
        cells.sort();

        let weight = flee_weight(unit, ctx.maps, world);
        let best = cells
            .into_iter()
            .map(|cell| (cell, weight(cell)))
            // max_by_key keeps the last maximum; reversed so the lowest id wins ties
            .rev()
            .max_by_key(|(_, w)| OrderedFloat(*w));

        match best {
            Some((cell, _)) if cell != unit.location => vec![Command::move_to(unit.id, cell)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::test_support::Scenario;
    use crate::core::types::UnitKind;
    use crate::grid::hex::HexCoord;
    use crate::grid::terrain::{Terrain, TerrainShape};
    use crate::grid::HexGrid;
    use crate::world::{UnitRoster, UnitRules};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_utility_grows_with_enemy_presence() {
        let mut s = Scenario::new(10, 10);
        let raider = s.barbarian(UnitKind::Melee, 1, 1);
        let calm_maps = s.maps();

        for (q, r) in [(2, 1), (1, 2), (0, 2)] {
            let cell = s.world.cell(q, r).unwrap();
            s.world.add_unit_with(UnitKind::Melee, s.player, cell, 60.0, 2.0);
        }
        let hostile_maps = s.maps();

        let unit = s.world.unit(raider).unwrap();
        let calm_ctx = BehaviorContext::new(&s.world, &calm_maps, &s.encampments, &s.config);
        let hostile_ctx =
            BehaviorContext::new(&s.world, &hostile_maps, &s.encampments, &s.config);
        let calm = Flee.utility(unit, &calm_ctx);
        let hostile = Flee.utility(unit, &hostile_ctx);

        assert!(calm < 0.1);
        assert!(hostile > 0.9);
        assert!((0.0..=1.0).contains(&calm) && (0.0..=1.0).contains(&hostile));
    }

    #[test]
    fn test_flees_to_hills_within_budget() {
        let mut s = Scenario::new(10, 10);
        let raider = s.barbarian(UnitKind::Melee, 4, 4);
        s.world.map.set_shape(HexCoord::new(3, 4), TerrainShape::Hills);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(raider).unwrap();

        let commands = Flee.commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(commands.len(), 1);
        let Command::MoveTo { target, .. } = commands[0] else {
            panic!("expected a move");
        };
        assert!(s.world.distance(unit.location, target) <= 2);
        assert!(s.world.can_occupy(unit, target));
        assert_ne!(target, unit.location);
    }

    #[test]
    fn test_boxed_in_unit_stays() {
        let mut s = Scenario::new(8, 8);
        let center = HexCoord::new(3, 3);
        for n in center.neighbors() {
            s.world.map.set_terrain(n, Terrain::Lake);
        }
        let raider = s.barbarian(UnitKind::Melee, 3, 3);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(raider).unwrap();

        assert!(Flee
            .commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(0))
            .is_empty());
    }

    #[test]
    fn test_no_movement_left_no_command() {
        let mut s = Scenario::new(8, 8);
        let raider = s.barbarian(UnitKind::Melee, 3, 3);
        s.world.unit_mut(raider).unwrap().movement = 0.0;
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(raider).unwrap();

        assert!(Flee
            .commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(0))
            .is_empty());
    }
}
