//! Idle combat units roam toward quiet, distant cells

use rand::Rng;

use crate::behavior::tools::{sample_weighted, wander_weight};
use crate::behavior::{BehaviorContext, Brain};
use crate::command::Command;
use crate::core::types::{CellId, Unit};
use crate::world::WorldView;

#[derive(Debug, Clone, Copy, Default)]
pub struct Wander;

impl Brain for Wander {
    fn utility<W: WorldView + ?Sized>(&self, unit: &Unit, ctx: &BehaviorContext<W>) -> f32 {
        if unit.is_civilian() {
            0.0
        } else {
            ctx.config.wander_utility
        }
    }

    /// Weighted random pick among cells within the unit's full movement
    fn commands<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        rng: &mut R,
    ) -> Vec<Command> {
        let radius = unit.max_movement.max(0.0) as u32;
        let weight = wander_weight(unit, ctx.maps, ctx.world, ctx.config);
        let candidates: Vec<(CellId, u32)> = ctx
            .world
            .cells_in_radius(unit.location, radius)
            .into_iter()
            .map(|cell| (cell, weight(cell)))
            .collect();

        match sample_weighted(&candidates, rng) {
            Some(cell) => vec![Command::move_to(unit.id, cell)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::test_support::Scenario;
    use crate::core::types::UnitKind;
    use crate::grid::HexGrid;
    use crate::world::UnitRoster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_utility_constant_for_combat_units() {
        let mut s = Scenario::new(6, 6);
        let warrior = s.barbarian(UnitKind::Melee, 0, 0);
        let captive = s.barbarian(UnitKind::Civilian, 1, 0);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);

        assert_eq!(
            Wander.utility(s.world.unit(warrior).unwrap(), &ctx),
            s.config.wander_utility
        );
        assert_eq!(Wander.utility(s.world.unit(captive).unwrap(), &ctx), 0.0);
    }

    #[test]
    fn test_wanders_within_radius() {
        let mut s = Scenario::new(12, 12);
        let warrior = s.barbarian(UnitKind::Melee, 6, 6);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(warrior).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        for _ in 0..20 {
            let commands = Wander.commands(unit, &ctx, &mut rng);
            assert_eq!(commands.len(), 1);
            let Command::MoveTo { target, .. } = commands[0] else {
                panic!("expected a move");
            };
            assert_ne!(target, unit.location);
            assert!(s.world.distance(unit.location, target) <= 2);
        }
    }

    #[test]
    fn test_all_zero_weights_give_no_command() {
        let mut s = Scenario::new(6, 6);
        let warrior = s.barbarian(UnitKind::Melee, 2, 2);
        // Crowding penalty swamps any distance reward
        s.config.wander_distance_weight = 0.0;
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(warrior).unwrap();

        assert!(Wander
            .commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(1))
            .is_empty());
    }

    #[test]
    fn test_immobile_unit_has_no_candidates() {
        let mut s = Scenario::new(6, 6);
        let cell = s.world.cell(2, 2).unwrap();
        let id = s
            .world
            .add_unit_with(UnitKind::Melee, s.barbs, cell, 5.0, 0.0);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);

        assert!(Wander
            .commands(s.world.unit(id).unwrap(), &ctx, &mut ChaCha8Rng::seed_from_u64(1))
            .is_empty());
    }

    #[test]
    fn test_huge_distance_weight_still_samples() {
        let mut s = Scenario::new(12, 12);
        let rider = s.barbarian(UnitKind::Mounted, 6, 6);
        s.config.wander_distance_weight = 1.0e9;
        s.config.wander_ally_weight = 0.0;
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(rider).unwrap();

        let commands = Wander.commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(6));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_off_grid_unit_has_no_candidates() {
        let mut s = Scenario::new(6, 6);
        let id = s.barbarian(UnitKind::Melee, 2, 2);
        let maps = s.maps();
        s.world.unit_mut(id).unwrap().location = CellId(9_999);
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(id).unwrap();

        assert!(s.world.cells_in_radius(unit.location, 2).is_empty());
        assert!(Wander
            .commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(1))
            .is_empty());
    }

    #[test]
    fn test_same_seed_same_choice() {
        let mut s = Scenario::new(12, 12);
        let warrior = s.barbarian(UnitKind::Mounted, 6, 6);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(warrior).unwrap();

        let a = Wander.commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(21));
        let b = Wander.commands(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(21));
        assert_eq!(a, b);
    }
}
