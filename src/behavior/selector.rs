//! Assigns each unit to the behavior that wants it most

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::behavior::{Behavior, BehaviorContext, Brain};
use crate::command::Command;
use crate::core::config::BehaviorConfig;
use crate::core::types::Unit;
use crate::world::WorldView;

/// Outcome of selecting a behavior for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// `None` when every behavior scored zero
    pub behavior: Option<Behavior>,
    pub utility: f32,
    pub commands: Vec<Command>,
}

impl Decision {
    pub fn idle() -> Self {
        Self {
            behavior: None,
            utility: 0.0,
            commands: Vec::new(),
        }
    }
}

/// Utility-based arbitration over a fixed behavior list
#[derive(Debug, Clone)]
pub struct UnitSelector {
    behaviors: Vec<Behavior>,
}

impl UnitSelector {
    /// Default behavior set, minus pillage when disabled
    pub fn new(config: &BehaviorConfig) -> Self {
        let behaviors = Behavior::all()
            .into_iter()
            .filter(|b| config.pillage_enabled || *b != Behavior::Pillage)
            .collect();
        Self { behaviors }
    }

    /// Explicit behavior list; earlier entries win ties
    pub fn with_behaviors(behaviors: Vec<Behavior>) -> Self {
        Self { behaviors }
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    /// Highest-utility behavior for `unit`
    ///
    /// Utilities are clamped to [0, 1] with NaN read as zero. A behavior
    /// only replaces the current pick when strictly better, so equal
    /// positive utilities go to the earlier behavior. When every behavior
    /// scores zero the unit is left idle instead of handed to the first
    /// behavior in priority order, as no behavior asked for it.
    pub fn choose<W: WorldView + ?Sized>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
    ) -> Option<(Behavior, f32)> {
        let mut best: Option<(Behavior, f32)> = None;
        let mut best_utility = 0.0;
        for behavior in &self.behaviors {
            let raw = behavior.utility(unit, ctx);
            let utility = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
            if utility > best_utility {
                best_utility = utility;
                best = Some((*behavior, utility));
            }
        }
        best
    }

    /// Choose a behavior and collect its commands
    ///
    /// The winner's commands stand even when empty; the selector never
    /// falls back to the runner-up.
    pub fn decide<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        rng: &mut R,
    ) -> Decision {
        let Some((behavior, utility)) = self.choose(unit, ctx) else {
            trace!(unit = ?unit.id, "no behavior wants unit");
            return Decision::idle();
        };
        let commands = behavior.commands(unit, ctx, rng);
        trace!(
            unit = ?unit.id,
            behavior = behavior.name(),
            utility,
            commands = commands.len(),
            "behavior selected"
        );
        Decision {
            behavior: Some(behavior),
            utility,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::test_support::Scenario;
    use crate::core::types::UnitKind;
    use crate::grid::hex::HexCoord;
    use crate::grid::terrain::Improvement;
    use crate::world::UnitRoster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_set_respects_pillage_toggle() {
        let mut config = BehaviorConfig::default();
        assert_eq!(UnitSelector::new(&config).behaviors(), &Behavior::all());

        config.pillage_enabled = false;
        assert!(!UnitSelector::new(&config)
            .behaviors()
            .contains(&Behavior::Pillage));
    }

    #[test]
    fn test_civilian_becomes_prisoner() {
        let mut s = Scenario::new(6, 6);
        let captive = s.barbarian(UnitKind::Civilian, 2, 2);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let selector = UnitSelector::new(&s.config);

        let (behavior, utility) = selector
            .choose(s.world.unit(captive).unwrap(), &ctx)
            .expect("chosen");
        assert_eq!(behavior, Behavior::BePrisoners);
        assert_eq!(utility, 1.0);
    }

    #[test]
    fn test_rich_target_beats_wandering() {
        let mut s = Scenario::new(8, 8);
        s.world
            .map
            .set_improvement(HexCoord::new(3, 3), Some(Improvement::TradingPost));
        let raider = s.barbarian(UnitKind::Melee, 3, 3);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let selector = UnitSelector::new(&s.config);

        let decision = selector.decide(
            s.world.unit(raider).unwrap(),
            &ctx,
            &mut ChaCha8Rng::seed_from_u64(3),
        );
        assert_eq!(decision.behavior, Some(Behavior::Pillage));
        assert!((decision.utility - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_idle_combat_unit_wanders() {
        let mut s = Scenario::new(8, 8);
        let raider = s.barbarian(UnitKind::Melee, 3, 3);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);

        let (behavior, _) = UnitSelector::new(&s.config)
            .choose(s.world.unit(raider).unwrap(), &ctx)
            .expect("chosen");
        assert_eq!(behavior, Behavior::Wander);
    }

    #[test]
    fn test_all_zero_selects_nothing() {
        let mut s = Scenario::new(6, 6);
        let raider = s.barbarian(UnitKind::Melee, 2, 2);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let selector = UnitSelector::with_behaviors(vec![Behavior::BePrisoners, Behavior::Pillage]);

        let decision = selector.decide(
            s.world.unit(raider).unwrap(),
            &ctx,
            &mut ChaCha8Rng::seed_from_u64(0),
        );
        assert_eq!(decision, Decision::idle());
    }

    #[test]
    fn test_ties_go_to_earlier_behavior() {
        let mut s = Scenario::new(6, 6);
        s.world
            .map
            .set_improvement(HexCoord::new(2, 2), Some(Improvement::TradingPost));
        let raider = s.barbarian(UnitKind::Melee, 2, 2);
        s.config.pillage_coefficient = 1.0;
        s.config.wander_utility = 1.0;
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let unit = s.world.unit(raider).unwrap();

        let pillage_first = UnitSelector::with_behaviors(vec![Behavior::Pillage, Behavior::Wander]);
        let wander_first = UnitSelector::with_behaviors(vec![Behavior::Wander, Behavior::Pillage]);
        assert_eq!(
            pillage_first.choose(unit, &ctx),
            Some((Behavior::Pillage, 1.0))
        );
        assert_eq!(wander_first.choose(unit, &ctx), Some((Behavior::Wander, 1.0)));
    }

    #[test]
    fn test_winner_with_no_commands_is_not_replaced() {
        let mut s = Scenario::new(6, 6);
        // No encampments, so the prisoner has nowhere to go
        let captive = s.barbarian(UnitKind::Civilian, 2, 2);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);

        let decision = UnitSelector::new(&s.config).decide(
            s.world.unit(captive).unwrap(),
            &ctx,
            &mut ChaCha8Rng::seed_from_u64(0),
        );
        assert_eq!(decision.behavior, Some(Behavior::BePrisoners));
        assert!(decision.commands.is_empty());
    }

    #[test]
    fn test_same_seed_same_decision() {
        let mut s = Scenario::new(10, 10);
        let a = s.barbarian(UnitKind::Mounted, 5, 5);
        s.barbarian(UnitKind::Melee, 2, 2);
        let maps = s.maps();
        let ctx = BehaviorContext::new(&s.world, &maps, &s.encampments, &s.config);
        let selector = UnitSelector::new(&s.config);
        let unit = s.world.unit(a).unwrap();

        let first = selector.decide(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(77));
        let second = selector.decide(unit, &ctx, &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(first, second);
    }
}
