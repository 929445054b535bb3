//! Unit behaviors ("brains") and the selector that picks one per unit
//!
//! Architecture: a closed set of behaviors sharing one capability
//! - `Brain` scores how much a behavior wants a unit and produces commands
//! - `Behavior` tags every known brain; new brains add a variant
//! - `UnitSelector` gives each unit to the highest-utility behavior

pub mod flee;
pub mod pillage;
pub mod prisoners;
pub mod selector;
pub mod tools;
pub mod wander;

pub use flee::Flee;
pub use pillage::Pillage;
pub use prisoners::BePrisoners;
pub use selector::{Decision, UnitSelector};
pub use wander::Wander;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::core::config::BehaviorConfig;
use crate::core::types::Unit;
use crate::encampment::EncampmentRegistry;
use crate::influence::InfluenceMaps;
use crate::world::WorldView;

/// Read-only view handed to behaviors for one turn
pub struct BehaviorContext<'a, W: ?Sized> {
    pub world: &'a W,
    pub maps: &'a InfluenceMaps,
    pub encampments: &'a EncampmentRegistry,
    pub config: &'a BehaviorConfig,
}

impl<'a, W: ?Sized> BehaviorContext<'a, W> {
    pub fn new(
        world: &'a W,
        maps: &'a InfluenceMaps,
        encampments: &'a EncampmentRegistry,
        config: &'a BehaviorConfig,
    ) -> Self {
        Self {
            world,
            maps,
            encampments,
            config,
        }
    }
}

/// A strategy for one unit
pub trait Brain {
    /// How strongly this behavior wants the unit this turn, in [0, 1]
    fn utility<W: WorldView + ?Sized>(&self, unit: &Unit, ctx: &BehaviorContext<W>) -> f32;

    /// Commands for the unit; empty when there is nothing useful to do
    fn commands<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        rng: &mut R,
    ) -> Vec<Command>;
}

/// Every behavior the selector can choose from
///
/// Declaration order is the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Behavior {
    BePrisoners,
    Flee,
    Pillage,
    Wander,
}

impl Behavior {
    pub fn all() -> [Behavior; 4] {
        [
            Behavior::BePrisoners,
            Behavior::Flee,
            Behavior::Pillage,
            Behavior::Wander,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Behavior::BePrisoners => "be_prisoners",
            Behavior::Flee => "flee",
            Behavior::Pillage => "pillage",
            Behavior::Wander => "wander",
        }
    }
}

impl Brain for Behavior {
    fn utility<W: WorldView + ?Sized>(&self, unit: &Unit, ctx: &BehaviorContext<W>) -> f32 {
        match self {
            Behavior::BePrisoners => BePrisoners.utility(unit, ctx),
            Behavior::Flee => Flee.utility(unit, ctx),
            Behavior::Pillage => Pillage.utility(unit, ctx),
            Behavior::Wander => Wander.utility(unit, ctx),
        }
    }

    fn commands<W: WorldView + ?Sized, R: Rng>(
        &self,
        unit: &Unit,
        ctx: &BehaviorContext<W>,
        rng: &mut R,
    ) -> Vec<Command> {
        match self {
            Behavior::BePrisoners => BePrisoners.commands(unit, ctx, rng),
            Behavior::Flee => Flee.commands(unit, ctx, rng),
            Behavior::Pillage => Pillage.commands(unit, ctx, rng),
            Behavior::Wander => Wander.commands(unit, ctx, rng),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::config::InfluenceConfig;
    use crate::core::types::{FactionId, UnitKind};
    use crate::grid::map::HexMap;
    use crate::influence::InfluenceMapGenerator;
    use crate::world::SimWorld;

    /// Small world with one civilized and one barbarian faction
    pub struct Scenario {
        pub world: SimWorld,
        pub player: FactionId,
        pub barbs: FactionId,
        pub encampments: EncampmentRegistry,
        pub config: BehaviorConfig,
    }

    impl Scenario {
        pub fn new(width: u32, height: u32) -> Self {
            let mut world = SimWorld::new(HexMap::new(width, height));
            let player = world.add_faction("Rome", false);
            let barbs = world.add_faction("Barbarians", true);
            Self {
                world,
                player,
                barbs,
                encampments: EncampmentRegistry::new(),
                config: BehaviorConfig::default(),
            }
        }

        pub fn barbarian(&mut self, kind: UnitKind, q: i32, r: i32) -> crate::core::types::UnitId {
            let cell = self.world.cell(q, r).expect("on map");
            self.world.add_unit(kind, self.barbs, cell)
        }

        pub fn maps(&self) -> InfluenceMaps {
            InfluenceMapGenerator::new(&InfluenceConfig::default())
                .generate_maps(&self.world)
                .maps()
                .cloned()
                .expect("generated")
        }
    }
}
