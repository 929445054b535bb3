//! Barbarian faction coordinator - runs one AI turn end to end
//!
//! Order within a turn:
//! refresh_analysis -> encampment placement and spawning -> unit selection
//! -> command hand-off -> on_complete

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::behavior::{Behavior, BehaviorContext, UnitSelector};
use crate::command::CommandExecutor;
use crate::core::config::BarbarianConfig;
use crate::core::error::Result;
use crate::core::types::{FactionId, Turn};
use crate::encampment::{EncampmentRegistry, SpawnReport, TurnExecutor};
use crate::influence::{FieldSet, InfluenceMapGenerator};
use crate::world::{UnitSpawner, WorldView};

/// Summary of one executed turn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnReport {
    pub turn: Turn,
    /// Encampment placement and spawning, empty without a barbaric faction
    pub spawn: SpawnReport,
    /// Units that went through the selector
    pub units_considered: usize,
    /// Units no behavior wanted
    pub idle_units: usize,
    /// Queued commands per winning behavior
    pub commands_by_behavior: BTreeMap<Behavior, usize>,
}

impl TurnReport {
    pub fn total_commands(&self) -> usize {
        self.commands_by_behavior.values().sum()
    }
}

/// Drives every barbaric faction for one turn at a time
#[derive(Debug)]
pub struct FactionCoordinator {
    config: BarbarianConfig,
    generator: InfluenceMapGenerator,
    fields: FieldSet,
    selector: UnitSelector,
    turn_executor: TurnExecutor,
    turn: Turn,
}

impl FactionCoordinator {
    /// Build a coordinator, refusing a config that fails `validate`
    pub fn new(config: BarbarianConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: InfluenceMapGenerator::new(&config.influence),
            fields: FieldSet::empty(),
            selector: UnitSelector::new(&config.behavior),
            turn_executor: TurnExecutor::new(&config.spawning, &config.encampments)?,
            turn: 0,
            config,
        })
    }

    pub fn config(&self) -> &BarbarianConfig {
        &self.config
    }

    /// Turn number the next `execute_turn` will run
    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Rebuild the influence fields from the current world
    pub fn refresh_analysis<W: WorldView + ?Sized>(&mut self, world: &W) {
        self.fields = self.generator.generate_maps(world);
    }

    /// Invalidate the influence fields
    pub fn clear(&mut self) {
        self.generator.clear_maps(&mut self.fields);
    }

    /// Run one barbarian turn
    ///
    /// Spawning is done for the first barbaric faction. Every unit of every
    /// barbaric faction then has its queue cleared and refilled from the
    /// selector before `executor` runs with `on_complete`. Without a
    /// barbaric faction, or when barbaric factions own no units, the
    /// fields are cleared and only the executor runs.
    pub fn execute_turn<W, E, R, F>(
        &mut self,
        world: &mut W,
        registry: &mut EncampmentRegistry,
        executor: &mut E,
        rng: &mut R,
        on_complete: F,
    ) -> Result<TurnReport>
    where
        W: WorldView + UnitSpawner + ?Sized,
        E: CommandExecutor,
        R: Rng,
        F: FnOnce(),
    {
        let turn = self.turn;
        self.turn += 1;
        let mut report = TurnReport {
            turn,
            ..TurnReport::default()
        };

        let barbaric: Vec<FactionId> = world
            .faction_ids()
            .into_iter()
            .filter(|f| world.is_barbaric(*f))
            .collect();
        let Some(&spawning_faction) = barbaric.first() else {
            debug!(turn, "no barbaric faction, nothing to do");
            self.clear();
            executor.run(on_complete);
            return Ok(report);
        };

        report.spawn = self
            .turn_executor
            .execute(turn, spawning_faction, registry, world, rng)?;

        if barbaric.iter().all(|f| world.units_of(*f).is_empty()) {
            debug!(turn, "barbaric factions own no units");
            self.clear();
            executor.run(on_complete);
            return Ok(report);
        }

        if !self.fields.is_ready() {
            warn!(turn, "influence fields missing at turn start, regenerating");
            self.refresh_analysis(&*world);
        }
        let Some(maps) = self.fields.maps() else {
            executor.run(on_complete);
            return Ok(report);
        };

        let world: &W = world;
        let ctx = BehaviorContext::new(world, maps, registry, &self.config.behavior);
        for faction in &barbaric {
            for id in world.units_of(*faction) {
                let Some(unit) = world.unit(id) else {
                    continue;
                };
                let decision = self.selector.decide(unit, &ctx, rng);
                report.units_considered += 1;
                match decision.behavior {
                    Some(behavior) => {
                        *report.commands_by_behavior.entry(behavior).or_insert(0) +=
                            decision.commands.len();
                    }
                    None => report.idle_units += 1,
                }
                executor.clear_queue(id);
                executor.enqueue(id, decision.commands);
            }
        }

        info!(
            turn,
            units = report.units_considered,
            commands = report.total_commands(),
            spawned = report.spawn.spawned.len(),
            placed = report.spawn.placed.len(),
            "barbarian turn executed"
        );
        executor.run(on_complete);
        Ok(report)
    }
}
