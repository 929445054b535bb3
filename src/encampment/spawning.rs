//! Per-turn encampment work: spawn progress and new camp placement

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::config::{EncampmentConfig, SpawningConfig};
use crate::core::error::Result;
use crate::core::types::{EncampmentId, FactionId, Turn, UnitId};
use crate::encampment::registry::{EncampmentFactory, EncampmentRegistry};
use crate::world::{UnitSpawner, WorldView};

/// Outcome of one turn's encampment work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpawnReport {
    /// Encampments whose counter crossed the threshold
    pub spawn_attempts: usize,
    /// Units the spawner actually created
    pub spawned: Vec<UnitId>,
    /// Encampments created by the placement step
    pub placed: Vec<EncampmentId>,
}

/// Advance one spawn counter
///
/// Returns the new progress and whether a spawn attempt is due. On an
/// attempt exactly `threshold` is consumed; any overflow carries over.
pub fn advance_progress(progress: u32, increment: u32, threshold: u32) -> (u32, bool) {
    let total = progress.saturating_add(increment);
    if total >= threshold {
        (total - threshold, true)
    } else {
        (total, false)
    }
}

/// Counter-driven unit spawning at every live encampment
#[derive(Debug, Clone)]
pub struct SpawnCycle {
    config: SpawningConfig,
}

impl SpawnCycle {
    /// Fails on an inverted progress range or a zero threshold
    pub fn new(config: &SpawningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Add a random increment to every encampment and attempt due spawns
    ///
    /// At most one attempt per encampment per turn. The threshold is
    /// consumed whether or not the spawner succeeds.
    pub fn run<S, R>(
        &self,
        registry: &mut EncampmentRegistry,
        faction: FactionId,
        spawner: &mut S,
        rng: &mut R,
        report: &mut SpawnReport,
    ) where
        S: UnitSpawner + ?Sized,
        R: Rng,
    {
        let ids: Vec<EncampmentId> = registry.iter().map(|e| e.id).collect();
        for id in ids {
            let increment = rng.gen_range(self.config.min_progress..=self.config.max_progress);
            let Some(progress) = registry.progress_mut(id) else {
                continue;
            };
            let (next, due) = advance_progress(*progress, increment, self.config.spawn_threshold);
            *progress = next;
            if !due {
                continue;
            }

            report.spawn_attempts += 1;
            let Some(cell) = registry.location_of(id) else {
                continue;
            };
            match spawner.spawn_unit(cell, faction) {
                Some(unit) => {
                    debug!(?id, ?cell, ?unit, "unit spawned at encampment");
                    report.spawned.push(unit);
                }
                None => debug!(?id, ?cell, "spawn attempt blocked"),
            }
        }
    }
}

/// Periodic placement of new encampments away from civilized units
#[derive(Debug, Clone)]
pub struct EncampmentPlacer {
    config: EncampmentConfig,
}

impl EncampmentPlacer {
    pub fn new(config: &EncampmentConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Is `turn` a placement turn
    pub fn is_placement_turn(&self, turn: Turn) -> bool {
        self.config.placement_interval > 0 && turn % self.config.placement_interval == 0
    }

    /// Try to place one encampment this turn
    ///
    /// Samples random cells and takes the first the registry accepts that
    /// is far enough from every non-barbaric unit.
    pub fn place<W, R>(
        &self,
        turn: Turn,
        registry: &mut EncampmentRegistry,
        world: &W,
        rng: &mut R,
    ) -> Result<Option<EncampmentId>>
    where
        W: WorldView + ?Sized,
        R: Rng,
    {
        if !self.is_placement_turn(turn) || registry.len() >= self.config.max_encampments {
            return Ok(None);
        }

        let civilized: Vec<_> = world
            .unit_ids()
            .into_iter()
            .filter_map(|id| world.unit(id))
            .filter(|u| !world.is_barbaric(u.owner))
            .map(|u| u.location)
            .collect();

        let mut candidates = world.cells();
        candidates.shuffle(rng);
        let chosen = candidates
            .into_iter()
            .take(self.config.placement_attempts as usize)
            .find(|cell| {
                registry.can_accept(world, *cell)
                    && civilized
                        .iter()
                        .all(|c| world.distance(*c, *cell) >= self.config.min_distance_from_units)
            });

        let Some(cell) = chosen else {
            debug!(turn, "no cell found for a new encampment");
            return Ok(None);
        };
        let id = EncampmentFactory::create(registry, world, Some(cell))?;
        info!(turn, ?id, ?cell, "encampment placed");
        Ok(Some(id))
    }
}

/// Runs the encampment side of a barbarian turn
#[derive(Debug, Clone)]
pub struct TurnExecutor {
    placer: EncampmentPlacer,
    cycle: SpawnCycle,
}

impl TurnExecutor {
    pub fn new(spawning: &SpawningConfig, encampments: &EncampmentConfig) -> Result<Self> {
        Ok(Self {
            placer: EncampmentPlacer::new(encampments),
            cycle: SpawnCycle::new(spawning)?,
        })
    }

    /// Place new encampments, then advance counters and spawn units
    pub fn execute<W, R>(
        &self,
        turn: Turn,
        faction: FactionId,
        registry: &mut EncampmentRegistry,
        world: &mut W,
        rng: &mut R,
    ) -> Result<SpawnReport>
    where
        W: WorldView + UnitSpawner + ?Sized,
        R: Rng,
    {
        let mut report = SpawnReport::default();
        if let Some(id) = self.placer.place(turn, registry, &*world, rng)? {
            report.placed.push(id);
        }
        self.cycle.run(registry, faction, world, rng, &mut report);
        Ok(report)
    }
}
