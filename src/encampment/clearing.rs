//! Encampment clearing: a civilized unit walks into a camp

use serde::Serialize;
use tracing::info;

use crate::core::config::BountyConfig;
use crate::core::error::Result;
use crate::core::types::{CellId, EncampmentId, FactionId, UnitId};
use crate::encampment::registry::{EncampmentFactory, EncampmentRegistry};
use crate::world::{FactionModifiers, Treasury, UnitRoster};

/// Notification that a unit has entered a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitEnteredCell {
    pub unit: UnitId,
    pub cell: CellId,
}

/// A camp destroyed by a civilized unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CampCleared {
    pub encampment: EncampmentId,
    pub cell: CellId,
    pub faction: FactionId,
    pub bounty: f32,
}

/// Destroys encampments entered by non-barbaric units and pays the bounty
#[derive(Debug, Clone)]
pub struct ClearingResponder {
    base_bounty: f32,
}

impl ClearingResponder {
    pub fn new(config: &BountyConfig) -> Self {
        Self {
            base_bounty: config.base_bounty,
        }
    }

    /// Handle one "unit entered cell" notification
    ///
    /// Barbaric units, unknown units and camp-free cells are ignored.
    pub fn on_unit_entered<W>(
        &self,
        event: UnitEnteredCell,
        registry: &mut EncampmentRegistry,
        world: &mut W,
    ) -> Result<Option<CampCleared>>
    where
        W: UnitRoster + Treasury + FactionModifiers + ?Sized,
    {
        let Some(faction) = world.unit(event.unit).map(|u| u.owner) else {
            return Ok(None);
        };
        if world.is_barbaric(faction) {
            return Ok(None);
        }
        let Some(encampment) = registry.encampment_at(event.cell) else {
            return Ok(None);
        };

        EncampmentFactory::destroy(registry, Some(encampment))?;
        let bounty = self.base_bounty * world.bounty_multiplier(faction);
        world.credit_gold(faction, bounty);
        info!(?encampment, ?faction, bounty, "encampment cleared");

        Ok(Some(CampCleared {
            encampment,
            cell: event.cell,
            faction,
            bounty,
        }))
    }

    /// Adapt the responder into a subscriber callback for an event bus
    pub fn subscriber<'a, W>(
        &'a self,
        registry: &'a mut EncampmentRegistry,
        world: &'a mut W,
    ) -> impl FnMut(UnitEnteredCell) -> Result<Option<CampCleared>> + 'a
    where
        W: UnitRoster + Treasury + FactionModifiers + ?Sized,
    {
        move |event| self.on_unit_entered(event, &mut *registry, &mut *world)
    }
}
