//! Barbarian encampments: placement, spawning and clearing

pub mod clearing;
pub mod registry;
pub mod spawning;

pub use clearing::{CampCleared, ClearingResponder, UnitEnteredCell};
pub use registry::{Encampment, EncampmentFactory, EncampmentRegistry};
pub use spawning::{advance_progress, EncampmentPlacer, SpawnCycle, SpawnReport, TurnExecutor};
