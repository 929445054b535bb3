//! Faction-level turn orchestration

pub mod coordinator;

pub use coordinator::{FactionCoordinator, TurnReport};
