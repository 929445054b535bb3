//! Unit commands and the executor seam
//!
//! The AI only produces commands. Running them belongs to the host game:
//! behaviors -> Vec<Command> -> CommandExecutor::enqueue -> CommandExecutor::run

pub mod executor;

pub use executor::CommandQueue;

use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, UnitId};

/// Instruction for one unit for the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Walk toward `target`, as far as movement allows
    MoveTo { unit: UnitId, target: CellId },
    /// Destroy the improvement on `cell` for loot
    Pillage { unit: UnitId, cell: CellId },
}

impl Command {
    pub fn move_to(unit: UnitId, target: CellId) -> Self {
        Command::MoveTo { unit, target }
    }

    pub fn pillage(unit: UnitId, cell: CellId) -> Self {
        Command::Pillage { unit, cell }
    }

    /// Unit this command belongs to
    pub fn unit(&self) -> UnitId {
        match self {
            Command::MoveTo { unit, .. } | Command::Pillage { unit, .. } => *unit,
        }
    }
}

/// Host-side command runner
pub trait CommandExecutor {
    /// Drop anything still queued for `unit`
    fn clear_queue(&mut self, unit: UnitId);

    /// Append `commands` to `unit`'s queue, preserving order
    fn enqueue(&mut self, unit: UnitId, commands: Vec<Command>);

    /// Run every queued command to completion, then call `on_complete`
    fn run<F: FnOnce()>(&mut self, on_complete: F);
}
