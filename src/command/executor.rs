//! In-memory command executor

use std::collections::BTreeMap;

use crate::command::{Command, CommandExecutor};
use crate::core::types::UnitId;

/// Queues commands per unit and records them when run
///
/// Units are drained in id order so runs are reproducible.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queues: BTreeMap<UnitId, Vec<Command>>,
    executed: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands waiting for `unit`
    pub fn queued(&self, unit: UnitId) -> &[Command] {
        self.queues.get(&unit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pending_count(&self) -> usize {
        self.queues.values().map(Vec::len).sum()
    }

    /// Commands run so far, in execution order
    pub fn executed(&self) -> &[Command] {
        &self.executed
    }

    /// Take the executed log, leaving it empty
    pub fn take_executed(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.executed)
    }
}

impl CommandExecutor for CommandQueue {
    fn clear_queue(&mut self, unit: UnitId) {
        self.queues.remove(&unit);
    }

    fn enqueue(&mut self, unit: UnitId, commands: Vec<Command>) {
        if commands.is_empty() {
            return;
        }
        self.queues.entry(unit).or_default().extend(commands);
    }

    fn run<F: FnOnce()>(&mut self, on_complete: F) {
        let queues = std::mem::take(&mut self.queues);
        for (_, commands) in queues {
            self.executed.extend(commands);
        }
        on_complete();
    }
}
