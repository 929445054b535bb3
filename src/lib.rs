//! Barbarian AI - turn-based decision core for hostile factions on a hex grid
//!
//! Each turn the faction coordinator refreshes influence maps, advances
//! encampment spawning, picks a behavior for every barbarian unit and hands
//! the resulting commands to the host's executor.

pub mod behavior;
pub mod command;
pub mod core;
pub mod encampment;
pub mod faction;
pub mod grid;
pub mod influence;
pub mod world;
