use thiserror::Error;

use crate::core::types::{CellId, EncampmentId};

#[derive(Error, Debug)]
pub enum BarbarianError {
    #[error("No cell given for encampment")]
    MissingCell,

    #[error("No encampment given")]
    MissingEncampment,

    #[error("Cell {0:?} cannot host an encampment")]
    InvalidPlacement(CellId),

    #[error("Encampment not found: {0:?}")]
    UnknownEncampment(EncampmentId),

    #[error("Cell outside the grid: {0:?}")]
    UnknownCell(CellId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BarbarianError>;
