//! Error types for the opencheck pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] opencheck_parser::Error),

    #[error(transparent)]
    Netlist(#[from] opencheck_core::Error),

    #[error("subcircuit not found: {0}")]
    SubcircuitNotFound(String),

    #[error("netlist defines no subcircuits")]
    NoSubcircuits,
}

pub type Result<T> = std::result::Result<T, Error>;
