//! Error types for opencheck-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("instance {instance} references unknown subcircuit {template}")]
    UnknownSubcircuit { instance: String, template: String },

    #[error(
        "instance {instance} of subcircuit {template} has {actual} connections but the subcircuit declares {expected} ports"
    )]
    PortCountMismatch {
        instance: String,
        template: String,
        expected: usize,
        actual: usize,
    },

    #[error("instance {instance} is defined more than once")]
    DuplicateInstance { instance: String },

    #[error("name {name} contains the reserved hierarchy separator ';'")]
    ReservedSeparator { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
