//! Error types for opencheck-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("unknown element at line {line}: {name}")]
    UnknownElement { line: usize, name: String },

    #[error("invalid value at line {line}: {value}")]
    InvalidValue { line: usize, value: String },

    #[error(".ENDS without matching .SUBCKT at line {line}")]
    UnmatchedEnds { line: usize },

    #[error("nested .SUBCKT {name} at line {line} (definitions cannot be nested)")]
    NestedSubcircuit { line: usize, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
