//! SPICE netlist parser for opencheck.
//!
//! This crate reads RC netlists (resistors, capacitors and coupling
//! capacitors) organized into `.SUBCKT` templates and `X` instances, and hands
//! them over as a [`HierarchicalNetlist`](opencheck_core::HierarchicalNetlist).
//!
//! # Example
//!
//! ```
//! use opencheck_parser::parse;
//!
//! let result = parse(r#"
//! * RC cell
//! .subckt cell a vss
//! r1 a b 1k
//! c1 b vss 10f
//! .ends
//! x0 n1 0 cell
//! "#).unwrap();
//!
//! assert_eq!(result.netlist.num_subcircuits(), 1);
//! assert_eq!(result.netlist.instances.len(), 1);
//! assert!(result.warnings.is_empty());
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{Error, Result};
pub use parser::{ParseResult, ParseWarning, parse, parse_file};
