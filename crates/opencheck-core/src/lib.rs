//! Core connectivity model for opencheck.
//!
//! This crate provides the element model for RC netlists, case-insensitive
//! node identity, the hierarchical netlist handed over by the parser, and the
//! [`CircuitGraph`] that flattens a hierarchy into resistive and capacitive
//! adjacency relations.

pub mod element;
pub mod error;
pub mod graph;
pub mod netlist;
pub mod node;
pub mod units;

pub use element::{Element, ElementKind, Subcircuit, SubcircuitBuilder};
pub use error::{Error, Result};
pub use graph::CircuitGraph;
pub use netlist::{HierarchicalNetlist, Instance};
pub use node::{GROUND_NAMES, NodeName, SCOPE_SEPARATOR, compose};
