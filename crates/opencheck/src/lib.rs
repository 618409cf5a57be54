//! # opencheck
//!
//! Connectivity checks for hierarchical SPICE RC netlists.
//!
//! opencheck parses netlists made of resistors, capacitors and coupling
//! capacitors organized into `.SUBCKT` templates, builds a connectivity graph
//! (one template on its own, or the whole hierarchy flattened), and reports:
//!
//! - floating nodes and unused ports
//! - resistively connected islands without ground
//! - nodes reached only through capacitors
//! - DC-floating nodes: capacitively coupled nodes with no resistive path to ground
//!
//! ## Quick Start
//!
//! ```rust
//! use opencheck::prelude::*;
//!
//! let netlist = "\
//! .subckt cell a vss
//! r1 a vss 1k
//! .ends
//! x0 n1 0 cell
//! cc1 victim n1 1f
//! ";
//!
//! let analysis = analyze(netlist, &AnalysisOptions::flattened()).unwrap();
//! assert_eq!(analysis.findings.len(), 1);
//! assert_eq!(analysis.findings[0].kind, DefectKind::DcFloatingNode);
//!
//! let report = Report::new(analysis.findings, None, "0");
//! assert!(report.has_blocking_findings());
//! ```

pub mod analysis;
pub mod error;

pub use analysis::{
    Analysis, AnalysisMode, AnalysisOptions, analyze, analyze_file, analyze_parsed,
};
pub use error::{Error, Result};

// Re-export component crates
pub use opencheck_analyzer as analyzer;
pub use opencheck_core as core;
pub use opencheck_parser as parser;
pub use opencheck_report as report;

pub use opencheck_analyzer::{DefectKind, DetectionMode, Finding, Severity, detect};
pub use opencheck_core::{
    CircuitGraph, Element, ElementKind, HierarchicalNetlist, Instance, NodeName, Subcircuit,
};
pub use opencheck_parser::{ParseResult, ParseWarning, parse, parse_file};
pub use opencheck_report::Report;

/// Commonly used types and functions.
///
/// ```rust
/// use opencheck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Analysis, AnalysisMode, AnalysisOptions, analyze, analyze_file};
    pub use crate::{CircuitGraph, HierarchicalNetlist};
    pub use crate::{DefectKind, DetectionMode, Finding, Severity, detect};
    pub use crate::{ParseResult, parse, parse_file};
    pub use crate::Report;
}
