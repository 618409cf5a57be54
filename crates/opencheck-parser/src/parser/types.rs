//! Public types for the netlist parser.

use std::fmt;

use opencheck_core::HierarchicalNetlist;

/// Result of parsing a netlist.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Templates, instances and top-level elements.
    pub netlist: HierarchicalNetlist,
    /// Recoverable anomalies encountered while parsing.
    pub warnings: Vec<ParseWarning>,
}

/// A recoverable parser anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseWarning {
    /// A `.SUBCKT` block reached end of input without `.ENDS`; it was closed
    /// automatically.
    UnterminatedSubcircuit { name: String, line: usize },
    /// A template with the same (case-insensitive) name was already defined;
    /// the new definition replaced it.
    RedefinedSubcircuit { name: String, line: usize },
    /// An `X` line without both a connection and a template name was skipped.
    MalformedInstance { name: String, line: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnterminatedSubcircuit { name, line } => write!(
                f,
                "subcircuit '{}' opened at line {} is not terminated with .ENDS; auto-terminating",
                name, line
            ),
            ParseWarning::RedefinedSubcircuit { name, line } => write!(
                f,
                "subcircuit '{}' redefined at line {}; previous definition replaced",
                name, line
            ),
            ParseWarning::MalformedInstance { name, line } => write!(
                f,
                "instance '{}' at line {} needs connections and a subcircuit name; skipped",
                name, line
            ),
        }
    }
}
