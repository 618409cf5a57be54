//! The parse, build, detect pipeline.

use std::path::Path;

use log::debug;
use opencheck_analyzer::{DetectionMode, Finding, detect};
use opencheck_core::{CircuitGraph, HierarchicalNetlist};
use opencheck_parser::{ParseResult, ParseWarning};

use crate::error::{Error, Result};

/// How the netlist is turned into a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    /// Flatten the whole hierarchy and look for DC-floating nodes.
    #[default]
    Flattened,
    /// Analyze one subcircuit template on its own.
    SubcircuitOnly,
}

impl AnalysisMode {
    /// Rule set matching this way of building the graph.
    pub fn detection_mode(self) -> DetectionMode {
        match self {
            AnalysisMode::Flattened => DetectionMode::Flattened,
            AnalysisMode::SubcircuitOnly => DetectionMode::Standard,
        }
    }
}

/// Analysis configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub mode: AnalysisMode,
    /// Template to analyze in subcircuit-only mode. The first defined
    /// template is used when unset.
    pub subcircuit: Option<String>,
}

impl AnalysisOptions {
    /// Flatten the hierarchy.
    pub fn flattened() -> Self {
        Self::default()
    }

    /// Analyze a single template.
    pub fn subcircuit_only(name: Option<String>) -> Self {
        Self {
            mode: AnalysisMode::SubcircuitOnly,
            subcircuit: name,
        }
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub netlist: HierarchicalNetlist,
    pub warnings: Vec<ParseWarning>,
    pub graph: CircuitGraph,
    pub findings: Vec<Finding>,
    /// Template analyzed in subcircuit-only mode.
    pub subcircuit: Option<String>,
}

impl Analysis {
    /// Is there at least one critical or error finding?
    pub fn has_blocking_findings(&self) -> bool {
        self.findings.iter().any(|f| f.severity.is_blocking())
    }
}

/// Parse and analyze a netlist string.
pub fn analyze(source: &str, options: &AnalysisOptions) -> Result<Analysis> {
    let parsed = opencheck_parser::parse(source)?;
    analyze_parsed(parsed, options)
}

/// Read, parse and analyze a netlist file.
pub fn analyze_file(path: impl AsRef<Path>, options: &AnalysisOptions) -> Result<Analysis> {
    let parsed = opencheck_parser::parse_file(path)?;
    analyze_parsed(parsed, options)
}

/// Analyze an already parsed netlist.
pub fn analyze_parsed(parsed: ParseResult, options: &AnalysisOptions) -> Result<Analysis> {
    let ParseResult { netlist, warnings } = parsed;

    let (graph, subcircuit) = match options.mode {
        AnalysisMode::Flattened => (CircuitGraph::from_netlist(&netlist)?, None),
        AnalysisMode::SubcircuitOnly => {
            let subckt = match options.subcircuit.as_deref() {
                Some(name) => netlist
                    .subcircuit(name)
                    .ok_or_else(|| Error::SubcircuitNotFound(name.to_string()))?,
                None => netlist.first_subcircuit().ok_or(Error::NoSubcircuits)?,
            };
            (CircuitGraph::from_subcircuit(subckt), Some(subckt.name.clone()))
        }
    };

    let findings = detect(&graph, options.mode.detection_mode());
    debug!(
        "{:?} analysis: {} nodes, {} elements, {} findings",
        options.mode,
        graph.num_nodes(),
        graph.num_elements(),
        findings.len()
    );

    Ok(Analysis {
        netlist,
        warnings,
        graph,
        findings,
        subcircuit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencheck_analyzer::DefectKind;

    const DIVIDER: &str = "\
.subckt div in out vss
r1 in out 1k
r2 out vss 1k
.ends
.subckt spare a b
c1 a b 1f
.ends
x0 top mid 0 div
cc1 float mid 1f
";

    #[test]
    fn test_mode_mapping() {
        assert_eq!(
            AnalysisMode::Flattened.detection_mode(),
            DetectionMode::Flattened
        );
        assert_eq!(
            AnalysisMode::SubcircuitOnly.detection_mode(),
            DetectionMode::Standard
        );
        assert_eq!(AnalysisOptions::default().mode, AnalysisMode::Flattened);
    }

    #[test]
    fn test_flattened_analysis() {
        let analysis = analyze(DIVIDER, &AnalysisOptions::flattened()).unwrap();

        assert!(analysis.subcircuit.is_none());
        assert_eq!(analysis.findings.len(), 1);
        assert_eq!(analysis.findings[0].node, "float");
        assert_eq!(analysis.findings[0].kind, DefectKind::DcFloatingNode);
        assert!(analysis.has_blocking_findings());
    }

    #[test]
    fn test_first_subcircuit_by_default() {
        let analysis = analyze(DIVIDER, &AnalysisOptions::subcircuit_only(None)).unwrap();

        assert_eq!(analysis.subcircuit.as_deref(), Some("div"));
        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.graph.port_nodes().len(), 3);
    }

    #[test]
    fn test_named_subcircuit() {
        let options = AnalysisOptions::subcircuit_only(Some("SPARE".to_string()));
        let analysis = analyze(DIVIDER, &options).unwrap();

        assert_eq!(analysis.subcircuit.as_deref(), Some("spare"));
        // Both ports carry only a capacitor: no port is floating, nothing is
        // capacitor-only because ports are exempt
        assert!(analysis.findings.is_empty());
        assert!(!analysis.has_blocking_findings());
    }

    #[test]
    fn test_missing_subcircuit() {
        let options = AnalysisOptions::subcircuit_only(Some("nope".to_string()));
        assert!(matches!(
            analyze(DIVIDER, &options),
            Err(Error::SubcircuitNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            analyze("r1 a 0 1\n", &AnalysisOptions::subcircuit_only(None)),
            Err(Error::NoSubcircuits)
        ));
    }

    #[test]
    fn test_structural_error_aborts() {
        let source = ".subckt div in out\nr1 in out 1\n.ends\nx0 a div\n";
        let err = analyze(source, &AnalysisOptions::flattened()).unwrap_err();

        assert!(matches!(
            err,
            Error::Netlist(opencheck_core::Error::PortCountMismatch { .. })
        ));
        let message = err.to_string();
        assert!(message.contains("x0"));
        assert!(message.contains("div"));
    }

    #[test]
    fn test_duplicate_instance_aborts() {
        let source = ".subckt cell in\nr1 in mid 1\nr2 mid 0 1\n.ends\nx0 a cell\nX0 b cell\n";
        assert!(matches!(
            analyze(source, &AnalysisOptions::flattened()),
            Err(Error::Netlist(opencheck_core::Error::DuplicateInstance { .. }))
        ));
    }

    #[test]
    fn test_slash_net_is_not_instance_internal() {
        let source = "\
.subckt cell in
r1 in mid 1k
r2 mid 0 1k
.ends
x0 a cell
cc1 victim X0/mid 1f
";
        let analysis = analyze(source, &AnalysisOptions::flattened()).unwrap();
        let nodes: Vec<&str> = analysis.findings.iter().map(|f| f.node.as_str()).collect();

        assert_eq!(nodes, vec!["victim", "x0/mid"]);
        assert!(
            analysis
                .findings
                .iter()
                .all(|f| f.kind == DefectKind::DcFloatingNode)
        );
    }

    #[test]
    fn test_parse_error_propagates() {
        let source = ".subckt bad a\nq1 a 0 1\n.ends\n";
        assert!(matches!(
            analyze(source, &AnalysisOptions::flattened()),
            Err(Error::Parse(opencheck_parser::Error::UnknownElement { .. }))
        ));
    }

    #[test]
    fn test_empty_netlist() {
        let analysis = analyze("* nothing here\n", &AnalysisOptions::flattened()).unwrap();
        assert!(analysis.netlist.is_empty());
        assert!(analysis.findings.is_empty());
    }
}
