//! Findings produced by the detection rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a connectivity defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefectKind {
    /// Node with no connections at all.
    FloatingNode,
    /// Resistively connected island with no ground.
    IsolatedComponent,
    /// Declared port that nothing inside the template connects to.
    FloatingPort,
    /// Node reached only through capacitors (template scope).
    CapacitorOnly,
    /// Node with capacitive connections but no resistive path to ground.
    DcFloatingNode,
}

impl DefectKind {
    /// Upper-case token used in reports (e.g. `DC_FLOATING_NODE`).
    pub fn as_str(self) -> &'static str {
        match self {
            DefectKind::FloatingNode => "FLOATING_NODE",
            DefectKind::IsolatedComponent => "ISOLATED_COMPONENT",
            DefectKind::FloatingPort => "FLOATING_PORT",
            DefectKind::CapacitorOnly => "CAPACITOR_ONLY",
            DefectKind::DcFloatingNode => "DC_FLOATING_NODE",
        }
    }

    /// Severity attached to every finding of this kind.
    pub fn severity(self) -> Severity {
        match self {
            DefectKind::FloatingNode | DefectKind::IsolatedComponent => Severity::Critical,
            DefectKind::DcFloatingNode => Severity::Error,
            DefectKind::FloatingPort | DefectKind::CapacitorOnly => Severity::Warning,
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a finding is. Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Does a finding of this severity fail a check run?
    pub fn is_blocking(self) -> bool {
        matches!(self, Severity::Critical | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Node name, or a label listing the nodes of a component.
    pub node: String,
    #[serde(rename = "type")]
    pub kind: DefectKind,
    /// Human-readable explanation.
    pub description: String,
    /// Names of the elements involved, in graph registry order.
    pub affected_elements: Vec<String>,
    pub severity: Severity,
}

impl Finding {
    /// Create a finding with the severity of its kind.
    pub fn new(
        node: impl Into<String>,
        kind: DefectKind,
        description: impl Into<String>,
        affected_elements: Vec<String>,
    ) -> Self {
        Self {
            node: node.into(),
            kind,
            description: description.into(),
            affected_elements,
            severity: kind.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tokens() {
        assert_eq!(DefectKind::DcFloatingNode.as_str(), "DC_FLOATING_NODE");
        assert_eq!(DefectKind::FloatingPort.to_string(), "FLOATING_PORT");
    }

    #[test]
    fn test_kind_severity() {
        assert_eq!(DefectKind::FloatingNode.severity(), Severity::Critical);
        assert_eq!(DefectKind::IsolatedComponent.severity(), Severity::Critical);
        assert_eq!(DefectKind::FloatingPort.severity(), Severity::Warning);
        assert_eq!(DefectKind::CapacitorOnly.severity(), Severity::Warning);
        assert_eq!(DefectKind::DcFloatingNode.severity(), Severity::Error);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Critical < Severity::Error);
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Error.is_blocking());
        assert!(!Severity::Warning.is_blocking());
    }

    #[test]
    fn test_serialized_tokens() {
        let finding = Finding::new(
            "n",
            DefectKind::DcFloatingNode,
            "3 capacitive connections, r_degree=0",
            vec!["cc1".to_string()],
        );
        let json = serde_json::to_value(&finding).unwrap();

        assert_eq!(json["type"], "DC_FLOATING_NODE");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["affected_elements"][0], "cc1");

        for kind in [
            DefectKind::FloatingNode,
            DefectKind::IsolatedComponent,
            DefectKind::FloatingPort,
            DefectKind::CapacitorOnly,
            DefectKind::DcFloatingNode,
        ] {
            let token = serde_json::to_value(kind).unwrap();
            assert_eq!(token, kind.as_str());
        }
    }
}
