//! Detection rules.
//!
//! Every rule skips ground nodes. Reachability only ever follows resistive
//! edges; capacitive edges contribute to degrees and affected elements but
//! never connect a node to ground.

use indexmap::IndexSet;
use log::debug;
use opencheck_core::{CircuitGraph, NodeName};

use crate::finding::{DefectKind, Finding};

/// Number of node names shown in an isolated component's label.
const LABEL_NODES: usize = 5;

/// Which rule set to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionMode {
    /// Template-scoped graph: floating nodes, isolated components, floating
    /// ports and capacitor-only nodes.
    #[default]
    Standard,
    /// Flattened hierarchy: floating nodes, isolated components, floating
    /// ports and DC-floating nodes.
    Flattened,
}

/// Run every rule of `mode` over `graph`.
///
/// Findings are grouped by rule in rule order; within a rule they follow the
/// graph's node insertion order, so repeated runs return identical lists.
pub fn detect(graph: &CircuitGraph, mode: DetectionMode) -> Vec<Finding> {
    let mut findings = detect_floating_nodes(graph);
    findings.extend(detect_isolated_components(graph));
    findings.extend(detect_floating_ports(graph));
    match mode {
        DetectionMode::Standard => findings.extend(detect_capacitor_only(graph)),
        DetectionMode::Flattened => findings.extend(detect_dc_floating(graph)),
    }

    debug!(
        "{:?} detection over {} nodes: {} findings",
        mode,
        graph.num_nodes(),
        findings.len()
    );
    findings
}

/// Nodes with neither resistive nor capacitive connections.
///
/// Declared ports are left to [`detect_floating_ports`].
pub fn detect_floating_nodes(graph: &CircuitGraph) -> Vec<Finding> {
    let findings: Vec<Finding> = graph
        .all_nodes()
        .iter()
        .filter(|n| !n.is_ground() && !graph.is_port(n.as_str()))
        .filter(|n| graph.node_degree(n.as_str(), true) == 0)
        .map(|n| {
            Finding::new(
                n.as_str(),
                DefectKind::FloatingNode,
                format!("Node '{}' has no connections (r_degree=0, c_degree=0)", n),
                Vec::new(),
            )
        })
        .collect();

    debug!("floating nodes: {}", findings.len());
    findings
}

/// Resistively connected islands with no ground node.
///
/// Islands made only of capacitor-coupled nodes (no node with a resistor)
/// are not reported here; the capacitor-only and DC-floating rules cover
/// them.
pub fn detect_isolated_components(graph: &CircuitGraph) -> Vec<Finding> {
    let findings: Vec<Finding> = graph
        .connected_components()
        .into_iter()
        .filter(|component| !component.iter().any(NodeName::is_ground))
        .filter(|component| {
            component
                .iter()
                .any(|n| graph.resistive_degree(n.as_str()) > 0)
        })
        .map(|component| {
            let affected = graph
                .component_elements(&component)
                .into_iter()
                .map(str::to_string)
                .collect();
            Finding::new(
                component_label(&component),
                DefectKind::IsolatedComponent,
                format!(
                    "Isolated component of {} nodes has no resistive path to ground",
                    component.len()
                ),
                affected,
            )
        })
        .collect();

    debug!("isolated components: {}", findings.len());
    findings
}

/// Declared ports that nothing connects to.
///
/// Only template-scoped graphs declare ports; on a flattened graph this rule
/// finds nothing.
pub fn detect_floating_ports(graph: &CircuitGraph) -> Vec<Finding> {
    let findings: Vec<Finding> = graph
        .port_nodes()
        .iter()
        .filter(|p| !p.is_ground())
        .filter(|p| graph.node_degree(p.as_str(), true) == 0)
        .map(|p| {
            Finding::new(
                p.as_str(),
                DefectKind::FloatingPort,
                format!(
                    "Port '{}' is declared but not connected to any element (r_degree=0, c_degree=0)",
                    p
                ),
                Vec::new(),
            )
        })
        .collect();

    debug!("floating ports: {}", findings.len());
    findings
}

/// Non-port nodes connected only through capacitors.
pub fn detect_capacitor_only(graph: &CircuitGraph) -> Vec<Finding> {
    let findings: Vec<Finding> = graph
        .all_nodes()
        .iter()
        .filter(|n| !n.is_ground() && !graph.is_port(n.as_str()))
        .filter(|n| {
            graph.resistive_degree(n.as_str()) == 0 && graph.capacitive_degree(n.as_str()) > 0
        })
        .map(|n| {
            let c_degree = graph.capacitive_degree(n.as_str());
            Finding::new(
                n.as_str(),
                DefectKind::CapacitorOnly,
                format!(
                    "Node '{}' is connected only through capacitors: {} capacitive connections, r_degree=0",
                    n, c_degree
                ),
                incident_elements(graph, n),
            )
        })
        .collect();

    debug!("capacitor-only nodes: {}", findings.len());
    findings
}

/// Capacitively connected nodes without a resistive path to ground.
///
/// Reachability is computed once for the whole graph; the outcome for each
/// node matches [`CircuitGraph::has_ground_connection`].
pub fn detect_dc_floating(graph: &CircuitGraph) -> Vec<Finding> {
    let grounded = graph.ground_reachable();

    let findings: Vec<Finding> = graph
        .all_nodes()
        .iter()
        .filter(|n| !n.is_ground() && !grounded.contains(*n))
        .filter(|n| graph.capacitive_degree(n.as_str()) > 0)
        .map(|n| {
            let c_degree = graph.capacitive_degree(n.as_str());
            let r_degree = graph.resistive_degree(n.as_str());
            Finding::new(
                n.as_str(),
                DefectKind::DcFloatingNode,
                format!(
                    "Node '{}' has no resistive path to ground: {} capacitive connections, r_degree={}",
                    n, c_degree, r_degree
                ),
                incident_elements(graph, n),
            )
        })
        .collect();

    debug!("DC-floating nodes: {}", findings.len());
    findings
}

fn incident_elements(graph: &CircuitGraph, node: &NodeName) -> Vec<String> {
    graph
        .connected_elements(node.as_str())
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted node names, truncated after the first few.
fn component_label(component: &IndexSet<NodeName>) -> String {
    let mut names: Vec<&str> = component.iter().map(NodeName::as_str).collect();
    names.sort_unstable();

    if names.len() > LABEL_NODES {
        format!(
            "{} (+{} more)",
            names[..LABEL_NODES].join(", "),
            names.len() - LABEL_NODES
        )
    } else {
        names.join(", ")
    }
}
