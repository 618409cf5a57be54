//! Connectivity graph for open-circuit analysis.
//!
//! Resistors form DC paths between nodes and are recorded in the resistive
//! adjacency relation. Capacitors and coupling capacitors block DC and are
//! recorded separately in the capacitive relation. Reachability questions
//! (components, paths to ground) only ever follow resistive edges.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::element::{Element, Subcircuit};
use crate::error::{Error, Result};
use crate::netlist::{HierarchicalNetlist, Instance};
use crate::node::{GROUND_NAMES, NodeName, SCOPE_SEPARATOR, compose};

type Adjacency = IndexMap<NodeName, IndexSet<NodeName>>;

/// Flat connectivity graph built from one template or a whole hierarchy.
///
/// Every relation preserves insertion order, so analyses over the same input
/// always visit nodes and elements in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitGraph {
    /// Resistor connections, recorded in both directions.
    resistive_adj: Adjacency,
    /// Capacitor and coupling-capacitor connections, recorded in both directions.
    capacitive_adj: Adjacency,
    /// Every node identity seen from any source.
    all_nodes: IndexSet<NodeName>,
    /// Declared ports (single-template mode only).
    port_nodes: IndexSet<NodeName>,
    /// Nodes referenced by top-level elements (flattened mode only).
    top_level_nodes: IndexSet<NodeName>,
    /// Element registry with normalized endpoint names.
    elements: IndexMap<String, Element>,
}

impl CircuitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph scoped to a single template.
    ///
    /// Ports are registered as nodes and as `port_nodes`; every element is
    /// added with its literal (normalized) node names.
    pub fn from_subcircuit(subckt: &Subcircuit) -> Self {
        let mut graph = Self::new();
        for port in &subckt.ports {
            graph.add_port(port);
        }
        for element in &subckt.elements {
            graph.add_element(element.clone());
        }

        log::debug!(
            "built graph for subcircuit {}: {} nodes, {} ports, {} elements",
            subckt.name,
            graph.num_nodes(),
            graph.port_nodes.len(),
            graph.num_elements()
        );
        graph
    }

    /// Build a flattened graph spanning the whole hierarchy.
    ///
    /// Every instance is expanded in place: port nodes resolve to the
    /// instance's connection names, internal nodes and element names are
    /// scoped with [`compose`], and ground aliases stay global. Top-level
    /// elements are added with their literal node names.
    ///
    /// All instances are resolved before anything is added, so an unknown
    /// template, a port-count mismatch, a repeated instance name or a
    /// top-level name containing [`SCOPE_SEPARATOR`] aborts without a partial
    /// graph.
    pub fn from_netlist(netlist: &HierarchicalNetlist) -> Result<Self> {
        let mut instance_names: IndexSet<NodeName> = IndexSet::new();
        let mut resolved = Vec::with_capacity(netlist.instances.len());
        for instance in &netlist.instances {
            if !instance_names.insert(NodeName::new(&instance.name)) {
                return Err(Error::DuplicateInstance {
                    instance: instance.name.clone(),
                });
            }
            for conn in &instance.connections {
                check_top_level_name(conn)?;
            }
            resolved.push((instance, netlist.resolve(instance)?));
        }
        for element in &netlist.top_level_elements {
            check_top_level_name(&element.name)?;
            check_top_level_name(&element.node1)?;
            check_top_level_name(&element.node2)?;
        }

        let mut graph = Self::new();
        for (instance, subckt) in resolved {
            graph.expand_instance(instance, subckt);
        }

        for element in &netlist.top_level_elements {
            graph.top_level_nodes.insert(NodeName::new(&element.node1));
            graph.top_level_nodes.insert(NodeName::new(&element.node2));
            graph.add_element(element.clone());
        }

        log::debug!(
            "flattened {} instance(s) and {} top-level element(s): {} nodes, {} elements",
            netlist.instances.len(),
            netlist.top_level_elements.len(),
            graph.num_nodes(),
            graph.num_elements()
        );
        Ok(graph)
    }

    /// Re-emit a template's elements under an instance's naming scope.
    fn expand_instance(&mut self, instance: &Instance, subckt: &Subcircuit) {
        let port_map: IndexMap<NodeName, NodeName> = subckt
            .ports
            .iter()
            .zip(&instance.connections)
            .map(|(port, conn)| (NodeName::new(port), NodeName::new(conn)))
            .collect();

        let flatten = |node: &str| -> NodeName {
            let local = NodeName::new(node);
            if local.is_ground() {
                local
            } else if let Some(conn) = port_map.get(&local) {
                conn.clone()
            } else {
                compose(&instance.name, node)
            }
        };

        for element in &subckt.elements {
            self.add_element(Element::new(
                element.kind,
                compose(&instance.name, &element.name).to_string(),
                flatten(&element.node1).to_string(),
                flatten(&element.node2).to_string(),
                element.value,
            ));
        }
    }

    /// Register a node without any connections.
    pub fn add_node(&mut self, name: &str) -> NodeName {
        let node = NodeName::new(name);
        self.all_nodes.insert(node.clone());
        node
    }

    /// Register a declared port.
    pub fn add_port(&mut self, name: &str) -> NodeName {
        let node = self.add_node(name);
        self.port_nodes.insert(node.clone());
        node
    }

    /// Add an element, normalizing its endpoints.
    ///
    /// A later element with the same name replaces the earlier registry entry;
    /// edges already recorded are kept.
    pub fn add_element(&mut self, mut element: Element) {
        let node1 = self.add_node(&element.node1);
        let node2 = self.add_node(&element.node2);

        if element.kind.is_resistive() {
            add_edge(&mut self.resistive_adj, &node1, &node2);
        } else if element.kind.is_capacitive() {
            add_edge(&mut self.capacitive_adj, &node1, &node2);
        }

        element.node1 = node1.to_string();
        element.node2 = node2.to_string();
        self.elements.insert(element.name.clone(), element);
    }

    /// The reserved ground aliases.
    pub fn ground_nodes(&self) -> &'static [&'static str] {
        &GROUND_NAMES
    }

    pub fn is_ground(&self, node: &str) -> bool {
        NodeName::new(node).is_ground()
    }

    pub fn is_port(&self, node: &str) -> bool {
        self.port_nodes.contains(NodeName::new(node).as_str())
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.all_nodes.contains(NodeName::new(node).as_str())
    }

    pub fn all_nodes(&self) -> &IndexSet<NodeName> {
        &self.all_nodes
    }

    pub fn port_nodes(&self) -> &IndexSet<NodeName> {
        &self.port_nodes
    }

    pub fn top_level_nodes(&self) -> &IndexSet<NodeName> {
        &self.top_level_nodes
    }

    pub fn elements(&self) -> &IndexMap<String, Element> {
        &self.elements
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    pub fn num_nodes(&self) -> usize {
        self.all_nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Neighbors through a single resistor. Unknown nodes have none.
    pub fn resistive_neighbors(&self, node: &str) -> impl Iterator<Item = &NodeName> {
        neighbors(&self.resistive_adj, node)
    }

    /// Neighbors through a single capacitor or coupling capacitor.
    pub fn capacitive_neighbors(&self, node: &str) -> impl Iterator<Item = &NodeName> {
        neighbors(&self.capacitive_adj, node)
    }

    pub fn resistive_degree(&self, node: &str) -> usize {
        degree(&self.resistive_adj, node)
    }

    pub fn capacitive_degree(&self, node: &str) -> usize {
        degree(&self.capacitive_adj, node)
    }

    /// Number of distinct neighbors, optionally counting capacitive ones too.
    pub fn node_degree(&self, node: &str, include_capacitors: bool) -> usize {
        let mut degree = self.resistive_degree(node);
        if include_capacitors {
            degree += self.capacitive_degree(node);
        }
        degree
    }

    /// All nodes reachable from `start` through resistors, `start` included.
    pub fn resistive_component(&self, start: &str) -> IndexSet<NodeName> {
        let start = NodeName::new(start);
        let mut component = IndexSet::new();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if !component.insert(node.clone()) {
                continue;
            }
            for next in self.resistive_neighbors(node.as_str()) {
                if !component.contains(next) {
                    stack.push(next.clone());
                }
            }
        }

        component
    }

    /// Partition every node into resistively connected components.
    ///
    /// Capacitive edges never merge components. A node without resistors
    /// forms a component of its own.
    pub fn connected_components(&self) -> Vec<IndexSet<NodeName>> {
        let mut visited: IndexSet<NodeName> = IndexSet::new();
        let mut components = Vec::new();

        for node in &self.all_nodes {
            if visited.contains(node) {
                continue;
            }
            let component = self.resistive_component(node.as_str());
            visited.extend(component.iter().cloned());
            components.push(component);
        }

        components
    }

    /// Is there a resistive path from `node` to any ground alias?
    ///
    /// Breadth-first search over resistive edges only; a ground node is
    /// trivially connected.
    pub fn has_ground_connection(&self, node: &str) -> bool {
        let start = NodeName::new(node);
        let mut visited: IndexSet<NodeName> = IndexSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start.clone());
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current.is_ground() {
                return true;
            }
            for next in self.resistive_neighbors(current.as_str()) {
                if visited.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }

        false
    }

    /// Every node with a resistive path to ground.
    ///
    /// One breadth-first search seeded from all ground aliases at once; a node
    /// is in the result exactly when [`has_ground_connection`] holds for it.
    ///
    /// [`has_ground_connection`]: CircuitGraph::has_ground_connection
    pub fn ground_reachable(&self) -> IndexSet<NodeName> {
        let mut reached: IndexSet<NodeName> = IndexSet::new();
        let mut queue: VecDeque<NodeName> = GROUND_NAMES.iter().map(|g| NodeName::new(g)).collect();
        reached.extend(queue.iter().cloned());

        while let Some(current) = queue.pop_front() {
            for next in self.resistive_neighbors(current.as_str()) {
                if reached.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }

        reached
    }

    /// Names of all elements with a terminal on `node`, in registry order.
    ///
    /// Registered endpoints are already normalized.
    pub fn connected_elements(&self, node: &str) -> Vec<&str> {
        let node = NodeName::new(node);
        self.elements
            .values()
            .filter(|e| e.node1 == node.as_str() || e.node2 == node.as_str())
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Names of all elements touching any node of `component`.
    pub fn component_elements(&self, component: &IndexSet<NodeName>) -> Vec<&str> {
        self.elements
            .values()
            .filter(|e| {
                component.contains(e.node1.as_str()) || component.contains(e.node2.as_str())
            })
            .map(|e| e.name.as_str())
            .collect()
    }
}

/// Top-level names share the identity space with composed names and must not
/// look like one.
fn check_top_level_name(name: &str) -> Result<()> {
    if name.contains(SCOPE_SEPARATOR) {
        return Err(Error::ReservedSeparator {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn add_edge(adj: &mut Adjacency, a: &NodeName, b: &NodeName) {
    adj.entry(a.clone()).or_default().insert(b.clone());
    adj.entry(b.clone()).or_default().insert(a.clone());
}

fn neighbors<'a>(adj: &'a Adjacency, node: &str) -> impl Iterator<Item = &'a NodeName> {
    adj.get(NodeName::new(node).as_str())
        .into_iter()
        .flat_map(|set| set.iter())
}

fn degree(adj: &Adjacency, node: &str) -> usize {
    adj.get(NodeName::new(node).as_str())
        .map_or(0, |set| set.len())
}
