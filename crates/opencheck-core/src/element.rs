//! Two-terminal elements and subcircuit templates.

use std::fmt;

use indexmap::IndexSet;

use crate::node::NodeName;

/// Kind of a two-terminal element.
///
/// Only resistors carry DC current between nodes. Capacitors and coupling
/// capacitors are tracked separately; the remaining kinds are recognized but
/// contribute no connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Resistor,
    Capacitor,
    CouplingCapacitor,
    Inductor,
    VoltageSource,
    CurrentSource,
}

impl ElementKind {
    /// Classify an element by its SPICE name prefix (case-insensitive).
    ///
    /// `CC` is checked before `C` so that coupling capacitors are not
    /// mistaken for plain capacitors.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.starts_with("cc") {
            Some(ElementKind::CouplingCapacitor)
        } else if lower.starts_with('c') {
            Some(ElementKind::Capacitor)
        } else if lower.starts_with('r') {
            Some(ElementKind::Resistor)
        } else if lower.starts_with('l') {
            Some(ElementKind::Inductor)
        } else if lower.starts_with('v') {
            Some(ElementKind::VoltageSource)
        } else if lower.starts_with('i') {
            Some(ElementKind::CurrentSource)
        } else {
            None
        }
    }

    /// Does this element form a DC path between its nodes?
    pub fn is_resistive(self) -> bool {
        matches!(self, ElementKind::Resistor)
    }

    /// Does this element couple its nodes capacitively?
    pub fn is_capacitive(self) -> bool {
        matches!(
            self,
            ElementKind::Capacitor | ElementKind::CouplingCapacitor
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Resistor => "resistor",
            ElementKind::Capacitor => "capacitor",
            ElementKind::CouplingCapacitor => "coupling capacitor",
            ElementKind::Inductor => "inductor",
            ElementKind::VoltageSource => "voltage source",
            ElementKind::CurrentSource => "current source",
        };
        f.write_str(name)
    }
}

/// A two-terminal element as written in the netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element name (e.g. "r1", "cc_84").
    pub name: String,
    /// First terminal node.
    pub node1: String,
    /// Second terminal node.
    pub node2: String,
    /// Value in base SI units (ohms or farads).
    pub value: f64,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        node1: impl Into<String>,
        node2: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            node1: node1.into(),
            node2: node2.into(),
            value,
            kind,
        }
    }

    pub fn resistor(
        name: impl Into<String>,
        node1: impl Into<String>,
        node2: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::new(ElementKind::Resistor, name, node1, node2, value)
    }

    pub fn capacitor(
        name: impl Into<String>,
        node1: impl Into<String>,
        node2: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::new(ElementKind::Capacitor, name, node1, node2, value)
    }

    pub fn coupling_capacitor(
        name: impl Into<String>,
        node1: impl Into<String>,
        node2: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::new(ElementKind::CouplingCapacitor, name, node1, node2, value)
    }
}

/// A subcircuit template from a `.SUBCKT`/`.ENDS` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Subcircuit {
    /// Template name as written.
    pub name: String,
    /// Port names in declaration order.
    pub ports: Vec<String>,
    /// Elements inside the template.
    pub elements: Vec<Element>,
    /// Nodes referenced by elements that are not ports.
    pub internal_nodes: IndexSet<NodeName>,
}

impl Subcircuit {
    /// Create a template, computing its internal node set.
    pub fn new(name: impl Into<String>, ports: Vec<String>, elements: Vec<Element>) -> Self {
        let port_set: IndexSet<NodeName> = ports.iter().map(NodeName::from).collect();
        let internal_nodes = elements
            .iter()
            .flat_map(|e| [NodeName::new(&e.node1), NodeName::new(&e.node2)])
            .filter(|n| !port_set.contains(n))
            .collect();

        Self {
            name: name.into(),
            ports,
            elements,
            internal_nodes,
        }
    }

    /// Number of declared ports.
    pub fn num_ports(&self) -> usize {
        self.ports.len()
    }

    /// Is the given name one of the declared ports (case-insensitive)?
    pub fn is_port(&self, name: &str) -> bool {
        let name = NodeName::new(name);
        self.ports.iter().any(|p| NodeName::new(p) == name)
    }
}

/// A subcircuit template that is still being read.
///
/// The parser opens a builder on `.SUBCKT`, pushes element lines into it, and
/// closes it on `.ENDS` (or at end of input) to obtain an immutable
/// [`Subcircuit`].
#[derive(Debug, Clone)]
pub struct SubcircuitBuilder {
    name: String,
    ports: Vec<String>,
    elements: Vec<Element>,
}

impl SubcircuitBuilder {
    /// Open a new template definition.
    pub fn open(name: impl Into<String>, ports: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ports,
            elements: Vec::new(),
        }
    }

    /// Name of the template being built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an element to the template.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Number of elements added so far.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Close the definition.
    pub fn close(self) -> Subcircuit {
        Subcircuit::new(self.name, self.ports, self.elements)
    }
}
