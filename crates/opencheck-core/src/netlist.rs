//! Hierarchical netlist: subcircuit templates, instances and top-level elements.

use indexmap::IndexMap;

use crate::element::{Element, Subcircuit};
use crate::error::{Error, Result};

/// A subcircuit instantiation (`X` line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Instance name as written (e.g. "x0").
    pub name: String,
    /// Name of the instantiated template.
    pub template: String,
    /// Connection nodes; `connections[i]` binds to the template's `ports[i]`.
    pub connections: Vec<String>,
}

impl Instance {
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        connections: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            connections,
        }
    }
}

/// A complete netlist as handed over by the parser.
///
/// Template names are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalNetlist {
    /// Templates keyed by lower-cased name, in definition order.
    subcircuits: IndexMap<String, Subcircuit>,
    /// Instantiations in netlist order.
    pub instances: Vec<Instance>,
    /// Elements outside any template.
    pub top_level_elements: Vec<Element>,
}

impl HierarchicalNetlist {
    /// Create an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, returning the one it replaces (if any).
    pub fn add_subcircuit(&mut self, subckt: Subcircuit) -> Option<Subcircuit> {
        self.subcircuits.insert(subckt.name.to_lowercase(), subckt)
    }

    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn add_element(&mut self, element: Element) {
        self.top_level_elements.push(element);
    }

    /// Look up a template by name (case-insensitive).
    pub fn subcircuit(&self, name: &str) -> Option<&Subcircuit> {
        self.subcircuits.get(&name.to_lowercase())
    }

    /// The first template in definition order.
    pub fn first_subcircuit(&self) -> Option<&Subcircuit> {
        self.subcircuits.values().next()
    }

    /// Iterate over templates in definition order.
    pub fn subcircuits(&self) -> impl Iterator<Item = &Subcircuit> {
        self.subcircuits.values()
    }

    pub fn num_subcircuits(&self) -> usize {
        self.subcircuits.len()
    }

    /// Is there nothing at all in this netlist?
    pub fn is_empty(&self) -> bool {
        self.subcircuits.is_empty()
            && self.instances.is_empty()
            && self.top_level_elements.is_empty()
    }

    /// Resolve an instance to its template, checking the port binding.
    pub fn resolve(&self, instance: &Instance) -> Result<&Subcircuit> {
        let subckt =
            self.subcircuit(&instance.template)
                .ok_or_else(|| Error::UnknownSubcircuit {
                    instance: instance.name.clone(),
                    template: instance.template.clone(),
                })?;

        if instance.connections.len() != subckt.ports.len() {
            return Err(Error::PortCountMismatch {
                instance: instance.name.clone(),
                template: subckt.name.clone(),
                expected: subckt.ports.len(),
                actual: instance.connections.len(),
            });
        }

        Ok(subckt)
    }
}
