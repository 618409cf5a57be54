//! Node identity for connectivity graphs.
//!
//! Node names in a SPICE netlist are case-insensitive. Every name is
//! normalized to lower case the moment it becomes a [`NodeName`], so `VSS`,
//! `Vss` and `vss` always resolve to the same node.

use std::borrow::Borrow;
use std::fmt;

/// Reserved names that denote the common ground reference (already normalized).
pub const GROUND_NAMES: [&str; 4] = ["0", "gnd", "vss", "ground"];

/// Separator between an instance scope and a local name in a composed identity.
///
/// The lexer strips `;` comments, so no parsed name contains it.
pub const SCOPE_SEPARATOR: char = ';';

/// Escape character for separators inside a scope.
const SCOPE_ESCAPE: char = '\\';

/// A normalized (lower-case) node name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeName(String);

impl NodeName {
    /// Create a node name, normalizing case and surrounding whitespace.
    pub fn new(name: &str) -> Self {
        NodeName(name.trim().to_lowercase())
    }

    /// Get the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this node is one of the ground aliases.
    pub fn is_ground(&self) -> bool {
        GROUND_NAMES.contains(&self.0.as_str())
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(name: &str) -> Self {
        NodeName::new(name)
    }
}

impl From<&String> for NodeName {
    fn from(name: &String) -> Self {
        NodeName::new(name)
    }
}

/// Compose an instance-scoped identity for a name local to a subcircuit.
///
/// This is the only place where hierarchical names are built: internal nodes
/// and element names of an instance both go through here. Separators and
/// escapes inside the scope are escaped, so the first unescaped separator
/// always splits the identity back into `(scope, local)` and distinct pairs
/// never collide. Ground aliases are global and are returned unchanged.
pub fn compose(scope: &str, local: &str) -> NodeName {
    let local = NodeName::new(local);
    if local.is_ground() {
        return local;
    }

    let scope = NodeName::new(scope);
    let mut composed = String::with_capacity(scope.0.len() + local.0.len() + 1);
    for c in scope.0.chars() {
        if c == SCOPE_SEPARATOR || c == SCOPE_ESCAPE {
            composed.push(SCOPE_ESCAPE);
        }
        composed.push(c);
    }
    composed.push(SCOPE_SEPARATOR);
    composed.push_str(&local.0);
    NodeName(composed)
}
