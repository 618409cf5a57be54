//! Connectivity defect detection for opencheck.
//!
//! Detection runs over a [`CircuitGraph`](opencheck_core::CircuitGraph) that
//! has already been built, and never modifies it. Every rule is a pure
//! function from the graph to a list of [`Finding`]s; [`detect`] runs the rule
//! set that matches the way the graph was built.
//!
//! | Defect | Severity | Mode |
//! |--------|----------|------|
//! | [`DefectKind::FloatingNode`] | critical | both |
//! | [`DefectKind::IsolatedComponent`] | critical | both |
//! | [`DefectKind::FloatingPort`] | warning | both (vacuous when flattened) |
//! | [`DefectKind::CapacitorOnly`] | warning | standard |
//! | [`DefectKind::DcFloatingNode`] | error | flattened |

pub mod detector;
pub mod finding;

pub use detector::{
    DetectionMode, detect, detect_capacitor_only, detect_dc_floating, detect_floating_nodes,
    detect_floating_ports, detect_isolated_components,
};
pub use finding::{DefectKind, Finding, Severity};
