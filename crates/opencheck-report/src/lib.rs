//! Report rendering for opencheck findings.
//!
//! A [`Report`] wraps the findings of one detection run together with the
//! analyzed netlist path and a caller-supplied timestamp, and renders them as:
//!
//! - a JSON document ([`Report::to_json`], [`Report::save_json`])
//! - a plain-text report for review ([`Report::to_text`], [`Report::save_text`])
//! - a short console summary ([`Report::print_summary`])
//!
//! # Example
//!
//! ```
//! use opencheck_analyzer::{DefectKind, Finding};
//! use opencheck_report::Report;
//!
//! let findings = vec![Finding::new(
//!     "n",
//!     DefectKind::DcFloatingNode,
//!     "Node 'n' has no resistive path to ground: 2 capacitive connections, r_degree=0",
//!     vec!["cc1".to_string(), "cc2".to_string()],
//! )];
//! let report = Report::new(findings, Some("top.sp".into()), "1700000000");
//!
//! assert!(report.has_blocking_findings());
//! assert!(report.to_text().contains("DC_FLOATING_NODE"));
//! ```

pub mod error;
pub mod report;

pub use error::{Error, Result};
pub use report::{
    GroupedIssue, REPORT_VERSION, Report, ReportDocument, ReportMetadata, ReportSummary,
    TOOL_NAME, unix_timestamp,
};
