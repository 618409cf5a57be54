//! Report model and rendering.
//!
//! # JSON Format
//!
//! ```text
//! report_metadata     tool name, version, timestamp, netlist file
//! summary             total and per-severity / per-type counts
//! issues              every finding in detection order
//! issues_by_type      findings grouped by defect kind
//! issues_by_severity  findings grouped by severity
//! ```
//!
//! Grouped entries additionally carry `affected_elements_count`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use opencheck_analyzer::{DefectKind, Finding, Severity};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tool name recorded in report metadata.
pub const TOOL_NAME: &str = "Open Circuit Detector";
/// Report format version.
pub const REPORT_VERSION: &str = "1.0.0";

/// Affected elements listed per issue in the text report.
const DETAIL_ELEMENTS: usize = 10;
/// Critical/error findings listed in the console summary.
const SUMMARY_FINDINGS: usize = 5;
/// Characters of a node label shown in the console summary.
const SUMMARY_LABEL_CHARS: usize = 50;

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 60;

/// Findings of one detection run, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    findings: Vec<Finding>,
    netlist_path: Option<PathBuf>,
    timestamp: String,
}

/// Serializable report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub report_metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub issues: Vec<Finding>,
    pub issues_by_type: BTreeMap<DefectKind, Vec<GroupedIssue>>,
    pub issues_by_severity: BTreeMap<Severity, Vec<GroupedIssue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub tool_name: String,
    pub version: String,
    pub timestamp: String,
    /// Analyzed netlist (null when the findings did not come from a file).
    pub netlist_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_issues: usize,
    pub issues_by_severity: BTreeMap<Severity, usize>,
    pub issues_by_type: BTreeMap<DefectKind, usize>,
}

/// A finding inside a group, with its element count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedIssue {
    #[serde(flatten)]
    pub finding: Finding,
    pub affected_elements_count: usize,
}

impl Report {
    /// Create a report. The timestamp is stored as given.
    pub fn new(
        findings: Vec<Finding>,
        netlist_path: Option<PathBuf>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            findings,
            netlist_path,
            timestamp: timestamp.into(),
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn netlist_path(&self) -> Option<&Path> {
        self.netlist_path.as_deref()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Is there at least one critical or error finding?
    pub fn has_blocking_findings(&self) -> bool {
        self.findings.iter().any(|f| f.severity.is_blocking())
    }

    /// Number of findings per severity (absent severities are omitted).
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.severity).or_insert(0) += 1;
        }
        counts
    }

    /// Number of findings per defect kind (absent kinds are omitted).
    pub fn kind_counts(&self) -> BTreeMap<DefectKind, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Build the serializable document.
    pub fn to_document(&self) -> ReportDocument {
        let mut issues_by_type: BTreeMap<DefectKind, Vec<GroupedIssue>> = BTreeMap::new();
        let mut issues_by_severity: BTreeMap<Severity, Vec<GroupedIssue>> = BTreeMap::new();

        for finding in &self.findings {
            let grouped = GroupedIssue {
                finding: finding.clone(),
                affected_elements_count: finding.affected_elements.len(),
            };
            issues_by_type
                .entry(finding.kind)
                .or_default()
                .push(grouped.clone());
            issues_by_severity
                .entry(finding.severity)
                .or_default()
                .push(grouped);
        }

        ReportDocument {
            report_metadata: ReportMetadata {
                tool_name: TOOL_NAME.to_string(),
                version: REPORT_VERSION.to_string(),
                timestamp: self.timestamp.clone(),
                netlist_file: self.netlist_display(),
            },
            summary: ReportSummary {
                total_issues: self.findings.len(),
                issues_by_severity: self.severity_counts(),
                issues_by_type: self.kind_counts(),
            },
            issues: self.findings.clone(),
            issues_by_type,
            issues_by_severity,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Render as single-line JSON.
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    /// Render the full human-readable report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let heavy = "=".repeat(WIDE_RULE);
        let light = "-".repeat(WIDE_RULE);

        out.push_str(&format!("{}\n", heavy));
        out.push_str("OPEN CIRCUIT DETECTION REPORT\n");
        out.push_str(&format!("{}\n", heavy));
        out.push('\n');
        out.push_str(&format!("Generated: {}\n", self.timestamp));
        if let Some(netlist) = self.netlist_display() {
            out.push_str(&format!("Netlist:   {}\n", netlist));
        }
        out.push('\n');

        out.push_str(&format!("{}\n", light));
        out.push_str("SUMMARY\n");
        out.push_str(&format!("{}\n", light));
        out.push_str(&format!("Total issues found: {}\n", self.findings.len()));

        let by_severity = self.severity_counts();
        if !by_severity.is_empty() {
            out.push('\n');
            out.push_str("By Severity:\n");
            for (severity, count) in &by_severity {
                let label = severity.as_str().to_uppercase();
                out.push_str(&format!("  {:12} : {}\n", label, count));
            }
        }

        let by_kind = self.kind_counts();
        if !by_kind.is_empty() {
            out.push('\n');
            out.push_str("By Type:\n");
            let mut kinds: Vec<(&str, usize)> =
                by_kind.iter().map(|(k, c)| (k.as_str(), *c)).collect();
            kinds.sort_unstable();
            for (kind, count) in kinds {
                out.push_str(&format!("  {:25} : {}\n", kind, count));
            }
        }
        out.push('\n');

        if self.findings.is_empty() {
            out.push_str(&format!("{}\n", light));
            out.push_str("No issues detected. Circuit appears to be clean.\n");
            out.push_str(&format!("{}\n", light));
        } else {
            out.push_str(&format!("{}\n", light));
            out.push_str("DETAILED ISSUES\n");
            out.push_str(&format!("{}\n", light));

            for (i, finding) in self.sorted_findings().into_iter().enumerate() {
                write_issue(&mut out, i + 1, finding);
            }
        }

        out.push('\n');
        out.push_str(&format!("{}\n", heavy));
        out.push_str("END OF REPORT\n");
        out.push_str(&heavy);
        out
    }

    /// Render the short console summary.
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(NARROW_RULE);

        out.push('\n');
        out.push_str(&format!("{}\n", rule));
        out.push_str("OPEN CIRCUIT DETECTION SUMMARY\n");
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("Total issues: {}\n", self.findings.len()));

        if self.findings.is_empty() {
            out.push_str("No issues detected!\n");
        } else {
            for (severity, count) in self.severity_counts() {
                let label = severity.as_str().to_uppercase();
                out.push_str(&format!("  {:12} : {}\n", label, count));
            }

            let blocking: Vec<&Finding> = self
                .findings
                .iter()
                .filter(|f| f.severity.is_blocking())
                .collect();
            if !blocking.is_empty() {
                out.push('\n');
                out.push_str("Critical/Error Issues:\n");
                for finding in blocking.iter().take(SUMMARY_FINDINGS) {
                    out.push_str(&format!(
                        "  - [{}] {}\n",
                        finding.kind,
                        short_label(&finding.node)
                    ));
                }
                if blocking.len() > SUMMARY_FINDINGS {
                    out.push_str(&format!(
                        "  ... and {} more\n",
                        blocking.len() - SUMMARY_FINDINGS
                    ));
                }
            }
        }

        out.push_str(&format!("{}\n", rule));
        out
    }

    /// Print the console summary to stdout.
    pub fn print_summary(&self) {
        println!("{}", self.summary_text());
    }

    /// Save the JSON report, creating parent directories as needed.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        write_file(path.as_ref(), &json)
    }

    /// Save the text report, creating parent directories as needed.
    pub fn save_text(&self, path: impl AsRef<Path>) -> Result<()> {
        write_file(path.as_ref(), &self.to_text())
    }

    /// Findings ordered by severity, then defect kind token.
    fn sorted_findings(&self) -> Vec<&Finding> {
        let mut sorted: Vec<&Finding> = self.findings.iter().collect();
        sorted.sort_by(|a, b| {
            a.severity
                .cmp(&b.severity)
                .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
        });
        sorted
    }

    fn netlist_display(&self) -> Option<String> {
        self.netlist_path
            .as_ref()
            .map(|p| p.display().to_string())
    }
}

fn write_issue(out: &mut String, number: usize, finding: &Finding) {
    out.push('\n');
    out.push_str(&format!("Issue #{}\n", number));
    out.push_str(&format!("  Type:     {}\n", finding.kind));
    out.push_str(&format!(
        "  Severity: {}\n",
        finding.severity.as_str().to_uppercase()
    ));
    out.push_str(&format!("  Node:     {}\n", finding.node));
    out.push_str(&format!("  Description: {}\n", finding.description));

    let affected = &finding.affected_elements;
    if !affected.is_empty() {
        out.push_str(&format!("  Affected Elements ({}):\n", affected.len()));
        for element in affected.iter().take(DETAIL_ELEMENTS) {
            out.push_str(&format!("    - {}\n", element));
        }
        if affected.len() > DETAIL_ELEMENTS {
            out.push_str(&format!(
                "    ... and {} more elements\n",
                affected.len() - DETAIL_ELEMENTS
            ));
        }
    }
}

fn short_label(label: &str) -> String {
    if label.chars().count() > SUMMARY_LABEL_CHARS {
        let head: String = label.chars().take(SUMMARY_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    log::debug!("wrote report to {}", path.display());
    Ok(())
}

/// Seconds since the Unix epoch, as a string.
pub fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}
