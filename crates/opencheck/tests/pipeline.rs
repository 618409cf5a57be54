//! End-to-end runs over the bundled fixture netlist.

use std::path::PathBuf;

use opencheck::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn coupled_ports(options: &AnalysisOptions) -> Analysis {
    analyze_file(fixture("coupled_ports.sp"), options).unwrap()
}

#[test]
fn test_fixture_structure() {
    let analysis = coupled_ports(&AnalysisOptions::flattened());
    let netlist = &analysis.netlist;

    assert_eq!(netlist.num_subcircuits(), 1);
    assert_eq!(netlist.instances.len(), 1);
    assert_eq!(netlist.top_level_elements.len(), 84);
    assert!(
        netlist
            .top_level_elements
            .iter()
            .all(|e| e.kind == opencheck::ElementKind::CouplingCapacitor)
    );

    let subckt = netlist.first_subcircuit().unwrap();
    assert_eq!(subckt.ports.len(), 84);
    assert!(netlist.resolve(&netlist.instances[0]).is_ok());
    assert!(analysis.warnings.is_empty());
}

#[test]
fn test_victim_net_connectivity() {
    let analysis = coupled_ports(&AnalysisOptions::flattened());
    let graph = &analysis.graph;

    assert!(graph.contains_node("n"));
    assert_eq!(graph.capacitive_degree("n"), 83);
    assert_eq!(graph.resistive_degree("n"), 0);
    assert!(!graph.has_ground_connection("n"));
    assert!(graph.has_ground_connection("net1"));
    assert_eq!(graph.top_level_nodes().len(), 85);
}

#[test]
fn test_victim_net_is_only_finding() {
    let analysis = coupled_ports(&AnalysisOptions::flattened());
    assert_eq!(analysis.findings.len(), 1);

    let finding = &analysis.findings[0];
    assert_eq!(finding.node, "n");
    assert_eq!(finding.kind, DefectKind::DcFloatingNode);
    assert_eq!(finding.severity, Severity::Error);
    assert!(finding.description.contains("83 capacitive connections"));
    assert!(finding.description.contains("r_degree=0"));
    assert_eq!(finding.affected_elements.len(), 83);
    assert!(finding.affected_elements.iter().all(|e| e.starts_with("cc_")));
    assert!(analysis.has_blocking_findings());
}

#[test]
fn test_template_alone_is_clean() {
    let analysis = coupled_ports(&AnalysisOptions::subcircuit_only(None));

    assert_eq!(analysis.subcircuit.as_deref(), Some("PM_CMOM1%P"));
    assert_eq!(analysis.graph.port_nodes().len(), 84);
    assert!(analysis.findings.is_empty());
}

#[test]
fn test_reports_for_fixture() {
    let path = fixture("coupled_ports.sp");
    let analysis = coupled_ports(&AnalysisOptions::flattened());
    let report = Report::new(analysis.findings, Some(path.clone()), "1700000000");

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let text_path = dir.path().join("report.txt");
    report.save_json(&json_path).unwrap();
    report.save_text(&text_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["report_metadata"]["tool_name"], "Open Circuit Detector");
    assert_eq!(
        json["report_metadata"]["netlist_file"],
        path.display().to_string()
    );
    assert_eq!(json["summary"]["total_issues"], 1);
    assert_eq!(json["summary"]["issues_by_severity"]["error"], 1);
    assert_eq!(json["issues"][0]["type"], "DC_FLOATING_NODE");
    assert_eq!(
        json["issues_by_type"]["DC_FLOATING_NODE"][0]["affected_elements_count"],
        83
    );

    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("OPEN CIRCUIT DETECTION REPORT"));
    assert!(text.contains("SUMMARY"));
    assert!(text.contains("DETAILED ISSUES"));
    assert!(text.contains("  Node:     n\n"));
    assert!(text.contains("... and 73 more elements"));
}

#[test]
fn test_repeated_runs_identical() {
    let first = coupled_ports(&AnalysisOptions::flattened());
    let second = coupled_ports(&AnalysisOptions::flattened());

    assert_eq!(first.graph, second.graph);
    assert_eq!(first.findings, second.findings);
    assert_eq!(
        detect(&first.graph, DetectionMode::Flattened),
        first.findings
    );
}
