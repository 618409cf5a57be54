//! Parsing netlists from files.

use std::io::Write;

use opencheck_core::{CircuitGraph, ElementKind};
use opencheck_parser::{Error, ParseWarning, parse, parse_file};

const EXTRACTED: &str = r#"* Extracted RC netlist
.SUBCKT PM_CMOM1%P 1 2 3 4
+ 5
r1 1 2 0.5
r2 2 3 0.5
c1 3 0 0.01f ; to substrate
cc_1 4 5 0.00538176f
.ENDS PM_CMOM1%P

x0 net1 net2 net3 net4 net5 PM_CMOM1%P
cc_10 net4 net6 1.2f
.end
"#;

#[test]
fn test_parse_file_roundtrip_with_continuation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXTRACTED.as_bytes()).unwrap();

    let result = parse_file(file.path()).unwrap();
    let netlist = &result.netlist;

    let subckt = netlist.subcircuit("pm_cmom1%p").unwrap();
    assert_eq!(subckt.ports, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(subckt.elements.len(), 4);
    assert_eq!(subckt.elements[3].kind, ElementKind::CouplingCapacitor);
    assert!(subckt.internal_nodes.contains("0"));

    assert_eq!(netlist.instances.len(), 1);
    assert_eq!(netlist.top_level_elements.len(), 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_parse_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist.sp");

    assert!(matches!(parse_file(&missing), Err(Error::Io(_))));
}

#[test]
fn test_parsed_netlist_flattens() {
    let result = parse(EXTRACTED).unwrap();
    let graph = CircuitGraph::from_netlist(&result.netlist).unwrap();

    // Instance ports map onto top-level nets; substrate stays global
    assert!(graph.contains_node("net1"));
    assert!(graph.contains_node("0"));
    assert!(!graph.contains_node("x0;1"));
    assert!(graph.element("x0;r1").is_some());
    assert!(graph.element("cc_10").is_some());
    assert_eq!(graph.capacitive_degree("net4"), 2);
}

#[test]
fn test_warnings_do_not_abort() {
    let input = ".subckt a p\nr1 p 0 1\n.ends\nx9 a\n.subckt b q\nc1 q 0 1f\n";
    let result = parse(input).unwrap();

    assert_eq!(result.netlist.num_subcircuits(), 2);
    assert_eq!(result.warnings.len(), 2);
    assert!(matches!(
        result.warnings[0],
        ParseWarning::MalformedInstance { .. }
    ));
    assert!(matches!(
        result.warnings[1],
        ParseWarning::UnterminatedSubcircuit { line: 5, .. }
    ));
    assert!(result.warnings[1].to_string().contains("'b'"));
}
