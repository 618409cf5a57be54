//! Benchmarks for the detection rules on synthetic flattened netlists.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use opencheck_analyzer::{DetectionMode, detect, detect_dc_floating};
use opencheck_core::{CircuitGraph, Element, HierarchicalNetlist, Instance, Subcircuit};

/// `instances` copies of an RC chain, with one coupling-only victim net per
/// instance.
fn coupled_chains(instances: usize, length: usize) -> CircuitGraph {
    let mut elements = Vec::with_capacity(2 * length);
    for i in 0..length {
        let next = if i + 1 == length {
            "out".to_string()
        } else {
            format!("n{}", i + 1)
        };
        let prev = if i == 0 {
            "in".to_string()
        } else {
            format!("n{}", i)
        };
        elements.push(Element::resistor(format!("r{}", i), prev, next, 50.0));
        elements.push(Element::capacitor(
            format!("c{}", i),
            format!("n{}", i + 1),
            "vss",
            1e-15,
        ));
    }
    let mut netlist = HierarchicalNetlist::new();
    netlist.add_subcircuit(Subcircuit::new(
        "chain",
        vec!["in".into(), "out".into()],
        elements,
    ));

    for i in 0..instances {
        netlist.add_instance(Instance::new(
            format!("x{}", i),
            "chain",
            vec![format!("a{}", i), "0".into()],
        ));
        netlist.add_element(Element::resistor(
            format!("rb{}", i),
            format!("a{}", i),
            "0",
            1e3,
        ));
        netlist.add_element(Element::coupling_capacitor(
            format!("cc{}", i),
            format!("victim{}", i),
            format!("a{}", i),
            1e-18,
        ));
    }

    CircuitGraph::from_netlist(&netlist).unwrap()
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_flattened");
    for instances in [10, 100] {
        let graph = coupled_chains(instances, 50);
        group.bench_with_input(BenchmarkId::from_parameter(instances), &graph, |b, g| {
            b.iter(|| detect(black_box(g), DetectionMode::Flattened));
        });
    }
    group.finish();
}

fn bench_dc_floating(c: &mut Criterion) {
    let graph = coupled_chains(100, 50);
    c.bench_function("dc_floating_100x50", |b| {
        b.iter(|| detect_dc_floating(black_box(&graph)));
    });
}

criterion_group!(benches, bench_detect, bench_dc_floating);
criterion_main!(benches);
