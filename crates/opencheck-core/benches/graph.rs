//! Benchmarks for graph construction and reachability queries.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use opencheck_core::{CircuitGraph, Element, HierarchicalNetlist, Instance, Subcircuit};

/// A resistor ladder template with `n` internal nodes and a cap on each rung.
fn ladder(n: usize) -> Subcircuit {
    let mut elements = Vec::with_capacity(2 * n + 1);
    elements.push(Element::resistor("r_in", "in", "n0", 100.0));
    for i in 0..n {
        let next = if i + 1 == n {
            "out".to_string()
        } else {
            format!("n{}", i + 1)
        };
        elements.push(Element::resistor(
            format!("r{}", i),
            format!("n{}", i),
            next,
            100.0,
        ));
        elements.push(Element::capacitor(
            format!("c{}", i),
            format!("n{}", i),
            "vss",
            1e-15,
        ));
    }
    Subcircuit::new(
        "ladder",
        vec!["in".into(), "out".into(), "vss".into()],
        elements,
    )
}

fn hierarchy(instances: usize, rungs: usize) -> HierarchicalNetlist {
    let mut netlist = HierarchicalNetlist::new();
    netlist.add_subcircuit(ladder(rungs));
    for i in 0..instances {
        netlist.add_instance(Instance::new(
            format!("x{}", i),
            "ladder",
            vec![format!("net{}", i), format!("net{}", i + 1), "0".into()],
        ));
    }
    netlist
}

fn bench_flatten(c: &mut Criterion) {
    let netlist = hierarchy(50, 40);
    c.bench_function("flatten_50x40", |b| {
        b.iter(|| CircuitGraph::from_netlist(black_box(&netlist)).unwrap());
    });
}

fn bench_components(c: &mut Criterion) {
    let graph = CircuitGraph::from_netlist(&hierarchy(50, 40)).unwrap();
    c.bench_function("connected_components_50x40", |b| {
        b.iter(|| black_box(&graph).connected_components());
    });
}

fn bench_ground_reachability(c: &mut Criterion) {
    let graph = CircuitGraph::from_netlist(&hierarchy(50, 40)).unwrap();
    c.bench_function("has_ground_connection_far_node", |b| {
        b.iter(|| black_box(&graph).has_ground_connection("net50"));
    });
    c.bench_function("ground_reachable_50x40", |b| {
        b.iter(|| black_box(&graph).ground_reachable());
    });
}

criterion_group!(
    benches,
    bench_flatten,
    bench_components,
    bench_ground_reachability
);
criterion_main!(benches);
