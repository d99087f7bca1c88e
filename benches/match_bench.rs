//! Matcher throughput on a city-sized route index.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rutero::{match_routes_default, Route, RouteId, RouteIndex};

const NAMES: &[&str] = &[
    "Centro",
    "Periférico",
    "Plaza Norte",
    "Circuito Poniente",
    "Cañada",
    "Mérida Norte",
    "García Ginerés",
    "Itzimná",
    "Pacabtún",
    "Francisco de Montejo",
];

/// A synthetic index about the size of a real city network.
fn build_index(routes: usize) -> RouteIndex {
    let routes = (0..routes)
        .map(|i| Route {
            id: RouteId::new(format!("feature-{}", i)),
            number: Some(format!("{}", i % 300)),
            name: Some(format!("{} {}", NAMES[i % NAMES.len()], i / NAMES.len())),
            color: "#3392ff".to_string(),
            geometry: vec![vec![]],
        })
        .collect();
    RouteIndex::build(routes)
}

fn bench_match(c: &mut Criterion) {
    let index = build_index(500);

    let mut group = c.benchmark_group("match_routes");
    group.bench_function("numeric_exact", |b| {
        b.iter(|| match_routes_default(black_box("45"), &index))
    });
    group.bench_function("ruta_prefixed", |b| {
        b.iter(|| match_routes_default(black_box("ruta 128"), &index))
    });
    group.bench_function("name_prefix", |b| {
        b.iter(|| match_routes_default(black_box("peri"), &index))
    });
    group.bench_function("accented_name", |b| {
        b.iter(|| match_routes_default(black_box("Mérida"), &index))
    });
    group.bench_function("miss", |b| {
        b.iter(|| match_routes_default(black_box("zzzzzz"), &index))
    });
    group.finish();
}

criterion_group!(benches, bench_match);
criterion_main!(benches);
