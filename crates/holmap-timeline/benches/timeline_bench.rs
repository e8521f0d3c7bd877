//! Window transition cost for growing windows.

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use holmap_core::models::TimelineTransition;

fn windows(size: usize) -> (BTreeSet<usize>, BTreeSet<usize>) {
    let a = (0..size).collect();
    let b = (size / 2..size + size / 2).collect();
    (a, b)
}

fn bench_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_transition");
    for size in [10, 1_000, 10_000] {
        let (a, b) = windows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &(a, b), |bench, (a, b)| {
            bench.iter(|| TimelineTransition::between(black_box(a), black_box(b)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transition);
criterion_main!(benches);
