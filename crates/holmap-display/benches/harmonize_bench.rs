//! Harmonisation cost as the navigation tree grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use holmap_core::traits::NullRenderer;
use holmap_display::{harmonize, DisplayController};
use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomyBuilder;
use test_fixtures::{collection, point_feature};

fn tree(categories: usize, per_category: usize) -> Vec<Vec<bool>> {
    (0..categories)
        .map(|c| (0..per_category).map(|f| (c + f) % 3 == 0).collect())
        .collect()
}

fn controller(features: usize) -> DisplayController {
    let cats = ["Park", "Museum", "Church", "Market", "Harbour"];
    let docs = (0..features)
        .map(|n| point_feature(&format!("f{n}"), &format!("Feature {n}"), &[("Type", cats[n % cats.len()])]))
        .collect();
    let store = FeatureStore::from_value(&collection(docs), "bench.json").unwrap();
    let taxonomies = TaxonomyBuilder::new(false).build(&store);
    DisplayController::new(store, taxonomies, Box::new(NullRenderer))
}

fn bench_pure(c: &mut Criterion) {
    let mut group = c.benchmark_group("harmonize_pure");
    for size in [10, 100, 1000] {
        let t = tree(10, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &t, |b, t| {
            b.iter(|| harmonize(black_box(t)))
        });
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("show_hide_feature");
    for features in [50, 500] {
        let mut ctl = controller(features);
        group.bench_function(BenchmarkId::from_parameter(features), |b| {
            let mut show = true;
            b.iter(|| {
                ctl.show_hide_feature(show, 1, None);
                show = !show;
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pure, bench_toggle);
criterion_main!(benches);
