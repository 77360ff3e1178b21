use criterion::{black_box, criterion_group, criterion_main, Criterion};
use focustree::dataset::{feature_data, labels, SAMPLES};
use focustree::constants::N_FEATURES;
use focustree::{DecisionTreeClassifier, Matrix};

pub fn fit_benchmark(c: &mut Criterion) {
    // Tile the toy dataset so the split search has some work to do.
    let samples: Vec<_> = SAMPLES.iter().cycle().take(SAMPLES.len() * 500).copied().collect();
    let data_vec = feature_data(&samples);
    let y = labels(&samples);
    let data = Matrix::new(&data_vec, samples.len(), N_FEATURES);

    let mut group = c.benchmark_group("fit_benchmark");
    group.bench_function("fit_tree_tiled_dataset", |b| {
        b.iter(|| {
            let mut model = DecisionTreeClassifier::default();
            model.fit(black_box(&data), black_box(&y)).unwrap();
        })
    });
    group.bench_function("export_tree_tiled_dataset", |b| {
        let mut model = DecisionTreeClassifier::default();
        model.fit(&data, &y).unwrap();
        b.iter(|| black_box(model.export().unwrap()))
    });
    group.finish();
}

criterion_group!(benches, fit_benchmark);
criterion_main!(benches);
