use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use matchselect::{
    KeysConfig, PreparedQuery, Select, SelectOptions, classify, filter_options, normalize,
    sort_by_label,
};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate `n` options labeled "item 0", "item 1", ...
fn generate_options(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({ "id": i, "label": format!("item {i}") }))
        .collect()
}

/// Generate `n` options with accented labels on every other entry.
fn generate_accented_options(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let label = if i % 2 == 0 {
                format!("Canción {i}")
            } else {
                format!("cancion {i}")
            };
            json!({ "id": i, "label": label })
        })
        .collect()
}

fn keys() -> KeysConfig<Value> {
    KeysConfig::new("id", "label").value_field("id")
}

// ---------------------------------------------------------------------------
// 1. Classification micro-benchmark
// ---------------------------------------------------------------------------

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("first_word", |b| {
        b.iter(|| classify(black_box("juan"), black_box("Juan Pérez")));
    });

    group.bench_function("substring", |b| {
        b.iter(|| classify(black_box("campo"), black_box("Banco del Campo")));
    });

    group.bench_function("any_char", |b| {
        b.iter(|| classify(black_box("bdc"), black_box("Banco del Campo")));
    });

    group.bench_function("no_match", |b| {
        b.iter(|| classify(black_box("xyz"), black_box("Banco del Campo")));
    });

    // Prepared once, as filter_options does.
    let pq = PreparedQuery::new("campo");
    group.bench_function("prepared_substring", |b| {
        b.iter(|| pq.classify(black_box("Banco del Campo")));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 2. Filter throughput at dataset sizes
// ---------------------------------------------------------------------------

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let keys = keys();

    for size in [100, 1_000, 10_000] {
        let options = generate_options(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            b.iter(|| filter_options(black_box(options), &keys, black_box("item 5")));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// 3. Normalization overhead
// ---------------------------------------------------------------------------

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("ascii_lowercase", |b| {
        b.iter(|| normalize(black_box("banco del campo")));
    });

    group.bench_function("accented", |b| {
        b.iter(|| normalize(black_box("Árbol de Canción Ñandú")));
    });

    let options = generate_accented_options(10_000);
    let keys = keys();
    group.bench_function("filter_accented_10k", |b| {
        b.iter(|| filter_options(black_box(&options), &keys, black_box("cancion")));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 4. Sort overhead
// ---------------------------------------------------------------------------

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let labels: Vec<String> = (0..10_000).rev().map(|i| format!("Ítem {i}")).collect();

    group.bench_function("sort_10k_labels", |b| {
        b.iter_batched(
            || labels.clone(),
            |mut data| {
                sort_by_label(&mut data, |s| s.clone());
                data
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 5. Full view per keystroke
// ---------------------------------------------------------------------------

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    let options = generate_options(1_000);
    let mut select = match Select::new(&options, SelectOptions::new(keys()).multi()) {
        Ok(select) => select,
        Err(err) => panic!("benchmark config: {err}"),
    };
    select.set_search("item 4");

    group.bench_function("view_1k", |b| {
        b.iter(|| select.view().candidates.len());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_classify,
    bench_filter,
    bench_normalize,
    bench_sort,
    bench_view,
);
criterion_main!(benches);
