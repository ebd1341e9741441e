use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rooted_forest::{Forest, DEFAULT_WEIGHT};

fn make_chain(size: i64) -> Forest {
    let mut forest = Forest::new();

    for i in 1..size {
        forest
            .add_edge((i - 1, 0), (i, 0), i as f64)
            .expect("chain vertices have a single parent");
    }

    forest
}

fn make_star(size: i64) -> Forest {
    Forest::from_edges((1..size).map(|i| ((0, 0), (i, i), DEFAULT_WEIGHT)))
        .expect("star leaves have a single parent")
}

fn bench_make_forest(c: &mut Criterion) {
    let mut g = c.benchmark_group("forest creation");

    for size in [0, 100, 10_000, 100_000] {
        g.bench_with_input(BenchmarkId::new("make_chain", size), &size, |b, size| {
            b.iter(|| black_box(make_chain(*size)))
        });
        g.bench_with_input(BenchmarkId::new("make_star", size), &size, |b, size| {
            b.iter(|| black_box(make_star(*size)))
        });
    }
}

fn bench_subdivide_forest(c: &mut Criterion) {
    let mut g = c.benchmark_group("forest subdivision");

    for size in [100, 10_000] {
        g.bench_with_input(
            BenchmarkId::new("subdivide_chain", size),
            &size,
            |b, size| {
                b.iter_batched(
                    || make_chain(*size),
                    |mut forest| {
                        for i in 1..*size {
                            forest
                                .insert_vertex((i - 1, 0), (i, 1), (i, 0), 0.5, 0.5)
                                .expect("every chain edge can be subdivided");
                        }
                        forest
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }
}

fn bench_clone_forest(c: &mut Criterion) {
    let mut g = c.benchmark_group("forest cloning");

    for size in [0, 100, 10_000, 100_000] {
        g.bench_with_input(BenchmarkId::new("clone_chain", size), &size, |b, size| {
            let forest = make_chain(*size);
            b.iter(|| black_box(forest.clone()))
        });
    }
}

criterion_group!(
    benches,
    bench_make_forest,
    bench_subdivide_forest,
    bench_clone_forest
);
criterion_main!(benches);
