use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::Rng;
use splay_forest::statistic::Count;
use splay_forest::trees::euler::LcaStatistic;
use splay_forest::DynamicForest;

mod common;

fn bench_lca(b: &mut Criterion) {
    let mut rng = rand::thread_rng();

    let mut group = b.benchmark_group("Euler-Tour Tree: Lowest Common Ancestor");
    group.plot_config(common::plot_config());

    for l in common::SIZES {
        let parents = common::random_parents(&mut rng, l);
        let (mut forest, nodes) = common::construct_euler::<LcaStatistic, false>(&parents);

        group.bench_with_input(BenchmarkId::new("range_min", l), &l, |b, _| {
            b.iter_batched(
                || (nodes[rng.gen_range(0..l)], nodes[rng.gen_range(0..l)]),
                |(u, v)| black_box(forest.find_lca_by_range_min(u, v)),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("ancestor_walk", l), &l, |b, _| {
            b.iter_batched(
                || (nodes[rng.gen_range(0..l)], nodes[rng.gen_range(0..l)]),
                |(u, v)| black_box(forest.find_lca(u, v)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_evert(b: &mut Criterion) {
    let mut rng = rand::thread_rng();

    let mut group = b.benchmark_group("Euler-Tour Tree: Evert");
    group.plot_config(common::plot_config());

    for l in common::SIZES {
        let parents = common::random_parents(&mut rng, l);
        let (mut forest, nodes) = common::construct_euler::<Count, true>(&parents);
        group.bench_with_input(BenchmarkId::new("evert", l), &l, |b, _| {
            b.iter_batched(
                || nodes[rng.gen_range(0..l)],
                |v| forest.evert(v),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("find_root", l), &l, |b, _| {
            b.iter_batched(
                || nodes[rng.gen_range(0..l)],
                |v| black_box(forest.find_root(v)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lca, bench_evert);
criterion_main!(benches);
