//! Criterion benchmarks for profile evaluation throughput

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use extform_engine::batch;
use extform_engine::test_tree::build_binary_tree;
use extform_engine::BehavProfile;

fn benchmark_full_cache(c: &mut Criterion) {
    let tree = build_binary_tree(12);
    c.bench_function("cache_depth_12", |b| {
        b.iter_batched(
            || BehavProfile::full(&tree),
            |profile| {
                black_box(profile.payoff(0));
            },
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_liap_value(c: &mut Criterion) {
    let tree = build_binary_tree(12);
    c.bench_function("liap_value_depth_12", |b| {
        b.iter_batched(
            || BehavProfile::full(&tree),
            |profile| black_box(profile.liap_value()),
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_mutate_and_reread(c: &mut Criterion) {
    let tree = build_binary_tree(10);
    let mut profile = BehavProfile::full(&tree);
    c.bench_function("mutate_and_reread_depth_10", |b| {
        b.iter(|| {
            profile[0] = 0.25;
            profile[1] = 0.75;
            black_box(profile.max_regret())
        })
    });
}

fn benchmark_batch_liap(c: &mut Criterion) {
    let tree = build_binary_tree(10);
    c.bench_function("batch_liap_64_profiles", |b| {
        b.iter_batched(
            || vec![BehavProfile::full(&tree); 64],
            |mut profiles| black_box(batch::liap_values(&mut profiles)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    benchmark_full_cache,
    benchmark_liap_value,
    benchmark_mutate_and_reread,
    benchmark_batch_liap,
);
criterion_main!(benches);
