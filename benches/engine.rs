//! Benchmarks for the fuzzy-inference and grid-search engines

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fuzzytip::fuzzy::compute_tip;
use fuzzytip::search::{bfs, dfs, greedy_best_first, GridState};

fn fuzzy_benchmark(c: &mut Criterion) {
    c.bench_function("compute_tip", |b| {
        b.iter(|| black_box(compute_tip(black_box(8.0), black_box(9.0))))
    });
}

fn search_benchmark(c: &mut Criterion) {
    let start = GridState::new(0, 0);
    let far_corner = GridState::new(10, 10);

    let mut group = c.benchmark_group("grid_search");

    group.bench_with_input(BenchmarkId::new("bfs", "far corner"), &far_corner, |b, goal| {
        b.iter(|| black_box(bfs(start, *goal)))
    });
    group.bench_with_input(BenchmarkId::new("dfs", "far corner"), &far_corner, |b, goal| {
        b.iter(|| black_box(dfs(start, *goal)))
    });
    group.bench_with_input(
        BenchmarkId::new("greedy", "far corner"),
        &far_corner,
        |b, goal| b.iter(|| black_box(greedy_best_first(start, *goal))),
    );

    group.finish();
}

criterion_group!(benches, fuzzy_benchmark, search_benchmark);
criterion_main!(benches);
