use criterion::{criterion_group, criterion_main, Criterion};
use grid_route::GridPathEngine;
use rand::prelude::*;
use std::hint::black_box;

fn bfs_bench(c: &mut Criterion) {
    for n in [32, 128] {
        let mut empty = GridPathEngine::new(n, n);
        c.bench_function(format!("{n}x{n}, empty").as_str(), |b| {
            b.iter(|| black_box(empty.find_shortest_path()))
        });

        let mut rng = StdRng::seed_from_u64(0);
        let mut walled = GridPathEngine::new(n, n);
        walled.randomize_obstacles_with(&mut rng, n * n / 5);
        walled.generate_components();
        c.bench_function(format!("{n}x{n}, random walls").as_str(), |b| {
            b.iter(|| black_box(walled.find_shortest_path()))
        });
    }
}

criterion_group!(benches, bfs_bench);
criterion_main!(benches);
