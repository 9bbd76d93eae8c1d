use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use make24_core::{solve, solve_all};

/// Hands ordered by how much of the search tree they force the solver through.
const TIERS: [(&str, [f64; 4]); 4] = [
    ("early_hit", [4.0, 6.0, 1.0, 1.0]),
    ("fractional", [8.0, 3.0, 8.0, 3.0]),
    ("late_hit", [1.0, 1.0, 2.0, 13.0]),
    ("dead_end", [1.0, 1.0, 1.0, 1.0]),
];

fn solver_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for (name, values) in TIERS {
        group.bench_function(name, |b| b.iter(|| solve(black_box(&values))));
    }
    group.finish();

    let mut group = c.benchmark_group("solve_all");
    for (name, values) in TIERS {
        group.bench_function(name, |b| b.iter(|| solve_all(black_box(&values))));
    }
    group.finish();
}

criterion_group!(benches, solver_tiers);
criterion_main!(benches);
