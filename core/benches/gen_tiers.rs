use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use make24_core::{GameConfig, HandGenerator, RandomHandGenerator, RoundMode};

fn gen_tiers(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut group = c.benchmark_group("generate");

    for mode in [RoundMode::Solvable, RoundMode::Unsolvable] {
        let mut seed = 0;
        group.bench_function(format!("{mode:?}").to_lowercase(), |b| {
            b.iter(|| {
                seed += 1;
                RandomHandGenerator::new(seed)
                    .generate(black_box(&config), mode)
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, gen_tiers);
criterion_main!(benches);
