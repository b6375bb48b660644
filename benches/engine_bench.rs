//! Criterion benchmarks for the evolutionary engine.
//!
//! Uses synthetic problems (password guessing, OneMax) to measure pure
//! engine overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, RngCore};
use u_evolve::engine::{Engine, EngineConfig};

const LETTERS: &str = " abcdefghijklmnopqrstuvwxyz";

// ===========================================================================
// Password guessing: maximize position-wise matches
// ===========================================================================

fn bench_password(c: &mut Criterion) {
    let mut group = c.benchmark_group("password");
    group.sample_size(10);

    for target in ["abcde", "hello world", "the quick brown fox jumps"] {
        let genes: Vec<char> = target.chars().collect();
        group.bench_with_input(BenchmarkId::from_parameter(genes.len()), &genes, |b, genes| {
            b.iter(|| {
                let mut engine = Engine::builder(
                    |g: &[char]| g.iter().zip(genes).filter(|(a, b)| a == b).count(),
                    genes.len(),
                )
                .alphabet(LETTERS.chars())
                .target_length(genes.len())
                .config(EngineConfig::default().with_seed(42))
                .build()
                .unwrap();
                black_box(engine.run())
            });
        });
    }
    group.finish();
}

// ===========================================================================
// OneMax: maximize the number of ones, with and without crossover
// ===========================================================================

fn uniform_crossover(p: &[u8], d: &[u8], rng: &mut dyn RngCore) -> Option<Vec<u8>> {
    if p == d {
        return None;
    }
    Some(
        p.iter()
            .zip(d)
            .map(|(&x, &y)| if rng.random_bool(0.5) { x } else { y })
            .collect(),
    )
}

fn bench_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("onemax");
    group.sample_size(10);

    for n in [32usize, 128] {
        for crossover in [false, true] {
            let id = format!("n{}_{}", n, if crossover { "crossover" } else { "mutate" });
            group.bench_with_input(BenchmarkId::new(id, n), &n, |b, &n| {
                b.iter(|| {
                    let mut builder =
                        Engine::builder(|g: &[u8]| g.iter().filter(|&&x| x == 1).count(), n)
                            .alphabet([0u8, 1])
                            .target_length(n)
                            .config(
                                EngineConfig::default()
                                    .with_seed(7)
                                    .with_pool_size(8)
                                    .with_max_age(50),
                            );
                    if crossover {
                        builder = builder.crossover(uniform_crossover);
                    }
                    let mut engine = builder.build().unwrap();
                    black_box(engine.run())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_password, bench_onemax);
criterion_main!(benches);
