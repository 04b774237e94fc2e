//! Benchmarks for PackedBits storage and stochastic perturbation.

use binnet::{perturb_column, stochastic_perturb, PackedBits};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;

// =============================================================================
// Single Bit Operations
// =============================================================================

fn bench_set_bit(c: &mut Criterion) {
    let mut bits = PackedBits::new(10000);

    c.bench_function("set_bit", |b| {
        let mut i = 0;
        b.iter(|| {
            bits.set_bit(black_box(i % 10000));
            i += 1;
        });
    });
}

fn bench_get_bit(c: &mut Criterion) {
    let mut bits = PackedBits::new(10000);
    bits.set_all();

    c.bench_function("get_bit", |b| {
        let mut i = 0;
        b.iter(|| {
            let _ = bits.get_bit(black_box(i % 10000));
            i += 1;
        });
    });
}

// =============================================================================
// Counting and Randomization
// =============================================================================

fn bench_num_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("num_set");

    for size in [128, 1024, 4096, 16384].iter() {
        let mut bits = PackedBits::new(*size);
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        bits.random_set_pct(&mut rng, 0.2);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(bits.num_set()));
        });
    }
    group.finish();
}

fn bench_random_set_pct(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_set_pct");

    for size in [128, 1024, 4096].iter() {
        let mut bits = PackedBits::new(*size);
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| bits.random_set_pct(&mut rng, 0.5));
        });
    }
    group.finish();
}

// =============================================================================
// Perturbation
// =============================================================================

fn bench_stochastic_perturb(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);

    c.bench_function("stochastic_perturb_word", |b| {
        b.iter(|| black_box(stochastic_perturb(black_box(0x5555_5555_5555_5555u64), 0.25, &mut rng)));
    });
}

fn bench_perturb_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("perturb_column");

    for size in [128, 1024, 4096].iter() {
        let mut bits = PackedBits::new(*size);
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        bits.random_set_pct(&mut rng, 0.5);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| perturb_column(&mut bits, black_box(0.1), &mut rng));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set_bit,
    bench_get_bit,
    bench_num_set,
    bench_random_set_pct,
    bench_stochastic_perturb,
    bench_perturb_column,
);

criterion_main!(benches);
