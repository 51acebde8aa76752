//! Benchmarks for the cumulative frequency table.
//!
//! Run with: cargo bench -p cumfreq

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cumfreq::FrequencyTable;
use std::hint::black_box;

const SIZES: [usize; 3] = [256, 4096, 65_536];

/// Deterministic LCG so every run benchmarks the same access pattern.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn populated_table(n: usize) -> FrequencyTable {
    let values: Vec<u64> = (0..n).map(|i| (i % 50 + 1) as u64).collect();
    FrequencyTable::from_frequencies(&values)
}

// ============================================================================
// Point update
// ============================================================================

fn bench_add_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("table/add_value");

    for n in SIZES {
        let mut table = populated_table(n);
        let mut rng = Lcg(0x9E37_79B9_7F4A_7C15);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let pos = rng.next() as usize % n;
                table.add_value(black_box(pos), 1);
            })
        });
    }

    group.finish();
}

// ============================================================================
// Prefix query
// ============================================================================

fn bench_cumulative(c: &mut Criterion) {
    let mut group = c.benchmark_group("table/cumulative");

    for n in SIZES {
        let table = populated_table(n);
        let mut rng = Lcg(0x2545_F491_4F6C_DD1D);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let pos = rng.next() as usize % n;
                black_box(table.cumulative(black_box(pos)));
            })
        });
    }

    group.finish();
}

// ============================================================================
// Rank inversion
// ============================================================================

fn bench_position_of_cumulative(c: &mut Criterion) {
    let mut group = c.benchmark_group("table/position_of_cumulative");

    for n in SIZES {
        let table = populated_table(n);
        let total = table.total();
        let mut rng = Lcg(0xDA94_2042_E4DD_58B5);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let target = rng.next() % total + 1;
                black_box(table.position_of_cumulative(black_box(target)));
            })
        });
    }

    group.finish();
}

// ============================================================================
// Rescale
// ============================================================================

fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("table/rescale");
    group.sample_size(20);

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || populated_table(n),
                |mut table| {
                    table.rescale(black_box(2));
                    black_box(table)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_value,
    bench_cumulative,
    bench_position_of_cumulative,
    bench_rescale
);
criterion_main!(benches);
