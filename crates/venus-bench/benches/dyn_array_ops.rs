//! Criterion micro-benchmarks for `DynArray` and `FixedArray`, with `Vec`
//! as the baseline.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use venus_bench::{apply_dyn, apply_vec, mixed_ops};
use venus_vtd::{DynArray, FixedArray};

/// Benchmark: 10K push_back from empty, including every growth step.
fn bench_push_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_10k");
    group.bench_function("dyn_array", |b| {
        b.iter(|| {
            let mut a = DynArray::new();
            for i in 0..10_000u64 {
                a.push_back(i);
            }
            black_box(a.len());
        });
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..10_000u64 {
                v.push(i);
            }
            black_box(v.len());
        });
    });
    group.finish();
}

/// Benchmark: insert at the front, the worst case for shifting.
fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    for n in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("dyn_array", n), &n, |b, &n| {
            b.iter(|| {
                let mut a = DynArray::new();
                for i in 0..n as u64 {
                    a.insert(0, i);
                }
                black_box(a.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("vec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n as u64 {
                    v.insert(0, i);
                }
                black_box(v.len());
            });
        });
    }
    group.finish();
}

/// Benchmark: seeded mix of push/insert/erase/pop.
fn bench_mixed_ops(c: &mut Criterion) {
    let ops = mixed_ops(42, 5_000);
    let mut group = c.benchmark_group("mixed_ops_5k");
    group.bench_function("dyn_array", |b| b.iter(|| black_box(apply_dyn(&ops).len())));
    group.bench_function("vec", |b| b.iter(|| black_box(apply_vec(&ops).len())));
    group.finish();
}

/// Benchmark: resize with a fill value, then shrink back.
fn bench_resize_cycle(c: &mut Criterion) {
    c.bench_function("dyn_array_resize_cycle", |b| {
        let mut a: DynArray<u32> = DynArray::new();
        b.iter(|| {
            a.resize_with_value(4_096, &7);
            a.truncate(16);
            a.shrink_to_fit();
            black_box(a.capacity());
        });
    });
}

/// Benchmark: backfilling a 64-slot FixedArray from a short seed.
fn bench_fixed_from_seq(c: &mut Criterion) {
    let seed = [1u64, 2, 3];
    c.bench_function("fixed_array_from_seq_64", |b| {
        b.iter(|| {
            let f: FixedArray<u64, 64> = FixedArray::from_seq(black_box(&seed)).unwrap();
            black_box(f[63]);
        });
    });
}

criterion_group!(
    benches,
    bench_push_10k,
    bench_insert_front,
    bench_mixed_ops,
    bench_resize_cycle,
    bench_fixed_from_seq
);
criterion_main!(benches);
