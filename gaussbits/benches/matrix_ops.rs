use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use gaussbits::{BitMatrix, BitStore, BitVector, Word};
use rand::{rngs::SmallRng, SeedableRng};

fn bench_copy<W1: Word, W2: Word>(c: &mut Criterion, name: &str) {
    let mut rng = SmallRng::seed_from_u64(1);
    let source: BitStore<W1> = BitStore::random(&mut rng, 1 << 16);
    let mut dest: BitStore<W2> = BitStore::zeros(0);
    c.bench_function(name, |b| {
        b.iter(|| {
            dest.copy_from(black_box(&source));
            black_box(dest.count_ones())
        })
    });
}

fn copy_benchmarks(c: &mut Criterion) {
    bench_copy::<u64, u64>(c, "copy 64 -> 64");
    bench_copy::<u64, u8>(c, "copy 64 -> 8");
    bench_copy::<u8, u64>(c, "copy 8 -> 64");
    bench_copy::<u16, u32>(c, "copy 16 -> 32");
}

fn solve_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("x_for");
    for size in [64, 256, 1024] {
        let mut rng = SmallRng::seed_from_u64(2);
        let a: BitMatrix = BitMatrix::random(&mut rng, size, size);
        let b = a.dot(&BitVector::random(&mut rng, size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| a.x_for(black_box(&b)).unwrap())
        });
    }
    group.finish();
}

fn rank_benchmarks(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(3);
    let m: BitMatrix<u32> = BitMatrix::random(&mut rng, 512, 512);
    c.bench_function("rank 512x512", |b| b.iter(|| black_box(&m).rank()));
}

criterion_group!(benches, copy_benchmarks, solve_benchmarks, rank_benchmarks);
criterion_main!(benches);
