//! Benchmarks for the hot kernels: dense matmul, closure, sparse matvec.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tropal::prelude::*;

fn random_matrix(rng: &mut StdRng, n: usize, density: f64) -> Matrix {
    let mut m = Matrix::zeros(n, n, Semiring::MaxPlus).unwrap();
    for i in 0..n {
        for j in 0..n {
            if rng.gen_bool(density) {
                m.set(i, j, rng.gen_range(-100..=100));
            }
        }
    }
    m
}

fn bench_dense_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_matmul");
    let mut rng = StdRng::seed_from_u64(1);
    for n in [64, 128, 256] {
        let a = random_matrix(&mut rng, n, 0.8);
        let b = random_matrix(&mut rng, n, 0.8);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(a.matmul(&b, Semiring::MaxPlus).unwrap()));
        });
    }
    group.finish();
}

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");
    let mut rng = StdRng::seed_from_u64(2);
    for n in [32, 64, 128] {
        let a = random_matrix(&mut rng, n, 0.2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(a.closure(Semiring::MinPlus).unwrap()));
        });
    }
    group.finish();
}

fn bench_sparse_matvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_matvec");
    let mut rng = StdRng::seed_from_u64(3);
    for n in [256, 1024] {
        let dense = random_matrix(&mut rng, n, 0.05);
        let sparse = SparseMatrix::from_dense(&dense, Semiring::MaxPlus).unwrap();
        let x: Vec<Val> = (0..n).map(|_| rng.gen_range(-100..=100)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(sparse.matvec(&x).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dense_matmul, bench_closure, bench_sparse_matvec);
criterion_main!(benches);
