//! Performance benchmarks for trimode-kernels
//!
//! Run with: cargo bench -p trimode-kernels
//!
//! Benchmarks cover:
//! - Mode-n product along each mode
//! - Core projection (direct six-fold sum vs sequential mode products)
//! - Multilinear reconstruction
//! - Column orthonormalisation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scirs2_core::ndarray_ext::Array2;
use std::hint::black_box;
use trimode_core::{Mode, Tensor3};
use trimode_kernels::*;

fn sample(shape: [usize; 3]) -> Tensor3<f64> {
    Tensor3::from_fn(shape, |i, j, k| ((i * 31 + j * 17 + k * 7) % 23) as f64 / 23.0)
}

fn basis(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| if i == j { 1.0 } else { 0.0 })
}

fn bench_mode_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("mode_product");

    for &size in [10, 20, 40].iter() {
        let tensor = sample([size, size, size]);
        let rank = size / 2;
        let matrix = basis(size, rank);
        group.throughput(Throughput::Elements((size * size * size * rank) as u64));

        for mode in Mode::ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                &size,
                |bencher, _| {
                    bencher.iter(|| {
                        black_box(mode_product_transposed(&tensor, &matrix.view(), mode).unwrap())
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_core");

    for &size in [8, 16, 24].iter() {
        let tensor = sample([size, size, size]);
        let rank = size / 2;
        let factors = [basis(size, rank), basis(size, rank), basis(size, rank)];

        group.bench_with_input(BenchmarkId::new("direct", size), &size, |bencher, _| {
            bencher.iter(|| black_box(project_core_direct(&tensor, &factors).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bencher, _| {
            bencher.iter(|| black_box(project_core(&tensor, &factors).unwrap()));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bencher, _| {
            bencher.iter(|| black_box(project_core_direct_parallel(&tensor, &factors).unwrap()));
        });
    }
    group.finish();
}

fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("multilinear_product");

    for &(size, rank) in [(20, 5), (40, 10), (60, 15)].iter() {
        let core = sample([rank, rank, rank]);
        let factors = [basis(size, rank), basis(size, rank), basis(size, rank)];
        group.throughput(Throughput::Elements((size * size * size) as u64));

        group.bench_with_input(
            BenchmarkId::new("reconstruct", format!("{}_r{}", size, rank)),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(multilinear_product(&core, &factors).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_orthonormalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("orthonormalize_columns");

    for &size in [16, 64, 128].iter() {
        let matrix = Array2::from_shape_fn((size, size / 2), |(i, j)| {
            ((i * 13 + j * 7) % 19) as f64 - 9.0
        });
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| black_box(orthonormalize_columns(&matrix.view()).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_mode_product,
    bench_projection,
    bench_reconstruction,
    bench_orthonormalize
);
criterion_main!(benches);
