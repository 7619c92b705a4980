//! Blocked matrix multiplication benchmark comparison.
//!
//! Compares the naive kernel, the vectorized kernel on the native and the
//! scalar backend, and ndarray's `dot` across different block grid sizes.
//!
//! # Usage:
//! ```bash
//! # Run all matrix multiplication benchmarks
//! cargo bench --bench matmul
//!
//! # Run a single grid size
//! cargo bench --bench matmul -- matmul_32x32_blocks
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use blockmul::multiply::{naive, vectorized};
use blockmul::simd::scalar;
use blockmul::{BlockedMatrix, BLOCK_SIZE};

fn bench_matmul_by_size(c: &mut Criterion) {
    let grids = [4, 16, 32, 64];

    for blocks in grids {
        let group_name = format!("matmul_{blocks}x{blocks}_blocks");
        let mut group = c.benchmark_group(&group_name);
        group.sample_size(20);

        let n = (blocks * BLOCK_SIZE) as u64;
        group.throughput(Throughput::Elements(2 * n * n * n));

        let mut rng = StdRng::seed_from_u64(42);
        let a: BlockedMatrix = BlockedMatrix::random(blocks, blocks, &mut rng).unwrap();
        let b: BlockedMatrix = BlockedMatrix::random(blocks, blocks, &mut rng).unwrap();
        let a_ndarray = a.to_array();
        let b_ndarray = b.to_array();

        group.bench_function(BenchmarkId::new("naive", blocks), |bench| {
            bench.iter(|| naive::multiply(black_box(&a), black_box(&b)).unwrap())
        });

        group.bench_function(BenchmarkId::new("vectorized", blocks), |bench| {
            bench.iter(|| vectorized::multiply(black_box(&a), black_box(&b)).unwrap())
        });

        group.bench_function(BenchmarkId::new("vectorized_scalar", blocks), |bench| {
            bench.iter(|| {
                vectorized::multiply_with::<scalar::F32x8, BLOCK_SIZE>(black_box(&a), black_box(&b))
                    .unwrap()
            })
        });

        group.bench_function(BenchmarkId::new("ndarray", blocks), |bench| {
            bench.iter(|| black_box(&a_ndarray).dot(black_box(&b_ndarray)))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_matmul_by_size);
criterion_main!(benches);
