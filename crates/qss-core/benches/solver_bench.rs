//! Benchmarks for solver circuit construction, simulation and decoding
//!
//! Run with: cargo bench -p qss-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qss_adapter_sim::SimulatorBackend;
use qss_core::{Decoder, QuantumSubsetSum};
use qss_hal::Backend;

fn instances() -> Vec<(&'static str, Vec<i64>, i64)> {
    vec![
        ("n3", vec![5, 2, 1], 3),
        ("n5", vec![5, 7, 8, 9, 1], 16),
        ("n7", vec![3, 34, 4, 12, 5, 2, 9], 9),
    ]
}

/// Benchmark building the full circuit
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for (name, values, target) in instances() {
        let solver = QuantumSubsetSum::new(values, target).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &solver, |b, solver| {
            b.iter(|| black_box(solver.build().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark simulating and sampling the built circuit
fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");
    group.sample_size(10);
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

    for (name, values, target) in instances().into_iter().take(2) {
        let solver = QuantumSubsetSum::new(values, target).unwrap();
        let circuit = solver.build().unwrap();
        let backend = SimulatorBackend::new().with_seed(1);

        group.bench_with_input(BenchmarkId::from_parameter(name), &circuit, |b, circuit| {
            b.iter(|| {
                rt.block_on(async {
                    let job = backend.submit(circuit, 1024).await.unwrap();
                    black_box(backend.result(&job).await.unwrap())
                })
            });
        });
    }

    group.finish();
}

/// Benchmark decoding sampled counts
fn bench_decode(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16).unwrap();
    let backend = SimulatorBackend::new().with_seed(1);
    let counts = rt.block_on(async {
        let job = backend.submit(&solver.build().unwrap(), 8192).await.unwrap();
        backend.result(&job).await.unwrap().counts
    });

    c.bench_function("decode_exhaustive", |b| {
        let decoder = Decoder::new().with_mode(qss_core::DecodeMode::Exhaustive);
        b.iter(|| black_box(decoder.decode(solver.problem(), &counts)));
    });
}

criterion_group!(benches, bench_build, bench_execute, bench_decode);
criterion_main!(benches);
