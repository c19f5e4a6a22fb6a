//! Statistics and input generation benchmarks
//!
//! Run: cargo bench -p npu-bench --bench stats_bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use npu_bench::LatencyStats;
use npu_bench::config::INPUT_SHAPE;
use npu_runtime::InputTensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_latency_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_stats");
    let mut rng = StdRng::seed_from_u64(0);

    for size in [20usize, 1_000, 100_000] {
        let samples: Vec<f64> = (0..size).map(|_| rng.gen_range(5.0..50.0)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| LatencyStats::from_samples(black_box(samples)));
        });
    }

    group.finish();
}

fn bench_input_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_tensor");
    group.throughput(Throughput::Bytes(INPUT_SHAPE.len() as u64));
    group.bench_function("random_640x640x3", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| InputTensor::random(black_box(INPUT_SHAPE), &mut rng));
    });
    group.finish();
}

criterion_group!(benches, bench_latency_stats, bench_input_generation);
criterion_main!(benches);
