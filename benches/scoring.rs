//! Benchmarks for anomaly scoring, detection and correlation.

use anofox_anomaly::core::TimeSeries;
use anofox_anomaly::correlation::CrossCorrelator;
use anofox_anomaly::detection::Detector;
use anofox_anomaly::scoring::{BitmapScorer, DerivativeScorer, EmaScorer, Scorer, WeightedSumScorer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_sine(n: usize, period: usize) -> TimeSeries {
    let timestamps: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let values: Vec<f64> = (0..n)
        .map(|i| {
            let base = (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin() * 10.0;
            if i % 500 == 250 {
                base + 60.0
            } else {
                base
            }
        })
        .collect();
    TimeSeries::new(timestamps, values).unwrap()
}

fn bench_scorers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scorers");

    for size in [2048, 4096, 8192].iter() {
        let series = generate_sine(*size, 48);

        group.bench_with_input(BenchmarkId::new("bitmap", size), size, |b, _| {
            let scorer = BitmapScorer::new();
            b.iter(|| scorer.score(black_box(&series)))
        });

        group.bench_with_input(BenchmarkId::new("ema", size), size, |b, _| {
            let scorer = EmaScorer::new();
            b.iter(|| scorer.score(black_box(&series)))
        });

        group.bench_with_input(BenchmarkId::new("derivative", size), size, |b, _| {
            let scorer = DerivativeScorer::new();
            b.iter(|| scorer.score(black_box(&series)))
        });

        group.bench_with_input(BenchmarkId::new("weighted_sum", size), size, |b, _| {
            let scorer = WeightedSumScorer::new();
            b.iter(|| scorer.score(black_box(&series)))
        });
    }

    group.finish();
}

fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector");

    for size in [2048, 8192].iter() {
        let series = generate_sine(*size, 48);

        group.bench_with_input(BenchmarkId::new("anomalies", size), size, |b, _| {
            let detector = Detector::new().with_threshold(3.0);
            b.iter(|| detector.anomalies(black_box(&series)))
        });
    }

    group.finish();
}

fn bench_cross_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_correlation");

    for size in [256, 1024, 4096].iter() {
        let current = generate_sine(*size, 48);
        let target = generate_sine(*size, 52);

        group.bench_with_input(BenchmarkId::new("run", size), size, |b, _| {
            let correlator = CrossCorrelator::new().with_max_shift(30.0);
            b.iter(|| correlator.run(black_box(&current), black_box(&target)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scorers,
    bench_detector,
    bench_cross_correlation
);
criterion_main!(benches);
