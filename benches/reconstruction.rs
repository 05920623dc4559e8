//! Benchmarks for seasonal reconstruction and full predictions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use precip_forecast::core::{MonthName, Observation};
use precip_forecast::models::Predictor;
use precip_forecast::seasonality::SeasonalReconstructor;
use precip_forecast::transform::{robust_weighted_mean, WinsorLimits};

fn generate_monthly(years: usize) -> Vec<f64> {
    (0..years * 12)
        .map(|i| {
            100.0
                + 80.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin()
                + 15.0 * ((i * 7919) % 13) as f64 / 13.0
        })
        .collect()
}

fn generate_station(years: usize) -> Vec<Observation> {
    let series = generate_monthly(years);
    series
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            MonthName::from_index(i % 12)
                .map(|m| Observation::new(m.name(), 1980 + (i / 12) as i32, Some(*v), "Pilar"))
        })
        .collect()
}

fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("seasonal_reconstruction");
    let reconstructor = SeasonalReconstructor::default();

    for years in [2, 10, 30, 60].iter() {
        let series = generate_monthly(*years);

        group.bench_with_input(BenchmarkId::new("reconstruct", years), years, |b, _| {
            b.iter(|| reconstructor.reconstruct(black_box(&series)))
        });

        group.bench_with_input(BenchmarkId::new("estimate", years), years, |b, _| {
            b.iter(|| reconstructor.estimate(black_box(&series), MonthName::Abril))
        });
    }

    group.finish();
}

fn bench_robust_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("robust_mean");
    let limits = WinsorLimits::default();

    for size in [5, 50, 500].iter() {
        let values = generate_monthly(*size / 12 + 1);
        let values = &values[..*size];
        let weights: Vec<f64> = (0..*size).map(|i| if i < 5 { 2.0 } else { 1.0 }).collect();

        group.bench_with_input(BenchmarkId::new("weighted", size), size, |b, _| {
            b.iter(|| robust_weighted_mean(black_box(values), Some(&weights), &limits))
        });
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    let predictor = Predictor::default();

    for years in [5, 20, 40].iter() {
        let data = generate_station(*years);
        let target = 1980 + *years as i32;

        group.bench_with_input(BenchmarkId::new("blend", years), years, |b, _| {
            b.iter(|| predictor.predict(black_box(&data), "Abril", target, "Pilar"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconstruction, bench_robust_mean, bench_predict);
criterion_main!(benches);
