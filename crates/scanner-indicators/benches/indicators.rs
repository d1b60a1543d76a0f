//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanner_core::traits::Indicator;
use scanner_indicators::{Ema, Rsi, Sma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [500, 5000, 50000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("window", size), &data, |b, data| {
            let sma = Sma::new(14);
            b.iter(|| sma.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [500, 5000, 50000].iter() {
        let data = generate_test_data(*size);

        for span in [20, 50] {
            group.bench_with_input(BenchmarkId::new(format!("span{}", span), size), &data, |b, data| {
                let ema = Ema::new(span);
                b.iter(|| ema.calculate(black_box(data)))
            });
        }
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [500, 5000, 50000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sma, benchmark_ema, benchmark_rsi);
criterion_main!(benches);
