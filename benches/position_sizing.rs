//! Benchmarks for position sizing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fx_risk::sizing::{PositionSizingEngine, TradeRequest};
use rust_decimal_macros::dec;

fn benchmark_eurusd(c: &mut Criterion) {
    let engine = PositionSizingEngine::new();
    let request = TradeRequest::new(dec!(10000), dec!(0.5), dec!(1.1650), dec!(1.1600), "EURUSD");

    c.bench_function("calculate_eurusd", |b| {
        b.iter(|| engine.calculate(black_box(&request)))
    });
}

fn benchmark_unlisted_cross(c: &mut Criterion) {
    let engine = PositionSizingEngine::new();
    let request = TradeRequest::new(dec!(10000), dec!(0.5), dec!(11.80), dec!(11.70), "chf/sek");

    c.bench_function("calculate_unlisted_cross", |b| {
        b.iter(|| engine.calculate(black_box(&request)))
    });
}

criterion_group!(benches, benchmark_eurusd, benchmark_unlisted_cross);
criterion_main!(benches);
