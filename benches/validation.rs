use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use form_throttle::{sanitize, validate, CallPolicy, FieldKind, SystemClock, ThrottleWindow, Throttler};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Benchmark the per-field rules
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    let cases = [
        ("name", FieldKind::Name, "Ada Lovelace"),
        ("email", FieldKind::Email, "ada.lovelace@example.com"),
        ("message", FieldKind::Message, "I would like to hear more about the audit."),
        ("other", FieldKind::Other("company".to_string()), "Analytical Engines Ltd"),
    ];

    for (label, kind, value) in cases.iter() {
        group.bench_with_input(BenchmarkId::new("validate", label), value, |b, value| {
            b.iter(|| validate(black_box(kind), black_box(value)))
        });
    }

    group.bench_function("invalid_email", |b| {
        b.iter(|| validate(black_box(&FieldKind::Email), black_box("not an email@")))
    });

    group.finish();
}

/// Benchmark input cleaning on growing inputs
fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    for size in [16usize, 256, 4096] {
        let input = "<p>hello</p> ".repeat(size / 13 + 1);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| sanitize(black_box(input)))
        });
    }

    group.finish();
}

/// Benchmark the throttle decision on the scroll hot path
fn bench_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("throttle");

    group.bench_function("window_decision", |b| {
        let mut window = ThrottleWindow::new(Duration::from_millis(100));
        let now = Instant::now();
        b.iter(|| window.register_call(black_box(now)))
    });

    group.bench_function("throttler_call", |b| {
        let throttled = Throttler::new(
            |y: f64| {
                black_box(y);
            },
            Duration::from_millis(100),
            Arc::new(SystemClock::new()),
        );
        b.iter(|| throttled.call(black_box(240.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_validation, bench_sanitize, bench_throttle);
criterion_main!(benches);
