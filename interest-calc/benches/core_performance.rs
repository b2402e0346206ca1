use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use interest_calc::core::engine::{compound_with, simple};
use interest_calc::{Calculator, FormatOptions, Frequency, SlidingWindowLimiter, calculate};
use std::hint::black_box;
use std::time::{Duration, SystemTime};

fn benchmark_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sliding_window_limiter");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("single_client_allowed", |b| {
        let mut limiter = SlidingWindowLimiter::builder()
            .limit(1_000_000)
            .window(Duration::from_millis(1))
            .build();

        b.iter(|| {
            let decision = limiter.check(black_box("198.51.100.1"), black_box(SystemTime::now()));
            black_box(decision.allowed)
        });
    });

    group.bench_function("single_client_saturated", |b| {
        let mut limiter = SlidingWindowLimiter::new();
        let now = SystemTime::now();
        for _ in 0..30 {
            limiter.check("198.51.100.1", now);
        }

        b.iter(|| {
            let decision = limiter.check(black_box("198.51.100.1"), black_box(now));
            black_box(decision.allowed)
        });
    });

    // Rotating clients to simulate real traffic
    group.bench_function("rotating_clients_1000", |b| {
        let mut limiter = SlidingWindowLimiter::builder().capacity(1000).build();
        let mut counter = 0u64;

        b.iter(|| {
            let client = format!("10.0.{}.{}", (counter / 256) % 4, counter % 256);
            counter += 1;

            let decision = limiter.check(black_box(&client), black_box(SystemTime::now()));
            black_box(decision.allowed)
        });
    });

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("interest_engine");
    group.throughput(Throughput::Elements(1));

    group.bench_function("simple", |b| {
        b.iter(|| black_box(simple(black_box(1000.0), black_box(5.0), black_box(2.0))));
    });

    for frequency in Frequency::ALL {
        group.bench_function(format!("compound_{}", frequency.as_str()), |b| {
            b.iter(|| {
                black_box(compound_with(
                    black_box(1000.0),
                    black_box(5.0),
                    black_box(30.0),
                    frequency,
                ))
            });
        });
    }

    group.finish();
}

fn benchmark_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("request");
    group.throughput(Throughput::Elements(1));

    let fields = [
        ("principal", "1,250,000"),
        ("rate", "7.25"),
        ("time", "180"),
        ("time_unit", "Months"),
        ("interest_type", "compound"),
        ("frequency", "Quarterly"),
    ];

    group.bench_function("calculate", |b| {
        let options = FormatOptions::default();
        b.iter(|| black_box(calculate(black_box(&fields), &options)));
    });

    group.bench_function("calculator_handle", |b| {
        let mut calculator = Calculator::new(
            SlidingWindowLimiter::builder()
                .limit(usize::MAX)
                .window(Duration::from_millis(1))
                .build(),
        );
        b.iter(|| {
            black_box(calculator.handle(
                black_box("198.51.100.1"),
                black_box(&fields),
                SystemTime::now(),
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_limiter, benchmark_engine, benchmark_request);
criterion_main!(benches);
