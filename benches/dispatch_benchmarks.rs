//! Criterion benchmarks for routed_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use routed_logger::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn buffered_logger(buffer: &SharedBuffer) -> Logger {
    Logger::builder()
        .issuer("bench")
        .console_sink(ConsoleSink::with_writer(buffer.clone()))
        .diagnostics(false)
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Code Assignment Benchmarks
// ============================================================================

fn bench_code_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("code_assignment");
    group.throughput(Throughput::Elements(1));

    let range = CodeRange::for_level(LogLevel::Error);

    group.bench_function("in_range", |b| {
        b.iter(|| range.assign(black_box(4321)));
    });

    group.bench_function("offset", |b| {
        b.iter(|| range.assign(black_box(21)));
    });

    group.bench_function("fallback", |b| {
        b.iter(|| range.assign(black_box(-7)));
    });

    group.finish();
}

// ============================================================================
// Console Dispatch Benchmarks
// ============================================================================

fn bench_console_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("console_dispatch");
    group.throughput(Throughput::Elements(1));

    let buffer = SharedBuffer::new();
    let logger = buffered_logger(&buffer);

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Console message"));
            buffer.clear();
        });
    });

    group.bench_function("error_with_section", |b| {
        b.iter(|| {
            logger.error_with(black_box("Console message"), 12, Some("storage"));
            buffer.clear();
        });
    });

    group.bench_function("multiline_message", |b| {
        b.iter(|| {
            logger.warn(black_box("first line\nsecond line\r\nthird line"));
            buffer.clear();
        });
    });

    group.bench_function("target_none", |b| {
        b.iter(|| logger.trace(black_box("Dropped message")));
    });

    group.finish();
}

// ============================================================================
// Callback Fan-out Benchmarks
// ============================================================================

fn bench_callback_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("callback_fanout");
    group.throughput(Throughput::Elements(1));

    for count in [1usize, 4, 16] {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut config = TargetConfig::new(LogLevel::Information);
        for _ in 0..count {
            let calls = Arc::clone(&calls);
            config = config.with_callback(LogCallback::sync(move |_, _| {
                calls.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }));
        }

        let logger = Logger::builder()
            .issuer("bench")
            .target(LogLevel::Information, Target::CALLBACK)
            .target_config(config)
            .build()
            .expect("Failed to build logger");

        group.bench_function(format!("sync_{}", count), |b| {
            b.iter(|| logger.info(black_box("Callback message")));
        });
    }

    group.finish();
}

// ============================================================================
// Entry Construction Benchmarks
// ============================================================================

fn bench_entry_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_creation");

    group.bench_function("plain", |b| {
        b.iter(|| {
            LogEntry::new(black_box("message"))
                .with_section("net")
                .with_code(7)
        });
    });

    group.bench_function("exception", |b| {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        b.iter(|| LogEntry::exception(black_box(&err)));
    });

    group.bench_function("data", |b| {
        let payload = serde_json::json!({ "sku": "A1", "qty": 3 });
        b.iter(|| LogEntry::data(black_box(&payload), DataChange::Changed, Some("ops")));
    });

    group.finish();
}

// ============================================================================
// Concurrent Dispatch Benchmarks
// ============================================================================

fn bench_concurrent_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_dispatch");

    let buffer = SharedBuffer::new();
    let logger = Arc::new(buffered_logger(&buffer));

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
            buffer.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_code_assignment,
    bench_console_dispatch,
    bench_callback_fanout,
    bench_entry_creation,
    bench_concurrent_dispatch
);

criterion_main!(benches);
