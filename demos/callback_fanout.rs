//! Callback fan-out example
//!
//! Demonstrates synchronous and fire-and-forget callbacks, failure isolation
//! and the in-memory event log.
//!
//! Run with: cargo run --example callback_fanout

use routed_logger::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Serialize)]
struct Order {
    id: u32,
    items: Vec<&'static str>,
}

fn main() -> Result<()> {
    println!("=== Routed Logger - Callback Fan-out Example ===\n");

    let alerts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&alerts);
    let event_log = MemoryEventLog::new();

    let logger = Logger::builder()
        .issuer("orders")
        .target(LogLevel::Information, Target::CALLBACK | Target::CONSOLE)
        .target(LogLevel::Error, Target::CALLBACK | Target::CONSOLE | Target::EVENT_LOG)
        .target_config(TargetConfig::new(LogLevel::Information).with_callback(LogCallback::sync(
            |issuer, occurrence| {
                println!("   [audit] {} -> {}", issuer, occurrence.entry.comment.as_deref().unwrap_or("-"));
                Ok(())
            },
        )))
        .target_config(
            TargetConfig::new(LogLevel::Error)
                .with_callback(LogCallback::fire_and_forget(move |_, occurrence| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    println!("   [pager] code {}", occurrence.code());
                    Ok(())
                }))
                .with_callback(LogCallback::sync(|_, _| Err(LoggerError::other("metrics endpoint unreachable"))))
                .with_event_log(EventLogConfig::new("OrderService").with_default_log("Application")),
        )
        .event_log(event_log.clone())
        .build()?;

    println!("1. Data entries reach the audit callback:");
    let order = Order {
        id: 42,
        items: vec!["widget", "gadget"],
    };
    logger.log_data(&order, DataChange::Added, Some("clerk"))?;

    println!("\n2. A failing callback does not stop the other sinks:");
    let report = logger.error_with("Payment declined", 17, Some("Payments"));
    println!(
        "   written: {:?}, detached: {}, failures: {}",
        report.written,
        report.detached,
        report.failures.len()
    );

    // Detached callbacks are never joined; give the pager a moment
    thread::sleep(Duration::from_millis(100));
    println!("   pager alerts: {}", alerts.load(Ordering::SeqCst));

    println!("\n3. Event log contents:");
    for record in event_log.records() {
        println!(
            "   [{}] {}/{} code {}",
            record.severity, record.source, record.log, record.code
        );
    }

    let metrics = logger.metrics();
    println!(
        "\n   dispatched: {}, callback failures: {}",
        metrics.dispatched(),
        metrics.callback_failures()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
