//! File logging example
//!
//! Demonstrates routing levels to both the console and per-level files.
//!
//! Run with: cargo run --example file_logging

use routed_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Routed Logger - File Logging Example ===\n");

    let logger = Logger::builder()
        .issuer("application")
        .target(LogLevel::Information, Target::CONSOLE_AND_FILE)
        .target(LogLevel::Warning, Target::CONSOLE_AND_FILE)
        .target(LogLevel::Error, Target::CONSOLE_AND_FILE)
        .target_config(
            TargetConfig::new(LogLevel::Information).with_file(FileConfig::new("application.log")),
        )
        .target_config(
            TargetConfig::new(LogLevel::Warning).with_file(FileConfig::new("application.log")),
        )
        // Errors get their own file, rewritten on every call and marked with a BOM
        .target_config(
            TargetConfig::new(LogLevel::Error).with_file(
                FileConfig::new("last_error.log")
                    .with_append(false)
                    .with_encoding(TextEncoding::Utf8Bom),
            ),
        )
        .build()?;

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error_with("Failed to load optional plugin", 3, Some("plugins"));

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }

    let report = logger.info("All operations completed");
    if !report.is_clean() {
        for failure in &report.failures {
            eprintln!("{} sink failed: {}", failure.sink, failure.error);
        }
    }

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'last_error.log' for the file output");

    Ok(())
}
