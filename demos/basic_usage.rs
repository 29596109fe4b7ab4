//! Basic logger usage example
//!
//! Demonstrates per-level routing, code ranges and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use routed_logger::prelude::*;
use routed_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Routed Logger - Basic Usage Example ===\n");

    // Trace is routed nowhere by default; every other level goes to the console
    let mut logger = Logger::new("inventory")?;

    println!("1. Logging at different levels:");
    logger.trace("This trace message is routed nowhere");
    logger.debug("This is a debug message");
    logger.info("This is an information message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Codes and sections:");
    // 12 is an offset into Error's range, so the code becomes 4012
    logger.error_with("Disk nearly full", 12, Some("storage"));
    // Already inside Warning's range, kept as is
    logger.warn_with("Slow query", 3150, Some("db"));
    // Outside Information's range and not an offset, so it falls back to 2000
    logger.info_with("Unexpected code", 9999, None);

    println!("\n3. Changing the routing at runtime:");
    logger.set_target(LogLevel::Trace, Target::CONSOLE);
    logger.trace("Trace is now visible");
    logger.set_target(LogLevel::Debug, Target::NONE);
    logger.debug("Debug is now hidden");

    println!("\n4. Macros:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    warn!(logger, "Retry attempt {} of {}", 3, 5);

    println!("\n5. Exceptions:");
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    logger.log_exception(&err);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
