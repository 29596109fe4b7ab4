//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and routes the message
//! at its level to the level's mapped target. The macros evaluate to the
//! [`DispatchReport`](crate::DispatchReport) of the call.
//!
//! # Examples
//!
//! ```
//! use routed_logger::prelude::*;
//! use routed_logger::info;
//!
//! let logger = Logger::new("server").unwrap();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use routed_logger::prelude::*;
/// # let logger = Logger::new("docs").unwrap();
/// use routed_logger::log;
/// log!(logger, LogLevel::Information, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an information-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use routed_logger::prelude::*;
/// # let logger = Logger::new("docs").unwrap();
/// use routed_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// ```
/// # use routed_logger::prelude::*;
/// # let logger = Logger::new("docs").unwrap();
/// use routed_logger::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}
