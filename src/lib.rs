//! # Routed Logger
//!
//! A structured logging core that routes typed log entries to per-level
//! destination sets and fans each entry out to callbacks, the console, a
//! file and an optional platform event log.
//!
//! ## Features
//!
//! - **Per-level routing**: a [`TargetMap`] picks the destinations for each level
//! - **Per-level sink settings**: a [`TargetConfigRegistry`] holds callbacks,
//!   file and event log settings keyed by level
//! - **Isolated fan-out**: one broken sink never silences the others
//! - **Code ranges**: every level owns a contiguous block of numeric codes
//!
//! ```
//! use routed_logger::prelude::*;
//!
//! let logger = Logger::new("inventory").unwrap();
//! logger.info("service started");
//! logger.error_with("disk nearly full", 12, Some("storage"));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        assign_code, CallbackList, CallbackMode, CodeRange, DataChange, DispatchMetrics,
        DispatchReport, Dispatcher, EventLogConfig, FileConfig, FormatOptions, Issuer,
        LogCallback, LogEntry, LogLevel, LogOccurrence, Logger, LoggerBuilder, LoggerDefaults,
        LoggerError, Result, Sink, SinkKind, SinkStatus, Target, TargetConfig,
        TargetConfigRegistry, TargetMap, TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemoryEventLog, SharedBuffer, TextEncoding};
}

pub use crate::core::{
    assign_code, CallbackList, CallbackMode, CodeRange, DataChange, DispatchMetrics,
    DispatchReport, Dispatcher, EntryKind, EventLogConfig, FileConfig, FormatOptions, Issuer,
    LogCallback, LogEntry, LogLevel, LogOccurrence, Logger, LoggerBuilder, LoggerDefaults,
    LoggerError, Result, Sink, SinkFailure, SinkKind, SinkStatus, Target, TargetConfig,
    TargetConfigRegistry, TargetMap, TimestampFormat,
};
pub use crate::sinks::{
    ConsoleSink, EventLogBackend, EventLogSink, EventRecord, EventSeverity, FileSink,
    MemoryEventLog, SharedBuffer, TextEncoding,
};
