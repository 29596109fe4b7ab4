//! Sink implementations

pub mod console;
pub mod encoding;
pub mod event_log;
pub mod file;

pub use console::{ConsoleSink, SharedBuffer};
pub use encoding::TextEncoding;
pub use event_log::{EventLogBackend, EventLogSink, EventRecord, EventSeverity, MemoryEventLog};
pub use file::FileSink;

pub use crate::core::Sink;
