//! Sink trait for log output destinations

use super::{error::Result, occurrence::LogOccurrence, target::Target, target_config::TargetConfig};
use std::fmt;

/// Destination kinds, one per [`Target`] bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Callback,
    CallbackAsync,
    Console,
    EventLog,
    File,
}

impl SinkKind {
    /// The target bit that selects this sink
    pub fn target(&self) -> Target {
        match self {
            SinkKind::Callback => Target::CALLBACK,
            SinkKind::CallbackAsync => Target::CALLBACK_ASYNC,
            SinkKind::Console => Target::CONSOLE,
            SinkKind::EventLog => Target::EVENT_LOG,
            SinkKind::File => Target::FILE,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            SinkKind::Callback => "callback",
            SinkKind::CallbackAsync => "callback_async",
            SinkKind::Console => "console",
            SinkKind::EventLog => "event_log",
            SinkKind::File => "file",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Whether a sink actually wrote anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    Written,
    /// The level has no settings for this sink
    Skipped,
}

/// Write contract for console, file and event log destinations
///
/// `config` is the level's [`TargetConfig`], absent when none is registered.
pub trait Sink: Send + Sync {
    fn write(&self, occurrence: &LogOccurrence, config: Option<&TargetConfig>) -> Result<SinkStatus>;
    fn kind(&self) -> SinkKind;
}
