//! Platform event log sink
//!
//! The operating-system event log is reached through an [`EventLogBackend`].
//! No backend ships for any platform; [`MemoryEventLog`] records events in
//! process for tests and embedding.

use crate::core::{
    FormatOptions, LogLevel, LogOccurrence, LoggerError, Result, Sink, SinkKind, SinkStatus,
    TargetConfig,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Severity taxonomy of the event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSeverity {
    Information,
    Warning,
    Error,
    FailureAudit,
}

impl EventSeverity {
    /// Map a log level onto the event log's own severities
    pub fn from_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Warning => EventSeverity::Warning,
            LogLevel::Error => EventSeverity::FailureAudit,
            LogLevel::Critical => EventSeverity::Error,
            _ => EventSeverity::Information,
        }
    }
}

impl fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventSeverity::Information => "Information",
            EventSeverity::Warning => "Warning",
            EventSeverity::Error => "Error",
            EventSeverity::FailureAudit => "FailureAudit",
        };
        f.write_str(name)
    }
}

/// One event as handed to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub source: String,
    pub log: String,
    pub message: String,
    pub severity: EventSeverity,
    pub code: i32,
}

/// Platform collaborator for the event log
pub trait EventLogBackend: Send + Sync {
    fn source_exists(&self, source: &str) -> Result<bool>;
    fn create_source(&self, source: &str, log: &str) -> Result<()>;
    fn write_entry(&self, record: EventRecord) -> Result<()>;
}

impl<B: EventLogBackend + ?Sized> EventLogBackend for Arc<B> {
    fn source_exists(&self, source: &str) -> Result<bool> {
        (**self).source_exists(source)
    }

    fn create_source(&self, source: &str, log: &str) -> Result<()> {
        (**self).create_source(source, log)
    }

    fn write_entry(&self, record: EventRecord) -> Result<()> {
        (**self).write_entry(record)
    }
}

#[derive(Debug, Default)]
struct MemoryEventLogState {
    /// source -> log it was registered under
    sources: HashMap<String, String>,
    records: Vec<EventRecord>,
}

/// In-process event log
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    state: Arc<Mutex<MemoryEventLogState>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.state.lock().records.clone()
    }

    /// Log a source was registered under, if it exists
    pub fn source_log(&self, source: &str) -> Option<String> {
        self.state.lock().sources.get(source).cloned()
    }
}

impl EventLogBackend for MemoryEventLog {
    fn source_exists(&self, source: &str) -> Result<bool> {
        Ok(self.state.lock().sources.contains_key(source))
    }

    fn create_source(&self, source: &str, log: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.sources.contains_key(source) {
            return Err(LoggerError::event_log(source, "source already exists"));
        }
        state.sources.insert(source.to_string(), log.to_string());
        Ok(())
    }

    fn write_entry(&self, record: EventRecord) -> Result<()> {
        let mut state = self.state.lock();
        if !state.sources.contains_key(&record.source) {
            return Err(LoggerError::event_log(&record.source, "source is not registered"));
        }
        state.records.push(record);
        Ok(())
    }
}

/// Sink writing occurrences to an [`EventLogBackend`]
pub struct EventLogSink<B> {
    backend: B,
}

impl<B: EventLogBackend> EventLogSink<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: EventLogBackend> Sink for EventLogSink<B> {
    fn write(&self, occurrence: &LogOccurrence, config: Option<&TargetConfig>) -> Result<SinkStatus> {
        let Some(settings) = config.and_then(|c| c.event_log.as_ref()) else {
            return Ok(SinkStatus::Skipped);
        };

        let log = settings.resolve_log(occurrence.entry.section.as_deref());
        if !self.backend.source_exists(&settings.source)? {
            self.backend.create_source(&settings.source, log)?;
        }

        let message = FormatOptions::with_details(settings.log_details).render(occurrence);
        self.backend.write_entry(EventRecord {
            source: settings.source.clone(),
            log: log.to_string(),
            message,
            severity: EventSeverity::from_level(occurrence.level),
            code: occurrence.code(),
        })?;

        Ok(SinkStatus::Written)
    }

    fn kind(&self) -> SinkKind {
        SinkKind::EventLog
    }
}
