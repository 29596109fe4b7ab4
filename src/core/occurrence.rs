//! One routed log occurrence and the identity that raised it

use super::error::{LoggerError, Result};
use super::format::FormatOptions;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::target::Target;
use chrono::{DateTime, Local};
use std::fmt;

/// Identity of the component that owns a logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    name: String,
    created_at: DateTime<Local>,
}

impl Issuer {
    /// Create an issuer; the name must not be blank
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LoggerError::invalid_argument(
                "issuer",
                "issuer name must not be empty",
            ));
        }
        Ok(Self {
            name,
            created_at: Local::now(),
        })
    }

    /// Issuer named after a Rust type
    pub fn of<T: ?Sized>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            created_at: Local::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Issuer: {}", self.name)
    }
}

/// Immutable record handed to every sink for one log call
#[derive(Debug, Clone)]
pub struct LogOccurrence {
    pub level: LogLevel,
    pub target: Target,
    pub entry: LogEntry,
    /// Name of the issuing component
    pub class_name: String,
    /// Wall-clock time captured at construction
    pub timestamp: DateTime<Local>,
}

impl LogOccurrence {
    pub fn new(
        class_name: impl Into<String>,
        level: LogLevel,
        target: Target,
        entry: LogEntry,
    ) -> Self {
        Self {
            level,
            target,
            entry,
            class_name: class_name.into(),
            timestamp: Local::now(),
        }
    }

    /// Code carried by the entry, zero when none was assigned
    pub fn code(&self) -> i32 {
        self.entry.code.unwrap_or(0)
    }

    /// Render with explicit options
    pub fn format(&self, options: &FormatOptions) -> String {
        options.render(self)
    }

    /// Single-line, detail-compact rendering used by the console sink
    pub fn to_inline_string(&self) -> String {
        self.format(&FormatOptions::console())
    }

    /// Multi-line, full-detail rendering used by the file sink
    pub fn to_verbose_string(&self) -> String {
        self.format(&FormatOptions::verbose())
    }
}

impl fmt::Display for LogOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatOptions::default()))
    }
}
