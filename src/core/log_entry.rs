//! Log entry payloads
//!
//! A [`LogEntry`] is the routing-independent content of one log call.
//! [`LogEntry::exception`] and [`LogEntry::data`] build the two
//! specialized shapes, tagged through [`EntryKind`].

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Section assigned to entries built from an error value
pub const EXCEPTION_SECTION: &str = "Exception";

/// Section assigned to entries built from a data payload
pub const DATA_SECTION: &str = "Data";

const DATA_SEPARATOR: &str = "|||";
const DATA_SEPARATOR_REPLACEMENT: &str = "___";

/// What happened to the payload of a data entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataChange {
    Added,
    Changed,
    Error,
    Removed,
    #[default]
    Unknown,
}

impl DataChange {
    pub fn to_str(&self) -> &'static str {
        match self {
            DataChange::Added => "Added",
            DataChange::Changed => "Changed",
            DataChange::Error => "Error",
            DataChange::Removed => "Removed",
            DataChange::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DataChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Shape of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryKind {
    Plain,
    Exception {
        /// Type name of the captured error
        error_type: String,
    },
    Data {
        change: DataChange,
        #[serde(skip_serializing_if = "Option::is_none")]
        editor: Option<String>,
        /// The payload as structured JSON
        payload: serde_json::Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// `None` lets the logger assign the level's default code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub kind: EntryKind,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            section: None,
            code: None,
            comment: None,
            kind: EntryKind::Plain,
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Build an entry describing an error value
    ///
    /// The message is the error's display text; the comment records the
    /// error's static type as its origin followed by the chain of sources.
    /// Behind `dyn Error` the static type names no origin; use
    /// [`exception_with_origin`](Self::exception_with_origin) there.
    pub fn exception<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        Self::exception_with_origin(error, std::any::type_name::<E>())
    }

    /// Like [`exception`](Self::exception) with a caller-named origin
    pub fn exception_with_origin<E>(error: &E, origin: impl Into<String>) -> Self
    where
        E: StdError + ?Sized,
    {
        let error_type = origin.into();

        let mut trace = String::new();
        let mut source = error.source();
        let mut depth = 0;
        while let Some(cause) = source {
            trace.push_str(&format!("\n  {}: {}", depth, cause));
            source = cause.source();
            depth += 1;
        }

        let comment = format!("Source: {}\nTrace:{}", error_type, trace);

        Self {
            message: error.to_string(),
            section: Some(EXCEPTION_SECTION.to_string()),
            code: None,
            comment: Some(comment),
            kind: EntryKind::Exception { error_type },
        }
    }

    /// Build an entry describing a change to a structured payload
    ///
    /// The message is the payload pretty-printed as JSON; the comment is the
    /// change kind, prefixed by `editor|||` when an editor is given.
    pub fn data<T>(payload: &T, change: DataChange, editor: Option<&str>) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(payload)?;
        if value.is_null() {
            return Err(LoggerError::invalid_argument(
                "payload",
                "data entries require a non-null payload",
            ));
        }
        let message = serde_json::to_string_pretty(&value)?;

        let editor = editor
            .filter(|e| !e.is_empty())
            .map(|e| e.replace(DATA_SEPARATOR, DATA_SEPARATOR_REPLACEMENT));
        let change_text = change
            .to_str()
            .replace(DATA_SEPARATOR, DATA_SEPARATOR_REPLACEMENT);
        let comment = match &editor {
            Some(name) => format!("{}{}{}", name, DATA_SEPARATOR, change_text),
            None => change_text,
        };

        Ok(Self {
            message,
            section: Some(DATA_SECTION.to_string()),
            code: None,
            comment: Some(comment),
            kind: EntryKind::Data {
                change,
                editor,
                payload: value,
            },
        })
    }

    /// Section text, empty when unset
    pub fn section_str(&self) -> &str {
        self.section.as_deref().unwrap_or("")
    }

    pub fn is_exception(&self) -> bool {
        matches!(self.kind, EntryKind::Exception { .. })
    }

    pub fn is_data(&self) -> bool {
        matches!(self.kind, EntryKind::Data { .. })
    }
}

impl From<&str> for LogEntry {
    fn from(message: &str) -> Self {
        LogEntry::new(message)
    }
}

impl From<String> for LogEntry {
    fn from(message: String) -> Self {
        LogEntry::new(message)
    }
}
