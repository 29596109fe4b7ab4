//! Text rendering of log occurrences
//!
//! The inline variant is one line with `" - "` between fields:
//!
//! ```text
//! Timestamp: 01/08/2025 10:30:45 - ClassName: svc - Level: Error (4) - Target: Console (4) - Section: io - Code: 4000 - Message: disk full
//! ```
//!
//! The verbose variant puts one `Key: value` pair per line and the message
//! last, after a blank line.

use super::occurrence::LogOccurrence;
use super::timestamp::TimestampFormat;

const INLINE_SEPARATOR: &str = " - ";

/// Switches controlling how an occurrence is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Include the header fields; when off only the message is rendered
    pub details: bool,
    pub section: bool,
    pub code: bool,
    /// Include the entry comment when present
    pub comment: bool,
    /// Single line, embedded newlines flattened
    pub inline: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            details: true,
            section: false,
            code: false,
            comment: false,
            inline: false,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl FormatOptions {
    /// Compact single line with section and code
    pub fn console() -> Self {
        Self {
            details: true,
            section: true,
            code: true,
            comment: false,
            inline: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Full detail, one field per line
    pub fn verbose() -> Self {
        Self {
            details: true,
            section: true,
            code: true,
            comment: true,
            inline: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Header fields when `details` is set, otherwise the bare message
    pub fn with_details(details: bool) -> Self {
        Self {
            details,
            ..Self::verbose()
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn render(&self, occurrence: &LogOccurrence) -> String {
        let message = self.text(&occurrence.entry.message);
        if !self.details {
            return message;
        }

        let sep = if self.inline { INLINE_SEPARATOR } else { "\n" };
        let mut out = String::with_capacity(128 + message.len());

        out.push_str("Timestamp: ");
        out.push_str(&self.timestamp_format.format(&occurrence.timestamp));
        out.push_str(sep);

        out.push_str("ClassName: ");
        out.push_str(&occurrence.class_name);
        out.push_str(sep);

        out.push_str(&format!(
            "Level: {} ({}){}",
            occurrence.level,
            occurrence.level.as_i32(),
            sep
        ));
        out.push_str(&format!(
            "Target: {} ({}){}",
            occurrence.target,
            occurrence.target.as_u32(),
            sep
        ));

        if self.section {
            out.push_str("Section: ");
            out.push_str(occurrence.entry.section_str());
            out.push_str(sep);
        }
        if self.code {
            out.push_str(&format!("Code: {}{}", occurrence.code(), sep));
        }
        if self.comment {
            if let Some(comment) = occurrence.entry.comment.as_deref() {
                out.push_str("Comment: ");
                out.push_str(&flatten(comment));
                out.push_str(sep);
            }
        }

        if self.inline {
            out.push_str("Message: ");
        } else {
            out.push_str("\nMessage: \n");
        }
        out.push_str(&message);
        out
    }

    fn text(&self, raw: &str) -> String {
        if self.inline {
            flatten(raw)
        } else {
            raw.to_string()
        }
    }
}

/// Replace embedded line breaks with the inline separator
pub fn flatten(text: &str) -> String {
    text.replace("\r\n", INLINE_SEPARATOR)
        .replace(['\n', '\r'], INLINE_SEPARATOR)
}
