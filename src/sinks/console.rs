//! Console sink implementation

use crate::core::{
    FormatOptions, LogOccurrence, Result, Sink, SinkKind, SinkStatus, TargetConfig,
    TimestampFormat,
};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Cloneable in-memory writer, handy for capturing console output
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

enum ConsoleOutput {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Writes one compact line per occurrence
pub struct ConsoleSink {
    output: ConsoleOutput,
    options: FormatOptions,
    use_colors: bool,
}

impl ConsoleSink {
    /// Sink bound to the process's standard output
    pub fn new() -> Self {
        Self {
            output: ConsoleOutput::Stdout,
            options: FormatOptions::console(),
            use_colors: false,
        }
    }

    /// Sink bound to an arbitrary writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            output: ConsoleOutput::Writer(Mutex::new(Box::new(writer))),
            options: FormatOptions::console(),
            use_colors: false,
        }
    }

    /// Color the whole line by level
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.options.timestamp_format = format;
        self
    }

    /// The exact line written for `occurrence`, without the newline
    pub fn format_line(&self, occurrence: &LogOccurrence) -> String {
        let line = self.options.render(occurrence);
        self.colorize(line, occurrence)
    }

    #[cfg(feature = "console")]
    fn colorize(&self, line: String, occurrence: &LogOccurrence) -> String {
        if self.use_colors {
            line.color(occurrence.level.color_code()).to_string()
        } else {
            line
        }
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, line: String, _occurrence: &LogOccurrence) -> String {
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, occurrence: &LogOccurrence, _config: Option<&TargetConfig>) -> Result<SinkStatus> {
        let mut line = self.format_line(occurrence);
        line.push('\n');

        match &self.output {
            ConsoleOutput::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(line.as_bytes())?;
                handle.flush()?;
            }
            ConsoleOutput::Writer(writer) => {
                let mut writer = writer.lock();
                writer.write_all(line.as_bytes())?;
                writer.flush()?;
            }
        }
        Ok(SinkStatus::Written)
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEntry, LogLevel, Target};

    #[test]
    fn test_writes_single_line() {
        let buffer = SharedBuffer::new();
        let sink = ConsoleSink::with_writer(buffer.clone());
        let occurrence = LogOccurrence::new(
            "svc",
            LogLevel::Warning,
            Target::CONSOLE,
            LogEntry::new("first\nsecond").with_code(3001),
        );

        assert_eq!(sink.write(&occurrence, None).unwrap(), SinkStatus::Written);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Level: Warning (3)"));
        assert!(lines[0].contains("Code: 3001"));
        assert!(lines[0].ends_with("Message: first - second"));
    }

    #[test]
    fn test_custom_timestamp() {
        let buffer = SharedBuffer::new();
        let sink = ConsoleSink::with_writer(buffer.clone())
            .with_timestamp_format(TimestampFormat::Custom("T%Y".to_string()));
        let occurrence =
            LogOccurrence::new("svc", LogLevel::Debug, Target::CONSOLE, LogEntry::new("x"));
        sink.write(&occurrence, None).unwrap();
        assert!(buffer.contents().starts_with("Timestamp: T"));
    }
}
