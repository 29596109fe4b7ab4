//! File sink implementation
//!
//! The handle is opened per write and closed before returning, so no file
//! stays open between calls. Writes through one sink are serialized; separate
//! sinks or processes writing the same path are not coordinated.

use crate::core::{
    FormatOptions, LogOccurrence, LoggerError, Result, Sink, SinkKind, SinkStatus, TargetConfig,
    TimestampFormat,
};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;

/// Writes the verbose block of an occurrence to the level's configured file
pub struct FileSink {
    options: FormatOptions,
    write_lock: Mutex<()>,
}

impl FileSink {
    pub fn new() -> Self {
        Self {
            options: FormatOptions::verbose(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.options.timestamp_format = format;
        self
    }

    /// Text written for one occurrence: the block plus a blank separator line
    pub fn format_block(&self, occurrence: &LogOccurrence) -> String {
        let mut block = self.options.render(occurrence);
        block.push_str("\n\n");
        block
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for FileSink {
    fn write(&self, occurrence: &LogOccurrence, config: Option<&TargetConfig>) -> Result<SinkStatus> {
        let file_config = match config.and_then(|c| c.file.as_ref()) {
            Some(file) if !file.path.as_os_str().is_empty() => file,
            _ => return Ok(SinkStatus::Skipped),
        };
        let path = file_config.path.display().to_string();
        let block = self.format_block(occurrence);
        let _guard = self.write_lock.lock();

        let mut options = OpenOptions::new();
        options.create(true);
        if file_config.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        let mut file = options
            .open(&file_config.path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.clone(), e))?;

        let is_empty = file
            .metadata()
            .map(|m| m.len() == 0)
            .map_err(|e| LoggerError::io_operation("reading log file metadata", path.clone(), e))?;

        let mut bytes = Vec::new();
        if is_empty {
            bytes.extend_from_slice(file_config.encoding.preamble());
        }
        bytes.extend(file_config.encoding.encode(&block));

        file.write_all(&bytes)
            .map_err(|e| LoggerError::io_operation("writing log file", path.clone(), e))?;
        file.flush()
            .map_err(|e| LoggerError::io_operation("flushing log file", path, e))?;

        Ok(SinkStatus::Written)
    }

    fn kind(&self) -> SinkKind {
        SinkKind::File
    }
}
