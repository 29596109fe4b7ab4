//! Per-level sink configuration and its registry

use super::callback::{CallbackList, LogCallback};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use crate::sinks::encoding::TextEncoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Log name used when an event log config names none
pub const DEFAULT_EVENT_LOG_NAME: &str = "EventLog";

/// File sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub path: PathBuf,
    /// Append to the file; when off the file is truncated before each write
    pub append: bool,
    pub encoding: TextEncoding,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: true,
            encoding: TextEncoding::default(),
        }
    }

    #[must_use]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::invalid_argument(
                "file.path",
                "file sink path must not be empty",
            ));
        }
        Ok(())
    }
}

/// Event log sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogConfig {
    /// Source name registered with the event log
    pub source: String,
    /// Log written to when the entry carries no section
    pub default_log: String,
    /// Write the full-detail text instead of the bare message
    pub log_details: bool,
}

impl EventLogConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            default_log: DEFAULT_EVENT_LOG_NAME.to_string(),
            log_details: true,
        }
    }

    #[must_use]
    pub fn with_default_log(mut self, default_log: impl Into<String>) -> Self {
        self.default_log = default_log.into();
        self
    }

    #[must_use]
    pub fn with_details(mut self, log_details: bool) -> Self {
        self.log_details = log_details;
        self
    }

    /// Log name for an entry: its section when set, otherwise the default
    pub fn resolve_log<'a>(&'a self, section: Option<&'a str>) -> &'a str {
        match section {
            Some(section) if !section.is_empty() => section,
            _ if self.default_log.is_empty() => DEFAULT_EVENT_LOG_NAME,
            _ => &self.default_log,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(LoggerError::invalid_argument(
                "event_log.source",
                "event log source must not be empty",
            ));
        }
        Ok(())
    }
}

/// Sink settings for one level
///
/// Unset fields mean "not configured" and are skipped at dispatch time.
#[derive(Debug, Clone, Default)]
pub struct TargetConfig {
    pub level: LogLevel,
    pub callbacks: Option<CallbackList>,
    pub file: Option<FileConfig>,
    pub event_log: Option<EventLogConfig>,
}

impl TargetConfig {
    /// Empty config for `level`
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: impl Into<CallbackList>) -> Self {
        self.callbacks = Some(callbacks.into());
        self
    }

    /// Append one callback to the list
    #[must_use]
    pub fn with_callback(mut self, callback: LogCallback) -> Self {
        self.callbacks
            .get_or_insert_with(CallbackList::new)
            .push(callback);
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: FileConfig) -> Self {
        self.file = Some(file);
        self
    }

    #[must_use]
    pub fn with_event_log(mut self, event_log: EventLogConfig) -> Self {
        self.event_log = Some(event_log);
        self
    }

    /// Callbacks, if any are registered
    pub fn active_callbacks(&self) -> Option<&CallbackList> {
        self.callbacks.as_ref().filter(|c| !c.is_empty())
    }

    /// Replace each field that `other` sets; fields `other` leaves unset are kept
    pub fn merge_from(&mut self, other: &TargetConfig) {
        if let Some(callbacks) = &other.callbacks {
            self.callbacks = Some(callbacks.clone());
        }
        if let Some(file) = &other.file {
            self.file = Some(file.clone());
        }
        if let Some(event_log) = &other.event_log {
            self.event_log = Some(event_log.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            file.validate()?;
        }
        if let Some(event_log) = &self.event_log {
            event_log.validate()?;
        }
        Ok(())
    }
}

/// Ordered collection of [`TargetConfig`], at most one per level
#[derive(Debug, Clone)]
pub struct TargetConfigRegistry {
    configs: Vec<TargetConfig>,
}

impl Default for TargetConfigRegistry {
    /// One empty config per level
    fn default() -> Self {
        Self {
            configs: LogLevel::ALL.iter().map(|l| TargetConfig::new(*l)).collect(),
        }
    }
}

impl TargetConfigRegistry {
    /// Registry with no configs at all
    pub fn empty() -> Self {
        Self {
            configs: Vec::new(),
        }
    }

    /// Merge `config` into the entry for its level, or append it
    pub fn upsert(&mut self, config: TargetConfig) -> Result<()> {
        config.validate()?;
        self.upsert_unchecked(config);
        Ok(())
    }

    fn upsert_unchecked(&mut self, config: TargetConfig) {
        match self.find_by_level_mut(config.level) {
            Some(existing) => existing.merge_from(&config),
            None => self.configs.push(config),
        }
    }

    /// Install `config` for its level, discarding every field of the old entry
    pub fn replace(&mut self, config: TargetConfig) -> Result<()> {
        config.validate()?;
        match self.find_by_level_mut(config.level) {
            Some(existing) => *existing = config,
            None => self.configs.push(config),
        }
        Ok(())
    }

    /// Upsert every entry of `other`; nothing changes if any entry is invalid
    pub fn merge_all(&mut self, other: &TargetConfigRegistry) -> Result<()> {
        for config in &other.configs {
            config.validate()?;
        }
        for config in &other.configs {
            self.upsert_unchecked(config.clone());
        }
        Ok(())
    }

    #[must_use = "builder methods return a new value"]
    pub fn with(mut self, config: TargetConfig) -> Result<Self> {
        self.upsert(config)?;
        Ok(self)
    }

    pub fn find_by_level(&self, level: LogLevel) -> Option<&TargetConfig> {
        self.configs.iter().find(|c| c.level == level)
    }

    pub fn find_by_level_mut(&mut self, level: LogLevel) -> Option<&mut TargetConfig> {
        self.configs.iter_mut().find(|c| c.level == level)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetConfig> {
        self.configs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_one_empty_config_per_level() {
        let registry = TargetConfigRegistry::default();
        assert_eq!(registry.len(), 6);
        for level in LogLevel::ALL {
            let config = registry.find_by_level(level).unwrap();
            assert!(config.callbacks.is_none());
            assert!(config.file.is_none());
            assert!(config.event_log.is_none());
        }
    }

    #[test]
    fn test_upsert_merges_same_level() {
        let mut registry = TargetConfigRegistry::empty();
        registry
            .upsert(TargetConfig::new(LogLevel::Error).with_file(FileConfig::new("a.log")))
            .unwrap();
        registry
            .upsert(
                TargetConfig::new(LogLevel::Error)
                    .with_event_log(EventLogConfig::new("app"))
                    .with_file(FileConfig::new("b.log")),
            )
            .unwrap();

        assert_eq!(registry.len(), 1);
        let config = registry.find_by_level(LogLevel::Error).unwrap();
        assert_eq!(config.file.as_ref().unwrap().path(), Path::new("b.log"));
        assert_eq!(config.event_log.as_ref().unwrap().source, "app");
    }

    #[test]
    fn test_upsert_keeps_fields_left_unset() {
        let mut registry = TargetConfigRegistry::default();
        registry
            .upsert(TargetConfig::new(LogLevel::Debug).with_file(FileConfig::new("d.log")))
            .unwrap();
        registry
            .upsert(TargetConfig::new(LogLevel::Debug).with_callback(LogCallback::sync(|_, _| Ok(()))))
            .unwrap();

        let config = registry.find_by_level(LogLevel::Debug).unwrap();
        assert!(config.file.is_some());
        assert_eq!(config.callbacks.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_discards_old_fields() {
        let mut registry = TargetConfigRegistry::default();
        registry
            .upsert(TargetConfig::new(LogLevel::Debug).with_file(FileConfig::new("d.log")))
            .unwrap();
        registry.replace(TargetConfig::new(LogLevel::Debug)).unwrap();
        assert!(registry.find_by_level(LogLevel::Debug).unwrap().file.is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected_without_mutation() {
        let mut registry = TargetConfigRegistry::empty();
        let err = registry
            .upsert(TargetConfig::new(LogLevel::Error).with_file(FileConfig::new("")))
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_merge_all_is_all_or_nothing() {
        let mut target = TargetConfigRegistry::empty();
        let mut source = TargetConfigRegistry::empty();
        source.configs.push(TargetConfig::new(LogLevel::Trace).with_file(FileConfig::new("t.log")));
        source
            .configs
            .push(TargetConfig::new(LogLevel::Error).with_event_log(EventLogConfig::new(" ")));

        assert!(target.merge_all(&source).unwrap_err().is_invalid_argument());
        assert!(target.is_empty());
    }

    #[test]
    fn test_merge_all_upserts_each() {
        let mut target = TargetConfigRegistry::default();
        let source = TargetConfigRegistry::empty()
            .with(TargetConfig::new(LogLevel::Warning).with_file(FileConfig::new("w.log")))
            .unwrap();
        target.merge_all(&source).unwrap();
        assert_eq!(target.len(), 6);
        assert!(target.find_by_level(LogLevel::Warning).unwrap().file.is_some());
    }

    #[test]
    fn test_resolve_event_log_name() {
        let config = EventLogConfig::new("app").with_default_log("Application");
        assert_eq!(config.resolve_log(Some("Security")), "Security");
        assert_eq!(config.resolve_log(Some("")), "Application");
        assert_eq!(config.resolve_log(None), "Application");

        let config = EventLogConfig::new("app").with_default_log("");
        assert_eq!(config.resolve_log(None), DEFAULT_EVENT_LOG_NAME);
    }

    #[test]
    fn test_file_config_defaults() {
        let config = FileConfig::new("x.log");
        assert!(config.append);
        assert_eq!(config.encoding, TextEncoding::Utf8);
    }
}
