//! Logger facade
//!
//! A [`Logger`] owns its own [`TargetMap`] and [`TargetConfigRegistry`],
//! copied from a [`LoggerDefaults`] snapshot at construction. Later changes
//! to that snapshot do not reach loggers already built from it.
//!
//! Logging takes `&self`; reconfiguration takes `&mut self`. Share a logger
//! across threads behind a lock if it must be reconfigured while in use.

use super::{
    code_range::CodeRange,
    dispatcher::{DispatchReport, Dispatcher},
    error::{LoggerError, Result},
    log_entry::{DataChange, LogEntry},
    log_level::LogLevel,
    metrics::DispatchMetrics,
    occurrence::{Issuer, LogOccurrence},
    sink::Sink,
    target::Target,
    target_config::{TargetConfig, TargetConfigRegistry},
    target_map::TargetMap,
};
use crate::sinks::{ConsoleSink, EventLogBackend};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

/// Configuration snapshot new loggers are seeded from
#[derive(Debug, Clone, Default)]
pub struct LoggerDefaults {
    pub target_map: TargetMap,
    pub registry: TargetConfigRegistry,
}

impl LoggerDefaults {
    pub fn new(target_map: TargetMap, registry: TargetConfigRegistry) -> Self {
        Self {
            target_map,
            registry,
        }
    }

    #[must_use]
    pub fn with_target_map(mut self, target_map: TargetMap) -> Self {
        self.target_map = target_map;
        self
    }

    #[must_use]
    pub fn with_target(mut self, level: LogLevel, target: Target) -> Self {
        self.target_map.set(level, target);
        self
    }

    pub fn with_config(mut self, config: TargetConfig) -> Result<Self> {
        self.registry.upsert(config)?;
        Ok(self)
    }
}

pub struct Logger {
    issuer: Issuer,
    target_map: TargetMap,
    registry: TargetConfigRegistry,
    dispatcher: Dispatcher,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("issuer", &self.issuer.name())
            .field("target_map", &self.target_map)
            .field("configs", &self.registry.len())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl Logger {
    /// Logger with default routing; the issuer name must not be blank
    pub fn new(issuer: impl Into<String>) -> Result<Self> {
        Self::with_defaults(issuer, &LoggerDefaults::default())
    }

    /// Logger whose issuer is named after `T`
    #[must_use]
    pub fn for_type<T: ?Sized>() -> Self {
        Self::from_parts(Issuer::of::<T>(), &LoggerDefaults::default(), Dispatcher::new())
    }

    /// Logger seeded from a copy of `defaults`
    pub fn with_defaults(issuer: impl Into<String>, defaults: &LoggerDefaults) -> Result<Self> {
        let issuer = Issuer::new(issuer)?;
        Ok(Self::from_parts(issuer, defaults, Dispatcher::new()))
    }

    fn from_parts(issuer: Issuer, defaults: &LoggerDefaults, dispatcher: Dispatcher) -> Self {
        Self {
            issuer,
            target_map: defaults.target_map,
            registry: defaults.registry.clone(),
            dispatcher,
        }
    }

    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    pub fn target_map(&self) -> &TargetMap {
        &self.target_map
    }

    pub fn configs(&self) -> &TargetConfigRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        self.dispatcher.metrics()
    }

    pub fn set_target(&mut self, level: LogLevel, target: Target) {
        self.target_map.set(level, target);
    }

    pub fn set_target_map(&mut self, map: &TargetMap) {
        self.target_map.merge(map);
    }

    pub fn upsert_config(&mut self, config: TargetConfig) -> Result<()> {
        self.registry.upsert(config)
    }

    pub fn merge_configs(&mut self, other: &TargetConfigRegistry) -> Result<()> {
        self.registry.merge_all(other)
    }

    /// Route `entry` at `level` to `target`
    ///
    /// The entry's code is qualified into the level's range; a missing code
    /// becomes the level's default.
    pub fn log(&self, level: LogLevel, target: Target, entry: impl Into<LogEntry>) -> DispatchReport {
        let mut entry = entry.into();
        let range = CodeRange::for_level(level);
        entry.code = Some(entry.code.map_or_else(|| range.default_code(), |c| range.assign(c)));

        let occurrence = LogOccurrence::new(self.issuer.name(), level, target, entry);
        self.dispatcher.dispatch(occurrence, &self.registry)
    }

    /// Route at `level` to the level's mapped target
    pub fn log_at(&self, level: LogLevel, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log(level, self.target_map.get(level), entry)
    }

    /// Build and route a plain entry in one call
    pub fn log_message(
        &self,
        level: LogLevel,
        target: Target,
        message: impl Into<String>,
        section: Option<&str>,
        code: Option<i32>,
    ) -> DispatchReport {
        self.log(level, target, Self::build_entry(message, code, section))
    }

    fn build_entry(message: impl Into<String>, code: Option<i32>, section: Option<&str>) -> LogEntry {
        let mut entry = LogEntry::new(message);
        entry.code = code;
        entry.section = section.map(str::to_string);
        entry
    }

    #[inline]
    pub fn trace(&self, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log_at(LogLevel::Trace, entry)
    }

    #[inline]
    pub fn debug(&self, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log_at(LogLevel::Debug, entry)
    }

    #[inline]
    pub fn info(&self, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log_at(LogLevel::Information, entry)
    }

    #[inline]
    pub fn warn(&self, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log_at(LogLevel::Warning, entry)
    }

    #[inline]
    pub fn error(&self, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log_at(LogLevel::Error, entry)
    }

    #[inline]
    pub fn critical(&self, entry: impl Into<LogEntry>) -> DispatchReport {
        self.log_at(LogLevel::Critical, entry)
    }

    /// Trace with an explicit code (or offset) and section
    pub fn trace_with(&self, message: impl Into<String>, code: i32, section: Option<&str>) -> DispatchReport {
        self.log_at(LogLevel::Trace, Self::build_entry(message, Some(code), section))
    }

    pub fn debug_with(&self, message: impl Into<String>, code: i32, section: Option<&str>) -> DispatchReport {
        self.log_at(LogLevel::Debug, Self::build_entry(message, Some(code), section))
    }

    pub fn info_with(&self, message: impl Into<String>, code: i32, section: Option<&str>) -> DispatchReport {
        self.log_at(LogLevel::Information, Self::build_entry(message, Some(code), section))
    }

    pub fn warn_with(&self, message: impl Into<String>, code: i32, section: Option<&str>) -> DispatchReport {
        self.log_at(LogLevel::Warning, Self::build_entry(message, Some(code), section))
    }

    pub fn error_with(&self, message: impl Into<String>, code: i32, section: Option<&str>) -> DispatchReport {
        self.log_at(LogLevel::Error, Self::build_entry(message, Some(code), section))
    }

    pub fn critical_with(&self, message: impl Into<String>, code: i32, section: Option<&str>) -> DispatchReport {
        self.log_at(LogLevel::Critical, Self::build_entry(message, Some(code), section))
    }

    /// Log an error value at Error with Error's mapped target
    pub fn log_exception<E>(&self, error: &E) -> DispatchReport
    where
        E: StdError + ?Sized,
    {
        self.error(LogEntry::exception(error))
    }

    pub fn log_exception_with_code<E>(&self, error: &E, code: i32) -> DispatchReport
    where
        E: StdError + ?Sized,
    {
        self.error(LogEntry::exception(error).with_code(code))
    }

    /// Log an error whose origin the caller names, at Error with Error's mapped target
    pub fn log_exception_from<E>(&self, error: &E, origin: &str) -> DispatchReport
    where
        E: StdError + ?Sized,
    {
        self.error(LogEntry::exception_with_origin(error, origin))
    }

    pub fn log_exception_at<E>(&self, level: LogLevel, target: Target, error: &E) -> DispatchReport
    where
        E: StdError + ?Sized,
    {
        self.log(level, target, LogEntry::exception(error))
    }

    /// Log a payload change at Information with Information's mapped target
    ///
    /// Fails only when the payload cannot be serialized or is null.
    pub fn log_data<T>(&self, payload: &T, change: DataChange, editor: Option<&str>) -> Result<DispatchReport>
    where
        T: Serialize + ?Sized,
    {
        let entry = LogEntry::data(payload, change, editor)?;
        Ok(self.info(entry))
    }

    pub fn log_data_at<T>(
        &self,
        level: LogLevel,
        target: Target,
        payload: &T,
        change: DataChange,
        editor: Option<&str>,
    ) -> Result<DispatchReport>
    where
        T: Serialize + ?Sized,
    {
        let entry = LogEntry::data(payload, change, editor)?;
        Ok(self.log(level, target, entry))
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use routed_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .issuer("inventory")
///     .target(LogLevel::Trace, Target::CONSOLE)
///     .target_config(TargetConfig::new(LogLevel::Error).with_callback(LogCallback::sync(|_, _| Ok(()))))
///     .diagnostics(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.target_map().get(LogLevel::Trace), Target::CONSOLE);
/// ```
pub struct LoggerBuilder {
    issuer: Option<Issuer>,
    issuer_error: Option<LoggerError>,
    defaults: LoggerDefaults,
    dispatcher: Dispatcher,
    config_error: Option<LoggerError>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            issuer: None,
            issuer_error: None,
            defaults: LoggerDefaults::default(),
            dispatcher: Dispatcher::new(),
            config_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn issuer(mut self, name: impl Into<String>) -> Self {
        match Issuer::new(name) {
            Ok(issuer) => {
                self.issuer = Some(issuer);
                self.issuer_error = None;
            }
            Err(e) => {
                self.issuer = None;
                self.issuer_error = Some(e);
            }
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn issuer_of<T: ?Sized>(mut self) -> Self {
        self.issuer = Some(Issuer::of::<T>());
        self.issuer_error = None;
        self
    }

    /// Start from a copy of `defaults`, discarding earlier routing changes
    #[must_use = "builder methods return a new value"]
    pub fn defaults(mut self, defaults: &LoggerDefaults) -> Self {
        self.defaults = defaults.clone();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn target_map(mut self, map: TargetMap) -> Self {
        self.defaults.target_map = map;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn target(mut self, level: LogLevel, target: Target) -> Self {
        self.defaults.target_map.set(level, target);
        self
    }

    /// Upsert a level config; an invalid config fails [`build`](Self::build)
    #[must_use = "builder methods return a new value"]
    pub fn target_config(mut self, config: TargetConfig) -> Self {
        if let Err(e) = self.defaults.registry.upsert(config) {
            self.config_error.get_or_insert(e);
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_sink(mut self, console: ConsoleSink) -> Self {
        self.dispatcher = self.dispatcher.with_console(console);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn event_log<B: EventLogBackend + 'static>(mut self, backend: B) -> Self {
        self.dispatcher = self.dispatcher.with_event_log(backend);
        self
    }

    /// Install a custom console, file or event log sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Box<dyn Sink>) -> Self {
        if let Err(e) = self.dispatcher.set_sink(sink) {
            self.config_error.get_or_insert(e);
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.dispatcher = self.dispatcher.with_diagnostics(enabled);
        self
    }

    pub fn build(self) -> Result<Logger> {
        if let Some(e) = self.issuer_error {
            return Err(e);
        }
        if let Some(e) = self.config_error {
            return Err(e);
        }
        let issuer = self.issuer.ok_or_else(|| {
            LoggerError::invalid_argument("issuer", "a logger requires an issuer")
        })?;
        Ok(Logger::from_parts(issuer, &self.defaults, self.dispatcher))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
