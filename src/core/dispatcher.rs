//! Fan-out of one occurrence to every sink its target selects
//!
//! Steps run in a fixed order: synchronous callbacks, detached callbacks,
//! console, event log, file. Each step is isolated. An error or a panic in
//! one sink is recorded in the [`DispatchReport`] and the remaining steps
//! still run; nothing escapes [`Dispatcher::dispatch`].

use super::{
    callback::{CallbackMode, LogCallback},
    error::{panic_message, LoggerError, Result},
    metrics::DispatchMetrics,
    occurrence::LogOccurrence,
    sink::{Sink, SinkKind, SinkStatus},
    target::Target,
    target_config::{TargetConfig, TargetConfigRegistry},
};
use crate::sinks::{ConsoleSink, EventLogBackend, EventLogSink, FileSink};
use std::fmt;
use std::sync::Arc;

/// A failure captured during fan-out
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: SinkKind,
    /// Position in the callback list, for callback failures
    pub index: Option<usize>,
    pub error: LoggerError,
}

/// Outcome of one dispatch
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub written: Vec<SinkKind>,
    pub skipped: Vec<SinkKind>,
    pub failures: Vec<SinkFailure>,
    /// Callbacks started without being joined
    pub detached: usize,
    /// Synchronous callbacks that completed without error
    pub callbacks_invoked: usize,
}

impl DispatchReport {
    /// No step failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn was_written(&self, kind: SinkKind) -> bool {
        self.written.contains(&kind)
    }

    pub fn failed(&self, kind: SinkKind) -> bool {
        self.failures.iter().any(|f| f.sink == kind)
    }
}

/// Resolves the level's config and invokes each requested sink
pub struct Dispatcher {
    console: Box<dyn Sink>,
    event_log: Option<Box<dyn Sink>>,
    file: Box<dyn Sink>,
    metrics: Arc<DispatchMetrics>,
    diagnostics: bool,
}

impl Dispatcher {
    /// Console on stdout, per-call file sink, no event log backend
    pub fn new() -> Self {
        Self {
            console: Box::new(ConsoleSink::new()),
            event_log: None,
            file: Box::new(FileSink::new()),
            metrics: Arc::new(DispatchMetrics::new()),
            diagnostics: true,
        }
    }

    /// Install a sink, replacing the one of the same kind
    pub fn set_sink(&mut self, sink: Box<dyn Sink>) -> Result<()> {
        match sink.kind() {
            SinkKind::Console => self.console = sink,
            SinkKind::EventLog => self.event_log = Some(sink),
            SinkKind::File => self.file = sink,
            kind @ (SinkKind::Callback | SinkKind::CallbackAsync) => {
                return Err(LoggerError::invalid_argument(
                    "sink",
                    format!("{} destinations are configured per level, not installed", kind),
                ))
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_console(mut self, console: ConsoleSink) -> Self {
        self.console = Box::new(console);
        self
    }

    #[must_use]
    pub fn with_event_log<B: EventLogBackend + 'static>(mut self, backend: B) -> Self {
        self.event_log = Some(Box::new(EventLogSink::new(backend)));
        self
    }

    /// Toggle stderr reports of sink failures
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    pub fn supports_event_log(&self) -> bool {
        self.event_log.is_some()
    }

    /// Deliver `occurrence` to every sink selected by its target
    pub fn dispatch(
        &self,
        occurrence: LogOccurrence,
        registry: &TargetConfigRegistry,
    ) -> DispatchReport {
        self.metrics.record_dispatched();

        let occurrence = Arc::new(occurrence);
        let target = occurrence.target;
        let config = registry.find_by_level(occurrence.level);
        let mut report = DispatchReport::default();

        if target.contains(Target::CALLBACK) {
            self.invoke_callbacks(&occurrence, config, false, &mut report);
        }
        if target.contains(Target::CALLBACK_ASYNC) {
            self.invoke_callbacks(&occurrence, config, true, &mut report);
        }
        if target.contains(Target::CONSOLE) {
            self.run_sink(self.console.as_ref(), &occurrence, config, &mut report);
        }
        if target.contains(Target::EVENT_LOG) {
            match &self.event_log {
                Some(sink) => self.run_sink(sink.as_ref(), &occurrence, config, &mut report),
                None => report.skipped.push(SinkKind::EventLog),
            }
        }
        if target.contains(Target::FILE) {
            self.run_sink(self.file.as_ref(), &occurrence, config, &mut report);
        }

        report
    }

    fn invoke_callbacks(
        &self,
        occurrence: &Arc<LogOccurrence>,
        config: Option<&TargetConfig>,
        detach_all: bool,
        report: &mut DispatchReport,
    ) {
        let kind = if detach_all {
            SinkKind::CallbackAsync
        } else {
            SinkKind::Callback
        };
        let Some(callbacks) = config.and_then(TargetConfig::active_callbacks) else {
            report.skipped.push(kind);
            return;
        };

        let issuer = occurrence.class_name.as_str();
        let delivered_before = report.callbacks_invoked + report.detached;
        for (idx, callback) in callbacks.iter().enumerate() {
            if detach_all || callback.mode() == CallbackMode::FireAndForget {
                match self.spawn_detached(callback, occurrence) {
                    Ok(()) => report.detached += 1,
                    Err(error) => self.record_failure(kind, Some(idx), error, report),
                }
                continue;
            }

            match callback.invoke(issuer, occurrence) {
                Ok(()) => report.callbacks_invoked += 1,
                Err(error) => {
                    if matches!(error, LoggerError::Panicked { .. }) {
                        self.metrics.record_panic();
                    }
                    let error = match error {
                        LoggerError::Panicked { .. } => error,
                        other => LoggerError::callback(idx, other.to_string()),
                    };
                    self.record_failure(SinkKind::Callback, Some(idx), error, report);
                }
            }
        }
        if report.callbacks_invoked + report.detached > delivered_before {
            report.written.push(kind);
        }
    }

    fn spawn_detached(
        &self,
        callback: &LogCallback,
        occurrence: &Arc<LogOccurrence>,
    ) -> Result<()> {
        let callback = callback.clone();
        let occurrence = Arc::clone(occurrence);
        let metrics = Arc::clone(&self.metrics);
        let diagnostics = self.diagnostics;

        let task = move || {
            if let Err(e) = callback.invoke(&occurrence.class_name, &occurrence) {
                if matches!(e, LoggerError::Panicked { .. }) {
                    metrics.record_panic();
                }
                if diagnostics {
                    eprintln!("[LOGGER ERROR] Detached callback failed: {}", e);
                }
            }
        };

        #[cfg(feature = "tokio")]
        {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                drop(handle.spawn_blocking(task));
                self.metrics.record_detached_callback();
                return Ok(());
            }
        }

        std::thread::Builder::new()
            .name("log-callback".to_string())
            .spawn(task)
            .map_err(|e| {
                LoggerError::io_operation("spawning callback thread", "detached callback not started", e)
            })?;
        self.metrics.record_detached_callback();
        Ok(())
    }

    fn run_sink(
        &self,
        sink: &dyn Sink,
        occurrence: &LogOccurrence,
        config: Option<&TargetConfig>,
        report: &mut DispatchReport,
    ) {
        let kind = sink.kind();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.write(occurrence, config)
        }));

        match result {
            Ok(Ok(SinkStatus::Written)) => report.written.push(kind),
            Ok(Ok(SinkStatus::Skipped)) => report.skipped.push(kind),
            Ok(Err(error)) => self.record_failure(kind, None, error, report),
            Err(payload) => {
                self.metrics.record_panic();
                let error = LoggerError::panicked(
                    format!("{} sink", kind),
                    panic_message(payload.as_ref()),
                );
                self.record_failure(kind, None, error, report);
            }
        }
    }

    fn record_failure(
        &self,
        kind: SinkKind,
        index: Option<usize>,
        error: LoggerError,
        report: &mut DispatchReport,
    ) {
        if matches!(kind, SinkKind::Callback | SinkKind::CallbackAsync) {
            self.metrics.record_callback_failure();
        } else {
            self.metrics.record_sink_failure();
        }

        if self.diagnostics {
            if matches!(error, LoggerError::Panicked { .. }) {
                eprintln!(
                    "[LOGGER CRITICAL] {}. Other sinks continue to function.",
                    error
                );
            } else {
                eprintln!("[LOGGER ERROR] {} sink failed: {}", kind, error);
            }
        }

        report.failures.push(SinkFailure {
            sink: kind,
            index,
            error,
        });
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("event_log", &self.supports_event_log())
            .field("diagnostics", &self.diagnostics)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileConfig, LogEntry, LogLevel};
    use crate::sinks::SharedBuffer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct PanickingSink(SinkKind);

    impl Sink for PanickingSink {
        fn write(&self, _: &LogOccurrence, _: Option<&TargetConfig>) -> Result<SinkStatus> {
            panic!("sink blew up")
        }

        fn kind(&self) -> SinkKind {
            self.0
        }
    }

    fn quiet(buffer: &SharedBuffer) -> Dispatcher {
        Dispatcher::new()
            .with_console(ConsoleSink::with_writer(buffer.clone()))
            .with_diagnostics(false)
    }

    fn occurrence(level: LogLevel, target: Target) -> LogOccurrence {
        LogOccurrence::new("svc", level, target, LogEntry::new("hello").with_code(2000))
    }

    #[test]
    fn test_console_only() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let report = dispatcher.dispatch(
            occurrence(LogLevel::Information, Target::CONSOLE),
            &TargetConfigRegistry::default(),
        );

        assert!(report.is_clean());
        assert!(report.was_written(SinkKind::Console));
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_none_target_touches_nothing() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let report = dispatcher.dispatch(
            occurrence(LogLevel::Trace, Target::NONE),
            &TargetConfigRegistry::default(),
        );
        assert!(report.written.is_empty());
        assert!(report.skipped.is_empty());
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_callbacks_run_in_order_and_failures_are_isolated() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        let third = Arc::clone(&order);
        let config = TargetConfig::new(LogLevel::Error)
            .with_callback(LogCallback::sync(move |_, _| {
                first.lock().push(1);
                Ok(())
            }))
            .with_callback(LogCallback::sync(|_, _| Err(LoggerError::other("nope"))))
            .with_callback(LogCallback::sync(|_, _| panic!("callback panic")))
            .with_callback(LogCallback::sync(move |_, _| {
                third.lock().push(4);
                Ok(())
            }));
        let registry = TargetConfigRegistry::default().with(config).unwrap();

        let report = dispatcher.dispatch(
            occurrence(LogLevel::Error, Target::CALLBACK | Target::CONSOLE),
            &registry,
        );

        assert_eq!(*order.lock(), vec![1, 4]);
        assert_eq!(report.callbacks_invoked, 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].index, Some(1));
        assert!(matches!(report.failures[1].error, LoggerError::Panicked { .. }));
        assert!(report.was_written(SinkKind::Console));
        assert_eq!(dispatcher.metrics().callback_failures(), 2);
        assert_eq!(dispatcher.metrics().panics(), 1);
    }

    #[test]
    fn test_all_callbacks_failing_is_not_written() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let config = TargetConfig::new(LogLevel::Error)
            .with_callback(LogCallback::sync(|_, _| Err(LoggerError::other("down"))))
            .with_callback(LogCallback::sync(|_, _| panic!("also down")));
        let registry = TargetConfigRegistry::default().with(config).unwrap();

        let report = dispatcher.dispatch(occurrence(LogLevel::Error, Target::CALLBACK), &registry);

        assert!(report.failed(SinkKind::Callback));
        assert!(!report.was_written(SinkKind::Callback));
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_missing_config_skips_callbacks() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let report = dispatcher.dispatch(
            occurrence(LogLevel::Debug, Target::CALLBACK),
            &TargetConfigRegistry::empty(),
        );
        assert!(report.is_clean());
        assert_eq!(report.skipped, vec![SinkKind::Callback]);
    }

    #[test]
    fn test_fire_and_forget_callback_is_detached() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let (tx, rx) = crossbeam_channel::bounded(1);
        let config = TargetConfig::new(LogLevel::Warning).with_callback(LogCallback::fire_and_forget(
            move |issuer, occurrence| {
                let _ = tx.send((issuer.to_string(), occurrence.entry.message.clone()));
                Ok(())
            },
        ));
        let registry = TargetConfigRegistry::default().with(config).unwrap();

        let report = dispatcher.dispatch(occurrence(LogLevel::Warning, Target::CALLBACK), &registry);

        assert_eq!(report.detached, 1);
        assert_eq!(report.callbacks_invoked, 0);
        let (issuer, message) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(issuer, "svc");
        assert_eq!(message, "hello");
    }

    #[test]
    fn test_async_target_detaches_every_callback() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut config = TargetConfig::new(LogLevel::Information);
        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            let tx = tx.clone();
            config = config.with_callback(LogCallback::sync(move |_, _| {
                calls.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(());
                Ok(())
            }));
        }
        let registry = TargetConfigRegistry::default().with(config).unwrap();

        let report = dispatcher.dispatch(
            occurrence(LogLevel::Information, Target::CALLBACK_ASYNC),
            &registry,
        );

        assert_eq!(report.detached, 3);
        for _ in 0..3 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(dispatcher.metrics().detached_callbacks(), 3);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_detached_callback_uses_runtime_blocking_pool() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        let (tx, rx) = crossbeam_channel::bounded(1);
        let config = TargetConfig::new(LogLevel::Information).with_callback(LogCallback::sync(
            move |_, _| {
                let name = std::thread::current().name().map(str::to_string);
                let _ = tx.send(name);
                Ok(())
            },
        ));
        let registry = TargetConfigRegistry::default().with(config).unwrap();

        let report = dispatcher.dispatch(
            occurrence(LogLevel::Information, Target::CALLBACK_ASYNC),
            &registry,
        );

        assert_eq!(report.detached, 1);
        let thread_name = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .expect("Blocking task panicked")
            .expect("Callback never ran");
        assert_ne!(thread_name.as_deref(), Some("log-callback"));
        assert_eq!(dispatcher.metrics().detached_callbacks(), 1);
    }

    #[test]
    fn test_panicking_console_does_not_stop_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("isolated.log");
        let mut dispatcher = Dispatcher::new().with_diagnostics(false);
        dispatcher
            .set_sink(Box::new(PanickingSink(SinkKind::Console)))
            .unwrap();
        let registry = TargetConfigRegistry::default()
            .with(TargetConfig::new(LogLevel::Error).with_file(FileConfig::new(&path)))
            .unwrap();

        let report = dispatcher.dispatch(
            occurrence(LogLevel::Error, Target::CONSOLE | Target::FILE),
            &registry,
        );

        assert!(report.failed(SinkKind::Console));
        assert!(report.was_written(SinkKind::File));
        assert!(std::fs::read_to_string(&path).unwrap().contains("hello"));
        assert_eq!(dispatcher.metrics().sink_failures(), 1);
    }

    #[test]
    fn test_event_log_without_backend_is_skipped() {
        let buffer = SharedBuffer::new();
        let dispatcher = quiet(&buffer);
        assert!(!dispatcher.supports_event_log());
        let report = dispatcher.dispatch(
            occurrence(LogLevel::Critical, Target::EVENT_LOG),
            &TargetConfigRegistry::default(),
        );
        assert_eq!(report.skipped, vec![SinkKind::EventLog]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_callback_sinks_cannot_be_installed() {
        let mut dispatcher = Dispatcher::new();
        let err = dispatcher
            .set_sink(Box::new(PanickingSink(SinkKind::Callback)))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
