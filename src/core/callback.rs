//! In-process callback sinks

use super::error::{panic_message, LoggerError, Result};
use super::occurrence::LogOccurrence;
use std::fmt;
use std::sync::Arc;

/// Signature of a callback sink: `(issuer name, occurrence)`
pub type CallbackFn = dyn Fn(&str, &LogOccurrence) -> Result<()> + Send + Sync;

/// How a callback is invoked under [`Target::CALLBACK`](crate::Target::CALLBACK)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackMode {
    /// Run on the caller's thread, in registration order
    #[default]
    Synchronous,
    /// Started without blocking the caller and never joined
    FireAndForget,
}

/// A registered callback together with its invocation mode
#[derive(Clone)]
pub struct LogCallback {
    mode: CallbackMode,
    func: Arc<CallbackFn>,
}

impl LogCallback {
    pub fn new<F>(mode: CallbackMode, func: F) -> Self
    where
        F: Fn(&str, &LogOccurrence) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            mode,
            func: Arc::new(func),
        }
    }

    /// Callback run inline on the logging thread
    pub fn sync<F>(func: F) -> Self
    where
        F: Fn(&str, &LogOccurrence) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(CallbackMode::Synchronous, func)
    }

    /// Callback detached from the logging thread
    pub fn fire_and_forget<F>(func: F) -> Self
    where
        F: Fn(&str, &LogOccurrence) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(CallbackMode::FireAndForget, func)
    }

    pub fn mode(&self) -> CallbackMode {
        self.mode
    }

    /// Invoke, converting a panic into an error
    pub fn invoke(&self, issuer: &str, occurrence: &LogOccurrence) -> Result<()> {
        let func = Arc::clone(&self.func);
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| func(issuer, occurrence))) {
            Ok(result) => result,
            Err(payload) => Err(LoggerError::panicked(
                "callback",
                panic_message(payload.as_ref()),
            )),
        }
    }
}

impl fmt::Debug for LogCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogCallback")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Ordered list of callbacks for one level
#[derive(Debug, Clone, Default)]
pub struct CallbackList {
    callbacks: Vec<LogCallback>,
}

impl CallbackList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, callback: LogCallback) {
        self.callbacks.push(callback);
    }

    #[must_use]
    pub fn with(mut self, callback: LogCallback) -> Self {
        self.push(callback);
        self
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogCallback> {
        self.callbacks.iter()
    }
}

impl From<Vec<LogCallback>> for CallbackList {
    fn from(callbacks: Vec<LogCallback>) -> Self {
        Self { callbacks }
    }
}

impl From<LogCallback> for CallbackList {
    fn from(callback: LogCallback) -> Self {
        Self {
            callbacks: vec![callback],
        }
    }
}

impl FromIterator<LogCallback> for CallbackList {
    fn from_iter<I: IntoIterator<Item = LogCallback>>(iter: I) -> Self {
        Self {
            callbacks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CallbackList {
    type Item = &'a LogCallback;
    type IntoIter = std::slice::Iter<'a, LogCallback>;

    fn into_iter(self) -> Self::IntoIter {
        self.callbacks.iter()
    }
}
