//! Dispatch metrics for observability
//!
//! Counters describing how occurrences fared on their way to the sinks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatch observability
///
/// # Example
///
/// ```
/// use routed_logger::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Occurrences handed to the dispatcher
    dispatched: AtomicU64,

    /// Console, file or event log writes that failed
    sink_failures: AtomicU64,

    /// Synchronous callbacks that returned an error or panicked
    callback_failures: AtomicU64,

    /// Panics caught anywhere in the fan-out
    panics: AtomicU64,

    /// Callbacks started without being joined
    detached_callbacks: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            callback_failures: AtomicU64::new(0),
            panics: AtomicU64::new(0),
            detached_callbacks: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn callback_failures(&self) -> u64 {
        self.callback_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn panics(&self) -> u64 {
        self.panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn detached_callbacks(&self) -> u64 {
        self.detached_callbacks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_callback_failure(&self) -> u64 {
        self.callback_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panic(&self) -> u64 {
        self.panics.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_detached_callback(&self) -> u64 {
        self.detached_callbacks.fetch_add(1, Ordering::Relaxed)
    }

    /// Total failures across sinks and callbacks
    pub fn total_failures(&self) -> u64 {
        self.sink_failures() + self.callback_failures()
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.callback_failures.store(0, Ordering::Relaxed);
        self.panics.store(0, Ordering::Relaxed);
        self.detached_callbacks.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            callback_failures: AtomicU64::new(self.callback_failures()),
            panics: AtomicU64::new(self.panics()),
            detached_callbacks: AtomicU64::new(self.detached_callbacks()),
        }
    }
}
