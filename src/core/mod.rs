//! Core logger types and traits

pub mod callback;
pub mod code_range;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod occurrence;
pub mod sink;
pub mod target;
pub mod target_config;
pub mod target_map;
pub mod timestamp;

pub use callback::{CallbackFn, CallbackList, CallbackMode, LogCallback};
pub use code_range::{assign_code, CodeRange};
pub use dispatcher::{DispatchReport, Dispatcher, SinkFailure};
pub use error::{LoggerError, Result};
pub use format::FormatOptions;
pub use log_entry::{DataChange, EntryKind, LogEntry, DATA_SECTION, EXCEPTION_SECTION};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerDefaults};
pub use metrics::DispatchMetrics;
pub use occurrence::{Issuer, LogOccurrence};
pub use sink::{Sink, SinkKind, SinkStatus};
pub use target::Target;
pub use target_config::{
    EventLogConfig, FileConfig, TargetConfig, TargetConfigRegistry, DEFAULT_EVENT_LOG_NAME,
};
pub use target_map::TargetMap;
pub use timestamp::TimestampFormat;
