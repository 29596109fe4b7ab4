//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Malformed input rejected before any state was touched
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Event log sink error with source name
    #[error("Event log error for source '{source_name}': {message}")]
    EventLog {
        source_name: String,
        message: String,
    },

    /// A callback returned an error
    #[error("Callback #{index} failed: {message}")]
    Callback { index: usize, message: String },

    /// A sink or callback panicked
    #[error("{sink} panicked: {message}")]
    Panicked { sink: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an event log error
    pub fn event_log(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::EventLog {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a callback error
    pub fn callback(index: usize, message: impl Into<String>) -> Self {
        LoggerError::Callback {
            index,
            message: message.into(),
        }
    }

    /// Create a panic error
    pub fn panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Panicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error came from malformed caller input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LoggerError::InvalidArgument { .. })
    }
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_argument("issuer", "must not be empty");
        assert!(err.is_invalid_argument());

        let err = LoggerError::event_log("billing", "source is not registered");
        assert!(matches!(err, LoggerError::EventLog { .. }));
        assert!(!err.is_invalid_argument());

        let err = LoggerError::callback(2, "boom");
        assert!(matches!(err, LoggerError::Callback { index: 2, .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_argument("issuer", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'issuer': must not be empty"
        );

        let err = LoggerError::event_log("MyApp", "access denied");
        assert_eq!(
            err.to_string(),
            "Event log error for source 'MyApp': access denied"
        );

        let err = LoggerError::panicked("callback #0", "oops");
        assert_eq!(err.to_string(), "callback #0 panicked: oops");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload = std::panic::catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload = std::panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 42");
    }
}
