// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the telemetry engine and the surrounding application
//!
//! Engine errors never cross the engine boundary: they are logged and the
//! affected field or view degrades. [`AppError`] is what the outer
//! application (config loading, scripts, I/O) hands back to `main`.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Telemetry engine errors
    Engine(EngineError),
    /// Configuration errors
    Config(String),
    /// Replay script errors (line number, message)
    Script(usize, String),
    /// Terminal or filesystem I/O errors
    Io(String),
    /// Generic error with message
    Other(String),
}

/// Engine-level failures
///
/// All of these degrade a single field, the overlay or the view. None of them
/// halts a recompute pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Property name outside the known schema
    UnknownField(String),
    /// Value that failed numeric parsing where a numeric comparison is required
    MalformedValue {
        /// Property the value belongs to
        field: &'static str,
        /// Raw value as received
        value: String,
    },
    /// Overlay expiry could not be scheduled
    TimerFault(String),
    /// The engine task is gone
    ChannelClosed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Engine(e) => write!(f, "Engine error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Script(line, msg) => write!(f, "Script error on line {}: {}", line, msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownField(name) => write!(f, "Unknown camera property: {}", name),
            EngineError::MalformedValue { field, value } => {
                write!(f, "Malformed value for {}: {:?}", field, value)
            }
            EngineError::TimerFault(msg) => write!(f, "Overlay timer fault: {}", msg),
            EngineError::ChannelClosed => write!(f, "Engine channel closed"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for EngineError {}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Engine(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::UnknownField("focallength".to_string());
        assert_eq!(err.to_string(), "Unknown camera property: focallength");

        let err = EngineError::MalformedValue {
            field: "whitebalanceadjusta",
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("whitebalanceadjusta"));
    }

    #[test]
    fn test_app_error_wraps_engine_error() {
        let err: AppError = EngineError::ChannelClosed.into();
        assert_eq!(err.to_string(), "Engine error: Engine channel closed");
    }

    #[test]
    fn test_script_error_mentions_line() {
        let err = AppError::Script(7, "expected value".to_string());
        assert_eq!(err.to_string(), "Script error on line 7: expected value");
    }
}
