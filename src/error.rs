//! Error types for dutyline.
//!
//! This module provides the error taxonomy following the thiserror pattern.
//! Errors are designed to be informative, suitable for user-facing display,
//! and to carry a stable process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for dutyline operations.
#[derive(Error, Debug)]
pub enum DutylineError {
    /// The log contains no recognizable switching events.
    #[error("log file {path} does not contain any switching events")]
    NoEvents {
        /// Path to the log that was analyzed.
        path: PathBuf,
    },

    /// The log does not span at least one full day.
    #[error(
        "log file contains insufficient data: {days} full day(s) between first switching event \
         and end of log, at least one full day including two midnight crossings is required"
    )]
    InsufficientData {
        /// Number of full days the default window would cover.
        days: i64,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Permission denied when accessing a file or directory.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path where access was denied.
        path: PathBuf,
    },

    /// Report emission failed.
    #[error("Report export failed: {message}")]
    ExportError {
        /// Human-readable error message.
        message: String,
        /// Underlying I/O error, if available.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Chart rendering failed.
    #[error("Chart rendering failed: {message}")]
    ChartError {
        /// Human-readable error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DutylineError {
    /// Create a new no-events error.
    #[must_use]
    pub fn no_events(path: impl Into<PathBuf>) -> Self {
        Self::NoEvents { path: path.into() }
    }

    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a new export error.
    #[must_use]
    pub fn export(message: impl Into<String>) -> Self {
        Self::ExportError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new chart rendering error.
    #[must_use]
    pub fn chart(message: impl Into<String>) -> Self {
        Self::ChartError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NoEvents { .. } | Self::InsufficientData { .. } => exit_codes::EXIT_UNUSABLE_INPUT,
            Self::ChartError { .. } => exit_codes::EXIT_RENDER_ERROR,
            Self::ConfigError { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::ExportError { .. }
            | Self::IoError { .. } => exit_codes::EXIT_IO_ERROR,
        }
    }

    /// Check if this error indicates unusable input (as opposed to an
    /// environment or rendering failure).
    #[must_use]
    pub const fn is_unusable_input(&self) -> bool {
        matches!(self, Self::NoEvents { .. } | Self::InsufficientData { .. })
    }
}

/// Result type alias for dutyline operations.
pub type Result<T> = std::result::Result<T, DutylineError>;

impl From<std::io::Error> for DutylineError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for DutylineError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// Unusable input: no switching events or less than one full day of data.
    pub const EXIT_UNUSABLE_INPUT: i32 = 1;
    /// Chart rendering failed (BSD EX_SOFTWARE).
    pub const EXIT_RENDER_ERROR: i32 = 70;
    /// I/O error (BSD EX_IOERR).
    pub const EXIT_IO_ERROR: i32 = 74;
    /// Invalid configuration (BSD EX_CONFIG).
    pub const EXIT_CONFIG_ERROR: i32 = 78;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let no_events = DutylineError::no_events("/var/log/control_temp.log");
        assert_eq!(no_events.exit_code(), 1);

        let short = DutylineError::InsufficientData { days: 0 };
        assert_eq!(short.exit_code(), 1);

        let io = DutylineError::io("read", std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), 74);

        let config = DutylineError::config("bad key");
        assert_eq!(config.exit_code(), 78);

        let chart = DutylineError::chart("backend failure");
        assert_eq!(chart.exit_code(), 70);
    }

    #[test]
    fn test_is_unusable_input() {
        assert!(DutylineError::no_events("x.log").is_unusable_input());
        assert!(DutylineError::InsufficientData { days: 0 }.is_unusable_input());
        assert!(!DutylineError::chart("boom").is_unusable_input());
    }

    #[test]
    fn test_messages_name_the_input() {
        let err = DutylineError::no_events("/tmp/empty.log");
        assert!(err.to_string().contains("/tmp/empty.log"));

        let err = DutylineError::InsufficientData { days: 0 };
        assert!(err.to_string().contains("midnight crossings"));
    }
}
