//! Error handling for the Sabq core layer.
//!
//! This module defines the error types shared by every layer of the appearance
//! stack. They are built with `thiserror` so that callers can match on specific
//! variants and still get readable messages through `Display`.
//!
//! The main error type for this crate is [`CoreError`], which encapsulates
//! more specific errors like [`ConfigError`] and [`LoggingError`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use sabq_core::error::CoreError;
//!
//! fn load_palette() -> Result<(), CoreError> {
//!     // return Err(CoreError::InvalidInput("palette is empty".to_string()));
//!     Ok(())
//! }
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Sabq.
///
/// Wraps the configuration and logging errors and adds filesystem and input
/// failures raised by the utilities in [`crate::utils`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while installing the global tracing subscriber.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// Filesystem operations (creating directories, reading or writing files).
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by other specific variants.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided to a function or method.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` when the error stems from a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Filesystem { source, .. } => source.kind() == io::ErrorKind::NotFound,
            CoreError::Io(source) => source.kind() == io::ErrorKind::NotFound,
            CoreError::Config(ConfigError::ReadError { source, .. }) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a configuration file failed.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but holds invalid values.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (e.g., XDG config home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to initialize the logging system.
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    /// Failed to parse a log filter directive.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),

    /// An I/O error occurred while preparing a log file.
    #[error("Logging I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl From<LoggingError> for CoreError {
    fn from(err: LoggingError) -> Self {
        CoreError::LoggingInitialization(err.to_string())
    }
}
