//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use stell_core::paths::PathError;
use stell_core::{CoreError, ErrorCategory, ParseError, ValidationError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Input data was rejected (validation or parse failure).
    #[error("Invalid data: {0}")]
    Data(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store refused the write.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Storage failure that may succeed on retry.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Data(_) => 65,       // EX_DATAERR
            Self::Io(_) => 74,         // EX_IOERR
            Self::Storage(_) => 75,    // EX_TEMPFAIL
            Self::Permission(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<&CoreError> for CliError {
    fn from(err: &CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::Unsupported(_) => Self::Arguments(message),
            CoreError::Internal(_) => Self::Core(message),
            _ => match err.category() {
                ErrorCategory::Validation => Self::Data(message),
                ErrorCategory::Permission => Self::Permission(message),
                ErrorCategory::Transient => Self::Storage(message),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from(&err)
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error bubbling out of a handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(core) = err.downcast_ref::<CoreError>() {
        return CliError::from(core).exit_code();
    }
    if err.downcast_ref::<ValidationError>().is_some() || err.downcast_ref::<ParseError>().is_some()
    {
        return CliError::Data(String::new()).exit_code();
    }
    if let Some(path) = err.downcast_ref::<PathError>() {
        return CliError::Config(path.to_string()).exit_code();
    }
    if err.downcast_ref::<std::io::Error>().is_some() {
        return CliError::Io(String::new()).exit_code();
    }
    1
}
