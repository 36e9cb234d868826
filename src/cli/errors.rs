//! CLI error types
//!
//! Two layers:
//! - `CliError`: process-level failures (config, stdin/stdout). These end
//!   the program with exit code 1.
//! - `CommandError`: a single command failed. Rendered at the dispatch
//!   boundary; the session carries on with the next line.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::model::ValidationError;
use crate::repository::RepositoryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "VAULT_CLI_CONFIG_ERROR",
            Self::IoError => "VAULT_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::config_error(format!("Invalid config JSON: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// A single command could not complete
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list of commands")]
    UnknownCommand(String),

    /// Missing or malformed argument; carries the usage line
    #[error("{0}")]
    Usage(&'static str),

    #[error("execute_script is not allowed inside a script, line skipped")]
    NestedScript,

    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("failed to read script {path}: {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Input ended in the middle of a field prompt
    #[error("input closed while reading {0}")]
    InputClosed(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Short tag printed in front of the message
    pub fn label(&self) -> &'static str {
        match self {
            CommandError::Usage(_) => "usage",
            CommandError::NestedScript => "skip",
            _ => "error",
        }
    }
}

/// Result type for a single command
pub type CommandResult<T> = Result<T, CommandError>;
