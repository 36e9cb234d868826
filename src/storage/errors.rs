//! Storage error types
//!
//! Error codes:
//! - VAULT_STORAGE_IO_ERROR (ERROR severity)
//! - VAULT_STORAGE_WRITE_FAILED (ERROR severity)
//! - VAULT_STORAGE_READ_FAILED (ERROR severity)
//! - VAULT_MALFORMED_ROW (SKIP severity)

use std::fmt;
use std::io;

/// What a storage failure means for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, session continues
    Error,
    /// Row is dropped, the surrounding load continues
    Skip,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Skip => write!(f, "SKIP"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Disk I/O failure outside a read or write (fsync)
    VaultStorageIoError,
    /// Data file could not be written
    VaultStorageWriteFailed,
    /// Data file could not be read
    VaultStorageReadFailed,
    /// A row did not have enough fields
    VaultMalformedRow,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::VaultStorageIoError => "VAULT_STORAGE_IO_ERROR",
            StorageErrorCode::VaultStorageWriteFailed => "VAULT_STORAGE_WRITE_FAILED",
            StorageErrorCode::VaultStorageReadFailed => "VAULT_STORAGE_READ_FAILED",
            StorageErrorCode::VaultMalformedRow => "VAULT_MALFORMED_ROW",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::VaultMalformedRow => Severity::Skip,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional context
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    /// Create a new storage I/O error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::VaultStorageIoError,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Create a new write failed error
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::VaultStorageWriteFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Create a new read failed error
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::VaultStorageReadFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Create a malformed row error carrying the field count found
    pub fn malformed_row(found: usize, expected: usize) -> Self {
        Self {
            code: StorageErrorCode::VaultMalformedRow,
            message: format!("expected {} fields, found {}", expected, found),
            details: None,
            source: None,
        }
    }

    /// Attach the 1-based line number the error refers to
    pub fn at_line(mut self, line: usize) -> Self {
        self.details = Some(format!("line: {}", line));
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Whether the caller should drop the row and keep going
    pub fn is_skippable(&self) -> bool {
        self.severity() == Severity::Skip
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
