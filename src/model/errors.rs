//! # Validation Errors
//!
//! Raised when a field value does not satisfy its rule. Interactive entry
//! recovers by asking again; the repository refuses the write.

use thiserror::Error;

/// Result type for field validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single field failed its rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Required text was empty or whitespace
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Input was not a whole number
    #[error("{field} must be a whole number")]
    NotAnInteger { field: &'static str },

    /// Whole number outside its inclusive bounds
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    /// Input was not a finite decimal number
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    /// Decimal number under its lower bound
    #[error("{field} must be >= {min}")]
    BelowMinimum { field: &'static str, min: f64 },

    /// Name or ordinal that matches no enumeration variant
    #[error("unknown {field} '{value}', expected one of {choices}")]
    UnknownVariant {
        field: &'static str,
        value: String,
        choices: &'static str,
    },
}

impl ValidationError {
    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotAnInteger { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotANumber { field }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::UnknownVariant { field, .. } => field,
        }
    }
}
