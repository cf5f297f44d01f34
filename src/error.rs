//! Custom error types for Deben
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::AmountParseError;

/// The main error type for Deben operations
#[derive(Error, Debug)]
pub enum DebenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<AmountParseError> for DebenError {
    fn from(err: AmountParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for Deben operations
pub type DebenResult<T> = Result<T, DebenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DebenError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_from_amount_error() {
        let err: DebenError = AmountParseError::InvalidFormat("abc".into()).into();
        assert_eq!(err.to_string(), "Validation error: Invalid amount format: abc");
        assert!(matches!(err, DebenError::Validation(_)));
    }
}
