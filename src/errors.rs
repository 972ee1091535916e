//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the autocomplete engine, providing the
//! error types and conversion utilities shared by all components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from loading, querying, and serving
//! - **Output**: Structured error types with context
//! - **Error Categories**: Ingestion, Query, Configuration, API, System

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, SuggestError>;

/// Error types for the autocomplete engine
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset parsing errors; loading is all-or-nothing, so one of these
    /// aborts startup
    #[error("Malformed record at line {line}: {details}")]
    MalformedRecord { line: usize, details: String },

    /// Client-supplied query parameter errors, reported as 400s
    #[error("Invalid query parameter '{param}': {reason}")]
    InvalidQueryParam { param: String, reason: String },

    /// Serialization/deserialization errors
    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SuggestError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SuggestError::Io(_) | SuggestError::MalformedRecord { .. } => "ingestion",
            SuggestError::Config { .. } => "configuration",
            SuggestError::InvalidQueryParam { .. } => "query",
            SuggestError::SerializationFailed { .. } => "api",
            SuggestError::Internal { .. } => "system",
        }
    }

    /// Whether the error was caused by client input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, SuggestError::InvalidQueryParam { .. })
    }
}

// Conversion from common error types
impl From<std::io::Error> for SuggestError {
    fn from(err: std::io::Error) -> Self {
        SuggestError::Io(err)
    }
}

impl From<serde_json::Error> for SuggestError {
    fn from(err: serde_json::Error) -> Self {
        SuggestError::SerializationFailed {
            message: format!("JSON serialization error: {}", err),
        }
    }
}
