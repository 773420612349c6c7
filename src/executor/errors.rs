//! # Executor Errors
//!
//! Collection failures are passed through with their original source;
//! the executor adds no interpretation beyond the error code.

use thiserror::Error;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Result type for collection capabilities
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Failure reported by a collection adapter
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CollectionError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl CollectionError {
    /// Create a collection error without an underlying cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a collection error wrapping the driver's error
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Executor errors
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The collection capability failed
    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    /// Stage sequence cannot be interpreted
    #[error("Malformed plan: {0}")]
    MalformedPlan(String),

    /// Search pattern failed to compile
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Collection produced a row that is not a JSON object
    #[error("Row {0} is not an object")]
    InvalidRow(usize),
}

impl ExecutorError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::Collection(_) => "GRID_EXEC_COLLECTION_FAILED",
            ExecutorError::MalformedPlan(_) => "GRID_EXEC_MALFORMED_PLAN",
            ExecutorError::InvalidPattern(_) => "GRID_EXEC_INVALID_PATTERN",
            ExecutorError::InvalidRow(_) => "GRID_EXEC_INVALID_ROW",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ExecutorError::MalformedPlan(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_collection_error_keeps_source() {
        let err = CollectionError::with_source(
            "connection lost",
            io::Error::new(io::ErrorKind::BrokenPipe, "pipe"),
        );
        assert_eq!(err.message(), "connection lost");
        assert!(err.source().is_some());

        let exec: ExecutorError = err.into();
        assert_eq!(exec.code(), "GRID_EXEC_COLLECTION_FAILED");
        assert!(exec.to_string().contains("connection lost"));
    }

    #[test]
    fn test_malformed_plan_code() {
        let err = ExecutorError::malformed("no count");
        assert_eq!(err.code(), "GRID_EXEC_MALFORMED_PLAN");
        assert_eq!(err.to_string(), "Malformed plan: no count");
    }
}
