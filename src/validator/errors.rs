//! Validation error types
//!
//! Error codes:
//! - GRID_VALIDATION_INVALID_INTEGER (REJECT)
//! - GRID_VALIDATION_INVALID_BOOLEAN (REJECT)
//! - GRID_VALIDATION_EMPTY_STRING (REJECT)
//! - GRID_VALIDATION_INVALID_SHAPE (REJECT)
//! - GRID_VALIDATION_INVALID_DIRECTION (REJECT)

use std::fmt;

/// Severity levels for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Validation-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Value is not parseable as an integer
    InvalidInteger,
    /// Value is not "true" or "false"
    InvalidBoolean,
    /// Required string is empty or missing
    EmptyString,
    /// Field has the wrong JSON shape (missing array, non-object, ...)
    InvalidShape,
    /// Order direction is not "asc" or "desc"
    InvalidDirection,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::InvalidInteger => "GRID_VALIDATION_INVALID_INTEGER",
            ValidationErrorCode::InvalidBoolean => "GRID_VALIDATION_INVALID_BOOLEAN",
            ValidationErrorCode::EmptyString => "GRID_VALIDATION_EMPTY_STRING",
            ValidationErrorCode::InvalidShape => "GRID_VALIDATION_INVALID_SHAPE",
            ValidationErrorCode::InvalidDirection => "GRID_VALIDATION_INVALID_DIRECTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation error naming the offending request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    message: String,
    field: String,
}

impl ValidationError {
    /// Field could not be coerced to an integer
    pub fn invalid_integer(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: ValidationErrorCode::InvalidInteger,
            message: format!("Request parameter `{}` must be a valid integer value", f),
            field: f,
        }
    }

    /// Integer field is below its allowed minimum
    pub fn negative_integer(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: ValidationErrorCode::InvalidInteger,
            message: format!("Request parameter `{}` must not be negative", f),
            field: f,
        }
    }

    /// Field could not be coerced to a boolean
    pub fn invalid_boolean(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: ValidationErrorCode::InvalidBoolean,
            message: format!("Request parameter `{}` must be a valid boolean value", f),
            field: f,
        }
    }

    /// Required string is missing or empty
    pub fn empty_string(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: ValidationErrorCode::EmptyString,
            message: format!("Request parameter `{}` must not be an empty string", f),
            field: f,
        }
    }

    /// Field has the wrong shape
    pub fn invalid_shape(field: impl Into<String>, expected: &str) -> Self {
        let f = field.into();
        Self {
            code: ValidationErrorCode::InvalidShape,
            message: format!("Request parameter `{}` must be {}", f, expected),
            field: f,
        }
    }

    /// Order direction outside asc/desc
    pub fn invalid_direction(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: ValidationErrorCode::InvalidDirection,
            message: format!("Request parameter `{}` must be asc or desc", f),
            field: f,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
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

    /// Returns the offending field path, e.g. `order[0].dir`
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ValidationErrorCode::InvalidInteger.code(),
            "GRID_VALIDATION_INVALID_INTEGER"
        );
        assert_eq!(
            ValidationErrorCode::InvalidShape.code(),
            "GRID_VALIDATION_INVALID_SHAPE"
        );
    }

    #[test]
    fn test_error_names_field() {
        let err = ValidationError::invalid_integer("draw");
        assert_eq!(err.field(), "draw");
        assert!(err.message().contains("`draw`"));

        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("GRID_VALIDATION_INVALID_INTEGER"));
    }
}
