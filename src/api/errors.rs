//! API error types
//!
//! API errors are pass-through: they preserve the original error codes
//! from lower subsystems (Validator, Planner, Executor).

use std::fmt;

/// Which side of the call is at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad request; the caller should fix its input
    Client,
    /// Collection or execution failure
    Server,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Client => write!(f, "CLIENT"),
            ErrorClass::Server => write!(f, "SERVER"),
        }
    }
}

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Request text is not a parseable request
    InvalidRequest,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidRequest => "GRID_INVALID_REQUEST",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with preserved subsystem error information
#[derive(Debug)]
pub struct ApiError {
    /// Original error code string (from subsystem or API)
    code: String,
    message: String,
    class: ErrorClass,
}

impl ApiError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::InvalidRequest.code().to_string(),
            message: reason.into(),
            class: ErrorClass::Client,
        }
    }

    /// Create from a validation error (pass-through)
    pub fn from_validation_error(err: crate::validator::ValidationError) -> Self {
        Self {
            code: err.code().code().to_string(),
            message: err.message().to_string(),
            class: ErrorClass::Client,
        }
    }

    /// Create from a planner error (pass-through)
    pub fn from_plan_error(err: crate::planner::PlanError) -> Self {
        Self {
            code: err.code().code().to_string(),
            message: err.message().to_string(),
            class: ErrorClass::Client,
        }
    }

    /// Create from an executor error (pass-through)
    pub fn from_executor_error(err: crate::executor::ExecutorError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            class: ErrorClass::Server,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    /// Returns whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self.class, ErrorClass::Client)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.class, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
