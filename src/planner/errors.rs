//! Planner error types
//!
//! Error codes:
//! - GRID_PLAN_SORT_COLUMN_OUT_OF_RANGE (REJECT)

use std::fmt;

/// Severity levels for planner errors
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

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanErrorCode {
    /// `order[0].column` does not index an existing column
    SortColumnOutOfRange,
}

impl PlanErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlanErrorCode::SortColumnOutOfRange => "GRID_PLAN_SORT_COLUMN_OUT_OF_RANGE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlanErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanError {
    code: PlanErrorCode,
    message: String,
    column_index: Option<i64>,
}

impl PlanError {
    /// Create a sort column out of range error
    pub fn sort_column_out_of_range(index: i64, column_count: usize) -> Self {
        Self {
            code: PlanErrorCode::SortColumnOutOfRange,
            message: format!(
                "Order column index {} is out of range ({} columns)",
                index, column_count
            ),
            column_index: Some(index),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlanErrorCode {
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

    /// Returns the offending column index if applicable
    pub fn column_index(&self) -> Option<i64> {
        self.column_index
    }
}

impl fmt::Display for PlanError {
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

impl std::error::Error for PlanError {}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::sort_column_out_of_range(7, 2);
        let display = format!("{}", err);
        assert!(display.contains("GRID_PLAN_SORT_COLUMN_OUT_OF_RANGE"));
        assert!(display.contains('7'));
        assert_eq!(err.column_index(), Some(7));
    }
}
