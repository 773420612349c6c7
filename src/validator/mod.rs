//! Request Validator subsystem for gridquery
//!
//! Turns an untrusted grid request into a [`ValidatedRequest`].
//!
//! # Design Principles
//!
//! - Total: every field read downstream is validated here first
//! - Fail fast: the first invalid field aborts validation
//! - Pure: no side effects beyond the returned error
//!
//! # Checking Order
//!
//! 1. `draw`, `start`, `length` (integer coercion)
//! 2. `search` (boolean `regex`, escaped `value`)
//! 3. `order` (non-empty array of column index + direction)
//! 4. `columns` (non-empty array of data/name + optional flags)

pub mod coerce;
mod errors;
mod request;

pub use errors::{Severity, ValidationError, ValidationErrorCode, ValidationResult};
pub use request::{
    validate, ColumnSpec, OrderSpec, SearchSpec, SortDirection, ValidatedRequest,
};
