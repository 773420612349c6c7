//! API Layer for gridquery
//!
//! One entry point per grid request: validate, plan, execute.
//!
//! # Design Principles
//!
//! - Strict request handling flow
//! - Error codes passed through unchanged
//! - Errors rendered in the grid protocol shape with the draw echoed
//!
//! # Supported Operations
//!
//! - query (sync and async collections)
//! - explain
//! - validate

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, ErrorClass};
pub use handler::{check_request, plan_request, GridHandler};
pub use request::GridRequest;
pub use response::{ErrorResponse, Response};
