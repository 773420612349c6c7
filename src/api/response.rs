//! API response types
//!
//! Success is a [`GridResponse`] page. Failures use the grid protocol's
//! error shape, `{draw, error}`, plus the originating error code.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::executor::GridResponse;
use crate::validator::coerce::valid_int;

use super::errors::ApiError;

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Echoed draw token, 0 when the request's own draw was unusable
    pub draw: i64,
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    /// Create from an API error
    pub fn from_error(draw: i64, err: &ApiError) -> Self {
        Self {
            draw,
            error: err.message().to_string(),
            code: err.code().to_string(),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Success(GridResponse),
    Error(ErrorResponse),
}

impl Response {
    /// Create a success response
    pub fn success(page: GridResponse) -> Self {
        Response::Success(page)
    }

    /// Create an error response, echoing whatever draw the raw request carried
    pub fn error(raw: &Value, err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(echo_draw(raw), err))
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn draw(&self) -> i64 {
        match self {
            Response::Success(page) => page.draw,
            Response::Error(err) => err.draw,
        }
    }
}

fn echo_draw(raw: &Value) -> i64 {
    valid_int(raw.get("draw"), "draw").unwrap_or(0)
}
