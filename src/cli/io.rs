//! JSON I/O handling for CLI
//!
//! - Input: one JSON request object, from stdin or a file
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::api::GridRequest;

use super::errors::{CliError, CliResult};

/// Read a JSON request from `input`, or from stdin when `None`
pub fn read_request(input: Option<&Path>) -> CliResult<Value> {
    let text = match input {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read request {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_request(&text)
}

/// Parse request text; the body must be a single JSON object
pub fn parse_request(text: &str) -> CliResult<Value> {
    if text.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    GridRequest::parse(text)
        .map(GridRequest::into_value)
        .map_err(|e| CliError::io_error(e.message()))
}

/// Write any serializable value as one JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}
