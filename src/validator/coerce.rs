//! Field-level coercion helpers
//!
//! Request parameters arrive loosely typed: numbers as strings, booleans
//! as strings, and so on. These helpers accept the lenient forms grid
//! widgets send and reject everything else.

use serde_json::Value;

use super::errors::{ValidationError, ValidationResult};

/// Characters that carry meaning in a regex pattern and get escaped.
const REGEX_SPECIALS: &[char] = &[
    '-', '/', '\\', '^', '$', '*', '+', '?', '.', '(', ')', '|', '[', ']', '{', '}',
];

/// Requires a present, non-empty string.
pub fn no_empty(value: Option<&Value>, field: &str) -> ValidationResult<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            Err(ValidationError::empty_string(field))
        }
        Some(_) => Err(ValidationError::invalid_shape(field, "a non-empty string")),
    }
}

/// Coerces a value to an integer using leading-numeric parsing.
///
/// `"12"`, `" 12px"`, `12.7` and `"0x1f"` are accepted (12, 12, 12, 31);
/// anything without leading digits is rejected. Out-of-range digit runs
/// saturate to `i64::MAX` or `i64::MIN`.
pub fn valid_int(value: Option<&Value>, field: &str) -> ValidationResult<i64> {
    let text = value
        .map(loose_string)
        .ok_or_else(|| ValidationError::invalid_integer(field))?;
    parse_leading_int(&text).ok_or_else(|| ValidationError::invalid_integer(field))
}

/// Coerces a value to a boolean.
///
/// Only `"true"` and `"false"` are accepted, case-insensitively and with
/// surrounding whitespace ignored. JSON booleans qualify through their
/// string form.
pub fn valid_bool(value: Option<&Value>, field: &str) -> ValidationResult<bool> {
    let text = match value {
        None | Some(Value::Null) => return Err(ValidationError::invalid_boolean(field)),
        Some(v) => loose_string(v),
    };

    match text.to_lowercase().trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::invalid_boolean(field)),
    }
}

/// Prefixes every regex metacharacter with a backslash.
pub fn regex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if REGEX_SPECIALS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Loose truthiness: null, false, 0 and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form used for coercion. Arrays join their elements with commas.
fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => loose_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, &rest[2..])
    } else {
        (10, rest)
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Digit runs past the i64 range saturate
    let cap = i64::MAX as i128 + 1;
    let mut magnitude: i128 = 0;
    for c in digits[..end].chars() {
        let digit = c.to_digit(radix)? as i128;
        magnitude = (magnitude * radix as i128 + digit).min(cap);
    }

    let signed = if negative { -magnitude } else { magnitude };
    Some(signed.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
}
