//! Free-text search matching
//!
//! Field values are coerced to strings before comparison. A record
//! matches when ANY of the filter's fields matches; missing fields never
//! match, and a filter over zero fields matches nothing.

use std::borrow::Cow;

use regex::Regex;
use serde_json::Value;

use crate::planner::{MatchMode, SearchFilter};

/// A search filter with its pattern compiled once per execution
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    filter: SearchFilter,
    pattern: Option<Regex>,
}

impl SearchMatcher {
    /// Compiles the filter. Exact mode needs no pattern.
    pub fn compile(filter: &SearchFilter) -> Result<Self, regex::Error> {
        let pattern = match filter.mode {
            MatchMode::Pattern => Some(Regex::new(&filter.value)?),
            MatchMode::Exact => None,
        };
        Ok(Self {
            filter: filter.clone(),
            pattern,
        })
    }

    /// The filter description, for adapters that translate it
    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Checks if a record matches on any searchable field
    pub fn matches(&self, record: &Value) -> bool {
        self.filter.fields.iter().any(|field| {
            let Some(value) = record.get(field) else {
                return false;
            };
            let text = coerce_to_string(value);
            match &self.pattern {
                Some(re) => re.is_match(&text),
                None => text == self.filter.value,
            }
        })
    }
}

/// String form of a field value: strings as-is, scalars via display,
/// arrays and objects as compact JSON.
pub fn coerce_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matcher(fields: &[&str], value: &str, mode: MatchMode) -> SearchMatcher {
        let fields = fields.iter().map(|s| s.to_string()).collect();
        SearchMatcher::compile(&SearchFilter::new(fields, value, mode)).unwrap()
    }

    #[test]
    fn test_pattern_is_substring_match() {
        let m = matcher(&["name"], "foo", MatchMode::Pattern);
        assert!(m.matches(&json!({"name": "xfooy"})));
        assert!(!m.matches(&json!({"name": "FOO"})));
    }

    #[test]
    fn test_escaped_pattern_is_literal() {
        let m = matcher(&["name"], r"a\.b", MatchMode::Pattern);
        assert!(m.matches(&json!({"name": "xa.by"})));
        assert!(!m.matches(&json!({"name": "axb"})));
    }

    #[test]
    fn test_exact_match_after_coercion() {
        let m = matcher(&["age"], "42", MatchMode::Exact);
        assert!(m.matches(&json!({"age": 42})));
        assert!(m.matches(&json!({"age": "42"})));
        assert!(!m.matches(&json!({"age": 420})));
    }

    #[test]
    fn test_any_field_matches() {
        let m = matcher(&["name", "city"], "Oslo", MatchMode::Exact);
        assert!(m.matches(&json!({"name": "Ann", "city": "Oslo"})));
        assert!(!m.matches(&json!({"name": "Ann", "city": "Bergen"})));
    }

    #[test]
    fn test_missing_field_no_match() {
        let m = matcher(&["email"], "x", MatchMode::Pattern);
        assert!(!m.matches(&json!({"name": "x"})));
    }

    #[test]
    fn test_no_fields_matches_nothing() {
        let m = matcher(&[], "x", MatchMode::Pattern);
        assert!(!m.matches(&json!({"name": "x"})));
    }

    #[test]
    fn test_coerce_to_string() {
        assert_eq!(coerce_to_string(&json!("s")), "s");
        assert_eq!(coerce_to_string(&json!(true)), "true");
        assert_eq!(coerce_to_string(&json!(null)), "null");
        assert_eq!(coerce_to_string(&json!(1.5)), "1.5");
        assert_eq!(coerce_to_string(&json!([1, 2])), "[1,2]");
    }
}
