//! Validated request descriptor
//!
//! `ValidatedRequest` is only constructed by [`validate`]; downstream
//! code never reads the raw request.

use serde::Serialize;
use serde_json::{Map, Value};

use super::coerce::{is_truthy, no_empty, regex_escape, valid_bool, valid_int};
use super::errors::{ValidationError, ValidationResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Global free-text search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSpec {
    /// Search text. Already regex-escaped when `regex` is true.
    pub value: String,
    /// Pattern (substring) match instead of exact equality
    pub regex: bool,
}

impl SearchSpec {
    /// An empty value means no search.
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}

/// One order entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSpec {
    /// Index into `columns`; bounds are checked by the planner
    pub column: i64,
    pub dir: SortDirection,
}

/// One grid column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Field key the data source exposes
    pub data: String,
    /// Field key used for ordering
    pub name: String,
    pub searchable: bool,
    pub orderable: bool,
}

/// Fully validated grid request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedRequest {
    draw: i64,
    start: u64,
    length: i64,
    search: Option<SearchSpec>,
    order: Vec<OrderSpec>,
    columns: Vec<ColumnSpec>,
}

impl ValidatedRequest {
    /// Opaque echo token
    pub fn draw(&self) -> i64 {
        self.draw
    }

    /// Offset into the filtered result set
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Rows requested; negative means all
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Row limit, `None` when every row from `start` is requested
    pub fn limit(&self) -> Option<u64> {
        u64::try_from(self.length).ok()
    }

    pub fn search(&self) -> Option<&SearchSpec> {
        self.search.as_ref()
    }

    /// Never empty
    pub fn order(&self) -> &[OrderSpec] {
        &self.order
    }

    /// Never empty
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }
}

/// Validates a raw grid request, failing on the first invalid field.
///
/// Checking order: `draw`, `start`, `length`, `search`, `order`, `columns`.
pub fn validate(raw: &Value) -> ValidationResult<ValidatedRequest> {
    let params = raw
        .as_object()
        .ok_or_else(|| ValidationError::invalid_shape("request", "an object"))?;

    let draw = valid_int(params.get("draw"), "draw")?;
    let start = valid_int(params.get("start"), "start")?;
    let start = u64::try_from(start).map_err(|_| ValidationError::negative_integer("start"))?;
    let length = valid_int(params.get("length"), "length")?;

    let search = match params.get("search") {
        None | Some(Value::Null) => None,
        Some(Value::Object(search)) => Some(validate_search(search)?),
        Some(v) if !is_truthy(v) => None,
        Some(_) => return Err(ValidationError::invalid_shape("search", "an object")),
    };

    let order = non_empty_array(params, "order")?
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_order(entry, i))
        .collect::<ValidationResult<Vec<_>>>()?;

    let columns = non_empty_array(params, "columns")?
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_column(entry, i))
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(ValidatedRequest {
        draw,
        start,
        length,
        search,
        order,
        columns,
    })
}

fn validate_search(search: &Map<String, Value>) -> ValidationResult<SearchSpec> {
    let regex = valid_bool(search.get("regex"), "search.regex")?;

    let value = match search.get("value") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ValidationError::invalid_shape("search.value", "a string")),
    };

    let value = if regex { regex_escape(&value) } else { value };

    Ok(SearchSpec { value, regex })
}

fn non_empty_array<'a>(params: &'a Map<String, Value>, key: &str) -> ValidationResult<&'a [Value]> {
    match params.get(key) {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items.as_slice()),
        _ => Err(ValidationError::invalid_shape(key, "a non-empty array")),
    }
}

fn validate_order(entry: &Value, index: usize) -> ValidationResult<OrderSpec> {
    let path = format!("order[{}]", index);
    let entry = entry
        .as_object()
        .ok_or_else(|| ValidationError::invalid_shape(path.as_str(), "an object"))?;

    let column = valid_int(entry.get("column"), &format!("{}.column", path))?;

    let dir_path = format!("{}.dir", path);
    let dir = match no_empty(entry.get("dir"), &dir_path)?.as_str() {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        _ => return Err(ValidationError::invalid_direction(dir_path)),
    };

    Ok(OrderSpec { column, dir })
}

fn validate_column(entry: &Value, index: usize) -> ValidationResult<ColumnSpec> {
    let path = format!("columns[{}]", index);
    let entry = entry
        .as_object()
        .ok_or_else(|| ValidationError::invalid_shape(path.as_str(), "an object"))?;

    let data = no_empty(entry.get("data"), &format!("{}.data", path))?;
    let name = no_empty(entry.get("name"), &format!("{}.name", path))?;
    let searchable = optional_flag(entry.get("searchable"), &format!("{}.searchable", path))?;
    let orderable = optional_flag(entry.get("orderable"), &format!("{}.orderable", path))?;

    Ok(ColumnSpec {
        data,
        name,
        searchable,
        orderable,
    })
}

/// Absent or falsy flags are off and skip validation; truthy ones must
/// coerce to a boolean.
fn optional_flag(value: Option<&Value>, field: &str) -> ValidationResult<bool> {
    match value {
        Some(v) if is_truthy(v) => valid_bool(Some(v), field),
        _ => Ok(false),
    }
}
