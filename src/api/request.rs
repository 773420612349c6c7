//! Raw grid request parsing
//!
//! Requests arrive either as a JSON body or as form pairs using bracket
//! notation (`columns[0][data]=name`). Both produce the same untyped
//! JSON tree for the validator.

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};

/// An unvalidated grid request
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest(Value);

impl GridRequest {
    /// Parse a request from JSON text
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;
        if !raw.is_object() {
            return Err(ApiError::invalid_request("Request must be a JSON object"));
        }
        Ok(Self(raw))
    }

    /// Parse a request from decoded form pairs.
    ///
    /// Numeric bracket segments build arrays (in index order); `[]`
    /// appends. All leaf values stay strings.
    pub fn from_form_pairs<I, K, V>(pairs: I) -> ApiResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut root = Map::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let path = split_key(key)?;
            insert_path(&mut root, &path, value.as_ref(), key)?;
        }
        Ok(Self(arrays_from_indexed(Value::Object(root))))
    }

    /// Returns the raw request tree
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Splits `a[b][0]` into `["a", "b", "0"]`.
fn split_key(key: &str) -> ApiResult<Vec<String>> {
    let malformed = || ApiError::invalid_request(format!("Malformed form key: {}", key));

    let (base, mut rest) = match key.find('[') {
        Some(pos) => (&key[..pos], &key[pos..]),
        None => (key, ""),
    };
    if base.is_empty() {
        return Err(malformed());
    }

    let mut path = vec![base.to_string()];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = inner.find(']').ok_or_else(malformed)?;
        path.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }
    Ok(path)
}

fn insert_path(node: &mut Map<String, Value>, path: &[String], value: &str, key: &str) -> ApiResult<()> {
    let conflict = || ApiError::invalid_request(format!("Conflicting form key: {}", key));

    let (head, tail) = match path.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    // `[]` appends after the highest index present
    let segment = if head.is_empty() {
        next_index(node).to_string()
    } else {
        head.clone()
    };

    if tail.is_empty() {
        if node.contains_key(&segment) {
            return Err(conflict());
        }
        node.insert(segment, Value::String(value.to_string()));
        return Ok(());
    }

    let child = node
        .entry(segment)
        .or_insert_with(|| Value::Object(Map::new()));
    match child {
        Value::Object(map) => insert_path(map, tail, value, key),
        _ => Err(conflict()),
    }
}

fn next_index(node: &Map<String, Value>) -> usize {
    node.keys()
        .filter_map(|k| k.parse::<usize>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

/// Turns objects keyed only by indices into arrays, recursively.
fn arrays_from_indexed(value: Value) -> Value {
    let map = match value {
        Value::Object(map) => map,
        other => return other,
    };

    let all_indexed = !map.is_empty() && map.keys().all(|k| k.parse::<usize>().is_ok());
    if all_indexed {
        let mut items: Vec<(usize, Value)> = map
            .into_iter()
            .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, arrays_from_indexed(v))))
            .collect();
        items.sort_by_key(|(i, _)| *i);
        Value::Array(items.into_iter().map(|(_, v)| v).collect())
    } else {
        Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, arrays_from_indexed(v)))
                .collect(),
        )
    }
}
