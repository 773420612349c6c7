//! Collection capability
//!
//! The executor needs two things from a data source: the size of the
//! unfiltered collection, and the filtered rows as concrete JSON objects.
//! Slicing, merging, sorting and projection run on the materialized rows.

use std::fs;
use std::future::Future;
use std::path::Path;

use serde_json::Value;

use super::errors::{CollectionError, CollectionResult};
use super::filters::SearchMatcher;

/// Synchronous collection capability
pub trait Collection {
    /// Number of records before any filtering
    fn count(&self) -> CollectionResult<u64>;

    /// Records passing the filter (all records when `None`), materialized
    fn select(&self, filter: Option<&SearchMatcher>) -> CollectionResult<Vec<Value>>;
}

/// Asynchronous collection capability
///
/// The executor keeps at most one of these futures outstanding.
pub trait AsyncCollection {
    fn count(&self) -> impl Future<Output = CollectionResult<u64>> + Send;

    fn select(
        &self,
        filter: Option<&SearchMatcher>,
    ) -> impl Future<Output = CollectionResult<Vec<Value>>> + Send;
}

/// In-memory collection of JSON objects
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    records: Vec<Value>,
}

impl MemoryCollection {
    /// Creates a collection from records
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Parses a JSON array of objects
    pub fn from_json_str(json: &str) -> CollectionResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CollectionError::with_source("Invalid records JSON", e))?;

        let Value::Array(records) = value else {
            return Err(CollectionError::new("Records must be a JSON array"));
        };

        if let Some(pos) = records.iter().position(|r| !r.is_object()) {
            return Err(CollectionError::new(format!(
                "Record {} is not a JSON object",
                pos
            )));
        }

        Ok(Self::new(records))
    }

    /// Loads a JSON array of objects from a file
    pub fn from_path(path: &Path) -> CollectionResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CollectionError::with_source(format!("Failed to read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records
    pub fn records(&self) -> &[Value] {
        &self.records
    }
}

impl Collection for MemoryCollection {
    fn count(&self) -> CollectionResult<u64> {
        Ok(self.records.len() as u64)
    }

    fn select(&self, filter: Option<&SearchMatcher>) -> CollectionResult<Vec<Value>> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.map_or(true, |m| m.matches(record)))
            .cloned()
            .collect())
    }
}

impl AsyncCollection for MemoryCollection {
    async fn count(&self) -> CollectionResult<u64> {
        Collection::count(self)
    }

    async fn select(&self, filter: Option<&SearchMatcher>) -> CollectionResult<Vec<Value>> {
        Collection::select(self, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{MatchMode, SearchFilter};
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_count_and_select_all() {
        let coll = MemoryCollection::new(vec![json!({"a": 1}), json!({"a": 2})]);
        assert_eq!(Collection::count(&coll).unwrap(), 2);
        assert_eq!(Collection::select(&coll, None).unwrap().len(), 2);
    }

    #[test]
    fn test_select_filtered() {
        let coll = MemoryCollection::new(vec![json!({"a": "x1"}), json!({"a": "y"})]);
        let filter = SearchFilter::new(vec!["a".into()], "x", MatchMode::Pattern);
        let matcher = SearchMatcher::compile(&filter).unwrap();

        let rows = Collection::select(&coll, Some(&matcher)).unwrap();
        assert_eq!(rows, vec![json!({"a": "x1"})]);
    }

    #[test]
    fn test_from_json_str_requires_array_of_objects() {
        assert_eq!(
            MemoryCollection::from_json_str(r#"[{"id": 1}]"#).unwrap().len(),
            1
        );
        assert!(MemoryCollection::from_json_str(r#"{"id": 1}"#).is_err());
        assert!(MemoryCollection::from_json_str(r#"[{"id": 1}, 5]"#).is_err());
        assert!(MemoryCollection::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1}}, {{"id": 2}}]"#).unwrap();

        let coll = MemoryCollection::from_path(file.path()).unwrap();
        assert_eq!(coll.len(), 2);

        let missing = MemoryCollection::from_path(Path::new("/nonexistent/records.json"));
        assert!(missing.is_err());
    }
}
