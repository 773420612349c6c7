//! Field visibility policy
//!
//! The policy is trusted configuration. It decides which fields the
//! free-text search may look at and which fields may leave the system.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validator::ColumnSpec;

/// Default primary key name
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Where the sort stage runs relative to slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPlacement {
    /// Sort only the returned page (legacy pipeline order)
    #[default]
    AfterSlice,
    /// Sort the filtered set, then take the page
    BeforeSlice,
}

impl SortPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortPlacement::AfterSlice => "after_slice",
            SortPlacement::BeforeSlice => "before_slice",
        }
    }
}

/// Caller-supplied field policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPolicy {
    /// Fields visible to search; `None` uses columns flagged searchable
    #[serde(default)]
    pub searchable: Option<Vec<String>>,
    /// Output allow-list; `None` allows every requested column
    #[serde(default)]
    pub pluckable: Option<Vec<String>>,
    /// Field copied into `DT_RowId`
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub sort_placement: SortPlacement,
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self {
            searchable: None,
            pluckable: None,
            primary_key: default_primary_key(),
            sort_placement: SortPlacement::default(),
        }
    }
}

impl FieldPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the searchable field override
    pub fn with_searchable(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.searchable = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the output allow-list
    pub fn with_pluckable(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.pluckable = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = key.into();
        self
    }

    pub fn with_sort_placement(mut self, placement: SortPlacement) -> Self {
        self.sort_placement = placement;
        self
    }

    /// Resolves the policy against the requested columns.
    pub fn resolve(&self, columns: &[ColumnSpec]) -> ResolvedFields {
        let searchable = match &self.searchable {
            Some(fields) => fields.clone(),
            None => columns
                .iter()
                .filter(|c| c.searchable)
                .map(|c| c.data.clone())
                .collect(),
        };

        let mut default_row = Map::new();
        let pluckable = match &self.pluckable {
            Some(allowed) => columns
                .iter()
                .filter(|c| allowed.contains(&c.data))
                .map(|c| {
                    default_row.insert(c.data.clone(), Value::String(String::new()));
                    c.data.clone()
                })
                .collect(),
            None => columns.iter().map(|c| c.data.clone()).collect(),
        };

        ResolvedFields {
            searchable,
            pluckable,
            default_row,
        }
    }
}

/// Policy resolved once per request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFields {
    /// Fields the search filter inspects
    pub searchable: Vec<String>,
    /// Fields allowed in output rows (in column order)
    pub pluckable: Vec<String>,
    /// Empty-string defaults for allow-listed fields
    pub default_row: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(data: &str, searchable: bool) -> ColumnSpec {
        ColumnSpec {
            data: data.to_string(),
            name: data.to_string(),
            searchable,
            orderable: true,
        }
    }

    #[test]
    fn test_defaults() {
        let policy = FieldPolicy::default();
        assert_eq!(policy.primary_key, "id");
        assert_eq!(policy.sort_placement, SortPlacement::AfterSlice);
    }

    #[test]
    fn test_searchable_from_columns() {
        let cols = vec![column("name", true), column("email", false), column("city", true)];
        let resolved = FieldPolicy::default().resolve(&cols);
        assert_eq!(resolved.searchable, vec!["name", "city"]);
        assert_eq!(resolved.pluckable, vec!["name", "email", "city"]);
        assert!(resolved.default_row.is_empty());
    }

    #[test]
    fn test_searchable_override_wins() {
        let cols = vec![column("name", true)];
        let resolved = FieldPolicy::new().with_searchable(["bio"]).resolve(&cols);
        assert_eq!(resolved.searchable, vec!["bio"]);

        let resolved = FieldPolicy::new()
            .with_searchable(Vec::<String>::new())
            .resolve(&cols);
        assert!(resolved.searchable.is_empty());
    }

    #[test]
    fn test_pluckable_intersects_columns() {
        let cols = vec![column("name", false), column("password", false), column("age", false)];
        let resolved = FieldPolicy::new()
            .with_pluckable(["age", "name", "not_requested"])
            .resolve(&cols);

        assert_eq!(resolved.pluckable, vec!["name", "age"]);
        assert_eq!(resolved.default_row.len(), 2);
        assert_eq!(resolved.default_row["name"], Value::String(String::new()));
        assert!(!resolved.default_row.contains_key("password"));
    }

    #[test]
    fn test_policy_deserialize_defaults() {
        let policy: FieldPolicy = serde_json::from_str(r#"{"pluckable": ["a"]}"#).unwrap();
        assert_eq!(policy.primary_key, "id");
        assert!(policy.searchable.is_none());
        assert_eq!(policy.pluckable, Some(vec!["a".to_string()]));

        let policy: FieldPolicy =
            serde_json::from_str(r#"{"sort_placement": "before_slice"}"#).unwrap();
        assert_eq!(policy.sort_placement, SortPlacement::BeforeSlice);
    }
}
