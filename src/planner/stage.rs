//! Pipeline stages
//!
//! A query plan is an ordered list of stages. Executors interpret the
//! stages in order; the planner never touches data.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::validator::SortDirection;

/// Synthetic row identifier injected into every output row
pub const ROW_ID_FIELD: &str = "DT_RowId";

/// How the search value is compared against a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Field (as string) contains a match of the pattern
    Pattern,
    /// Field (as string) equals the value
    Exact,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Pattern => "pattern",
            MatchMode::Exact => "exact",
        }
    }
}

/// Free-text filter: a record passes if ANY field matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    pub fields: Vec<String>,
    /// Pattern source when `mode` is `Pattern` (already escaped)
    pub value: String,
    pub mode: MatchMode,
}

impl SearchFilter {
    pub fn new(fields: Vec<String>, value: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            fields,
            value: value.into(),
            mode,
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Half-open row range `[start, end)`; `end == None` runs to the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliceBounds {
    pub start: u64,
    pub end: Option<u64>,
}

impl SliceBounds {
    /// Builds bounds from an offset and a grid `length` (negative = all)
    pub fn from_length(start: u64, length: i64) -> Self {
        let end = u64::try_from(length).ok().map(|len| start.saturating_add(len));
        Self { start, end }
    }

    /// Index range into a slice of `len` rows, clamped
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let clamp = |v: u64| usize::try_from(v).unwrap_or(usize::MAX).min(len);
        let start = clamp(self.start);
        let end = self.end.map(clamp).unwrap_or(len).max(start);
        start..end
    }
}

/// One step of a query plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    /// Count the unfiltered collection into `recordsTotal`
    CountTotal,
    /// Restrict the collection with the free-text filter
    Filter(SearchFilter),
    /// Fetch the (filtered) collection as concrete rows
    Materialize,
    /// Count materialized rows into `recordsFiltered`
    CountFiltered,
    /// Keep rows in `[start, end)`
    Slice(SliceBounds),
    /// Copy `row[primary_key]` into `DT_RowId`
    MergeRowId { primary_key: String },
    /// Fill absent keys from the default row; present keys win
    MergeDefaults { defaults: Map<String, Value> },
    /// Stable sort on one field
    Sort(SortSpec),
    /// Keep only the listed fields
    Project { fields: Vec<String> },
}

impl Stage {
    /// Short name for logs and explain output
    pub fn name(&self) -> &'static str {
        match self {
            Stage::CountTotal => "COUNT_TOTAL",
            Stage::Filter(_) => "FILTER",
            Stage::Materialize => "MATERIALIZE",
            Stage::CountFiltered => "COUNT_FILTERED",
            Stage::Slice(_) => "SLICE",
            Stage::MergeRowId { .. } => "MERGE_ROW_ID",
            Stage::MergeDefaults { .. } => "MERGE_DEFAULTS",
            Stage::Sort(_) => "SORT",
            Stage::Project { .. } => "PROJECT",
        }
    }
}
