//! Query planner
//!
//! Produces deterministic stage pipelines from validated grid requests.
//!
//! Stage order:
//! 1. Count the raw collection (`recordsTotal`)
//! 2. Filter on the free-text search, if any
//! 3. Materialize and count (`recordsFiltered`)
//! 4. Slice the requested page
//! 5. Merge `DT_RowId` and the default row
//! 6. Sort on the first order entry
//! 7. Project the allow-listed fields
//!
//! With `SortPlacement::BeforeSlice` the sort moves ahead of step 4.

use serde::Serialize;

use crate::observability::{Event, Logger};
use crate::validator::{SortDirection, ValidatedRequest};

use super::errors::{PlanError, PlanResult};
use super::policy::{FieldPolicy, SortPlacement};
use super::stage::{MatchMode, SearchFilter, SliceBounds, SortSpec, Stage, ROW_ID_FIELD};

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    /// Echo token copied from the request
    pub draw: i64,
    /// Stages in execution order
    pub stages: Vec<Stage>,
}

impl QueryPlan {
    /// Returns the filter stage, if the plan searches
    pub fn filter(&self) -> Option<&SearchFilter> {
        self.stages.iter().find_map(|s| match s {
            Stage::Filter(f) => Some(f),
            _ => None,
        })
    }

    /// Returns the sort stage
    pub fn sort(&self) -> Option<&SortSpec> {
        self.stages.iter().find_map(|s| match s {
            Stage::Sort(spec) => Some(spec),
            _ => None,
        })
    }

    /// Returns the projected field list
    pub fn projection(&self) -> Option<&[String]> {
        self.stages.iter().find_map(|s| match s {
            Stage::Project { fields } => Some(fields.as_slice()),
            _ => None,
        })
    }
}

/// Query planner bound to one field policy
pub struct QueryPlanner<'a> {
    policy: &'a FieldPolicy,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a new planner
    pub fn new(policy: &'a FieldPolicy) -> Self {
        Self { policy }
    }

    /// Plans a request, returning an immutable plan or error.
    ///
    /// This method is deterministic: same inputs → same plan.
    pub fn plan(&self, request: &ValidatedRequest) -> PlanResult<QueryPlan> {
        // Resolve the policy once; nothing below re-derives it
        let fields = self.policy.resolve(request.columns());

        let sort = self.resolve_sort(request)?;

        let filter = request
            .search()
            .filter(|search| search.is_active())
            .map(|search| {
                let mode = if search.regex {
                    MatchMode::Pattern
                } else {
                    MatchMode::Exact
                };
                SearchFilter::new(fields.searchable.clone(), search.value.clone(), mode)
            });

        let mut projection = fields.pluckable;
        if !projection.iter().any(|f| f == ROW_ID_FIELD) {
            projection.push(ROW_ID_FIELD.to_string());
        }

        let mut stages = vec![Stage::CountTotal];
        if let Some(filter) = filter {
            stages.push(Stage::Filter(filter));
        }
        stages.push(Stage::Materialize);
        stages.push(Stage::CountFiltered);
        if self.policy.sort_placement == SortPlacement::BeforeSlice {
            stages.push(Stage::Sort(sort.clone()));
        }
        stages.push(Stage::Slice(SliceBounds::from_length(
            request.start(),
            request.length(),
        )));
        stages.push(Stage::MergeRowId {
            primary_key: self.policy.primary_key.clone(),
        });
        stages.push(Stage::MergeDefaults {
            defaults: fields.default_row,
        });
        if self.policy.sort_placement == SortPlacement::AfterSlice {
            stages.push(Stage::Sort(sort));
        }
        stages.push(Stage::Project { fields: projection });

        let stage_count = stages.len().to_string();
        let draw = request.draw().to_string();
        Logger::trace(
            Event::PlanBuilt.as_str(),
            &[
                ("draw", draw.as_str()),
                ("sort_placement", self.policy.sort_placement.as_str()),
                ("stages", stage_count.as_str()),
            ],
        );

        Ok(QueryPlan {
            draw: request.draw(),
            stages,
        })
    }

    /// Resolves `order[0]` into a sort on the referenced column's name.
    fn resolve_sort(&self, request: &ValidatedRequest) -> PlanResult<SortSpec> {
        let columns = request.columns();
        let first = request.order()[0];

        let column = usize::try_from(first.column)
            .ok()
            .and_then(|i| columns.get(i))
            .ok_or_else(|| PlanError::sort_column_out_of_range(first.column, columns.len()))?;

        Ok(match first.dir {
            SortDirection::Desc => SortSpec::desc(column.name.clone()),
            SortDirection::Asc => SortSpec::asc(column.name.clone()),
        })
    }
}
