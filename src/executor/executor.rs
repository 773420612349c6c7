//! Query executor for gridquery
//!
//! Interprets a plan's stages in order against a collection.
//!
//! Execution flow:
//! 1. `CountTotal` asks the collection for its size
//! 2. `Filter` compiles the search matcher
//! 3. `Materialize` fetches the (filtered) rows from the collection
//! 4. Every later stage runs on the materialized rows
//!
//! Row stages before `Materialize` make the plan malformed.

use serde_json::{Map, Value};

use crate::observability::{Event, Logger};
use crate::planner::{QueryPlan, Stage, ROW_ID_FIELD};

use super::collection::Collection;
use super::errors::{ExecutorError, ExecutorResult};
use super::filters::SearchMatcher;
use super::result::GridResponse;
use super::sorter::RowSorter;

/// Collection call a stage needs before the run can continue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CollectionCall {
    Count,
    Select,
}

/// Execution state shared by the sync and async executors
#[derive(Debug, Default)]
pub(crate) struct PlanRun {
    records_total: Option<u64>,
    records_filtered: Option<u64>,
    matcher: Option<SearchMatcher>,
    rows: Option<Vec<Value>>,
}

impl PlanRun {
    /// Applies a stage locally, or reports the collection call it needs.
    pub(crate) fn step(&mut self, stage: &Stage) -> ExecutorResult<Option<CollectionCall>> {
        match stage {
            Stage::CountTotal => Ok(Some(CollectionCall::Count)),
            Stage::Filter(filter) => {
                if self.rows.is_some() {
                    return Err(ExecutorError::malformed("Filter after Materialize"));
                }
                self.matcher = Some(SearchMatcher::compile(filter)?);
                Ok(None)
            }
            Stage::Materialize => {
                if self.rows.is_some() {
                    return Err(ExecutorError::malformed("Materialize repeated"));
                }
                Ok(Some(CollectionCall::Select))
            }
            other => {
                let rows = self.rows.as_mut().ok_or_else(|| {
                    ExecutorError::malformed(format!("{} before Materialize", other.name()))
                })?;
                if let Stage::CountFiltered = other {
                    self.records_filtered = Some(rows.len() as u64);
                } else {
                    apply_row_stage(other, rows)?;
                }
                Ok(None)
            }
        }
    }

    pub(crate) fn matcher(&self) -> Option<&SearchMatcher> {
        self.matcher.as_ref()
    }

    pub(crate) fn set_total(&mut self, total: u64) {
        self.records_total = Some(total);
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = Some(rows);
    }

    /// Builds the response once every stage ran
    pub(crate) fn finish(self, draw: i64) -> ExecutorResult<GridResponse> {
        let records_total = self
            .records_total
            .ok_or_else(|| ExecutorError::malformed("Plan has no CountTotal stage"))?;
        let records_filtered = self
            .records_filtered
            .ok_or_else(|| ExecutorError::malformed("Plan has no CountFiltered stage"))?;
        let data = self
            .rows
            .ok_or_else(|| ExecutorError::malformed("Plan has no Materialize stage"))?;

        Ok(GridResponse {
            draw,
            records_total,
            records_filtered,
            data,
        })
    }
}

/// Applies a stage that works on materialized rows
fn apply_row_stage(stage: &Stage, rows: &mut Vec<Value>) -> ExecutorResult<()> {
    match stage {
        Stage::Slice(bounds) => {
            let range = bounds.range(rows.len());
            rows.truncate(range.end);
            rows.drain(..range.start);
        }
        Stage::MergeRowId { primary_key } => {
            for (i, row) in rows.iter_mut().enumerate() {
                let obj = object_mut(row, i)?;
                let id = obj.get(primary_key).cloned().unwrap_or(Value::Null);
                obj.insert(ROW_ID_FIELD.to_string(), id);
            }
        }
        Stage::MergeDefaults { defaults } => {
            for (i, row) in rows.iter_mut().enumerate() {
                let obj = object_mut(row, i)?;
                for (key, value) in defaults {
                    obj.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
        Stage::Sort(spec) => RowSorter::sort(rows, spec),
        Stage::Project { fields } => {
            for (i, row) in rows.iter_mut().enumerate() {
                let obj = object_mut(row, i)?;
                obj.retain(|key, _| fields.iter().any(|f| f == key));
            }
        }
        Stage::CountTotal | Stage::Filter(_) | Stage::Materialize | Stage::CountFiltered => {
            return Err(ExecutorError::malformed(format!(
                "{} is not a row stage",
                stage.name()
            )));
        }
    }
    Ok(())
}

fn object_mut(row: &mut Value, index: usize) -> ExecutorResult<&mut Map<String, Value>> {
    row.as_object_mut().ok_or(ExecutorError::InvalidRow(index))
}

pub(crate) fn log_outcome(result: &ExecutorResult<GridResponse>) {
    match result {
        Ok(resp) => {
            let draw = resp.draw.to_string();
            let total = resp.records_total.to_string();
            let filtered = resp.records_filtered.to_string();
            let rows = resp.data.len().to_string();
            Logger::info(
                Event::QueryComplete.as_str(),
                &[
                    ("draw", draw.as_str()),
                    ("records_filtered", filtered.as_str()),
                    ("records_total", total.as_str()),
                    ("rows", rows.as_str()),
                ],
            );
        }
        Err(err) => {
            let message = err.to_string();
            Logger::error(
                Event::QueryFailed.as_str(),
                &[("code", err.code()), ("message", message.as_str())],
            );
        }
    }
}

/// Query executor that runs plans against a collection
pub struct QueryExecutor<'a, C: Collection> {
    collection: &'a C,
}

impl<'a, C: Collection> QueryExecutor<'a, C> {
    /// Creates a new executor
    pub fn new(collection: &'a C) -> Self {
        Self { collection }
    }

    /// Executes a query plan and returns one page of results.
    ///
    /// This method is deterministic: same plan + same data = same results.
    pub fn execute(&self, plan: &QueryPlan) -> ExecutorResult<GridResponse> {
        let result = self.run(plan);
        log_outcome(&result);
        result
    }

    fn run(&self, plan: &QueryPlan) -> ExecutorResult<GridResponse> {
        let mut run = PlanRun::default();

        for stage in &plan.stages {
            match run.step(stage)? {
                Some(CollectionCall::Count) => {
                    let total = self.collection.count()?;
                    run.set_total(total);
                }
                Some(CollectionCall::Select) => {
                    let rows = self.collection.select(run.matcher())?;
                    run.set_rows(rows);
                }
                None => {}
            }
        }

        run.finish(plan.draw)
    }
}
