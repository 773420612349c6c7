//! Async query executor
//!
//! Same stage semantics as [`QueryExecutor`](super::QueryExecutor), for
//! collections whose capability is asynchronous. Collection calls are
//! awaited one at a time; there is no cancellation beyond dropping the
//! returned future.

use crate::planner::QueryPlan;

use super::collection::AsyncCollection;
use super::errors::ExecutorResult;
use super::executor::{log_outcome, CollectionCall, PlanRun};
use super::result::GridResponse;

/// Query executor for async collections
pub struct AsyncQueryExecutor<'a, C: AsyncCollection> {
    collection: &'a C,
}

impl<'a, C: AsyncCollection> AsyncQueryExecutor<'a, C> {
    /// Creates a new executor
    pub fn new(collection: &'a C) -> Self {
        Self { collection }
    }

    /// Executes a query plan and returns one page of results.
    pub async fn execute(&self, plan: &QueryPlan) -> ExecutorResult<GridResponse> {
        let result = self.run(plan).await;
        log_outcome(&result);
        result
    }

    async fn run(&self, plan: &QueryPlan) -> ExecutorResult<GridResponse> {
        let mut run = PlanRun::default();

        for stage in &plan.stages {
            match run.step(stage)? {
                Some(CollectionCall::Count) => {
                    let total = self.collection.count().await?;
                    run.set_total(total);
                }
                Some(CollectionCall::Select) => {
                    let rows = self.collection.select(run.matcher()).await?;
                    run.set_rows(rows);
                }
                None => {}
            }
        }

        run.finish(plan.draw)
    }
}
