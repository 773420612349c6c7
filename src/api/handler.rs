//! API Handler for gridquery
//!
//! Runs one grid request through validation, planning and execution.
//! Each stage fails fast; the first error is returned unchanged in code.

use serde_json::Value;

use crate::executor::{AsyncCollection, AsyncQueryExecutor, Collection, GridResponse, QueryExecutor};
use crate::observability::{Event, Logger};
use crate::planner::{ExplainPlan, FieldPolicy, QueryPlan, QueryPlanner};
use crate::validator::{validate, ValidationError};

use super::errors::{ApiError, ApiResult};
use super::request::GridRequest;
use super::response::Response;

/// Validates a raw request and builds its plan.
pub fn plan_request(raw: &Value, policy: &FieldPolicy) -> ApiResult<QueryPlan> {
    let validated = validate(raw).map_err(|err| {
        log_rejection(Event::RequestRejected, err.code().code(), err.message(), err.field());
        ApiError::from_validation_error(err)
    })?;

    QueryPlanner::new(policy).plan(&validated).map_err(|err| {
        log_rejection(Event::PlanRejected, err.code().code(), err.message(), "order");
        ApiError::from_plan_error(err)
    })
}

fn log_rejection(event: Event, code: &str, message: &str, field: &str) {
    Logger::warn(
        event.as_str(),
        &[("code", code), ("field", field), ("message", message)],
    );
}

/// Grid request handler over one collection
pub struct GridHandler<'a, C> {
    policy: &'a FieldPolicy,
    collection: &'a C,
}

impl<'a, C> GridHandler<'a, C> {
    /// Create a new handler
    pub fn new(policy: &'a FieldPolicy, collection: &'a C) -> Self {
        Self { policy, collection }
    }

    /// Explain the plan a request would run, without touching the collection
    pub fn explain(&self, raw: &Value) -> ExplainPlan {
        match plan_request(raw, self.policy) {
            Ok(plan) => ExplainPlan::from_plan(&plan),
            Err(err) => ExplainPlan::rejected(err.code(), err.message()),
        }
    }
}

impl<'a, C: Collection> GridHandler<'a, C> {
    /// Handle a parsed request tree
    pub fn handle(&self, raw: &Value) -> ApiResult<GridResponse> {
        let plan = plan_request(raw, self.policy)?;
        QueryExecutor::new(self.collection)
            .execute(&plan)
            .map_err(ApiError::from_executor_error)
    }

    /// Handle a raw JSON request string
    pub fn handle_json(&self, json_request: &str) -> ApiResult<GridResponse> {
        let request = GridRequest::parse(json_request)?;
        self.handle(request.as_value())
    }

    /// Handle a request and render either outcome as a protocol response
    pub fn respond(&self, raw: &Value) -> Response {
        match self.handle(raw) {
            Ok(page) => Response::success(page),
            Err(err) => Response::error(raw, &err),
        }
    }
}

impl<'a, C: AsyncCollection> GridHandler<'a, C> {
    /// Handle a parsed request tree against an async collection
    pub async fn handle_async(&self, raw: &Value) -> ApiResult<GridResponse> {
        let plan = plan_request(raw, self.policy)?;
        AsyncQueryExecutor::new(self.collection)
            .execute(&plan)
            .await
            .map_err(ApiError::from_executor_error)
    }

    pub async fn respond_async(&self, raw: &Value) -> Response {
        match self.handle_async(raw).await {
            Ok(page) => Response::success(page),
            Err(err) => Response::error(raw, &err),
        }
    }
}

/// Validation-only check of a raw request
pub fn check_request(raw: &Value) -> Result<(), ValidationError> {
    validate(raw).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{CollectionError, CollectionResult, MemoryCollection, SearchMatcher};
    use serde_json::json;

    fn people() -> MemoryCollection {
        MemoryCollection::new(vec![
            json!({"id": "a", "name": "ann", "secret": "x"}),
            json!({"id": "b", "name": "bob", "secret": "y"}),
            json!({"id": "c", "name": "cat", "secret": "z"}),
        ])
    }

    fn request(search: &str) -> Value {
        json!({
            "draw": "4",
            "start": "0",
            "length": "10",
            "search": {"value": search, "regex": "false"},
            "order": [{"column": "0", "dir": "asc"}],
            "columns": [{"data": "name", "name": "name", "searchable": "true"}]
        })
    }

    #[test]
    fn test_handle_success() {
        let policy = FieldPolicy::new().with_pluckable(["name"]);
        let coll = people();
        let handler = GridHandler::new(&policy, &coll);

        let resp = handler.handle(&request("b")).unwrap();
        assert_eq!(resp.draw, 4);
        assert_eq!(resp.records_total, 3);
        assert_eq!(resp.records_filtered, 1);
        assert_eq!(resp.data, vec![json!({"name": "bob", "DT_RowId": "b"})]);
    }

    #[test]
    fn test_handle_json() {
        let policy = FieldPolicy::default();
        let coll = people();
        let handler = GridHandler::new(&policy, &coll);

        let body = serde_json::to_string(&request("")).unwrap();
        let resp = handler.handle_json(&body).unwrap();
        assert_eq!(resp.records_filtered, 3);

        let err = handler.handle_json("not json").unwrap_err();
        assert_eq!(err.code(), "GRID_INVALID_REQUEST");
    }

    #[test]
    fn test_validation_error_passes_through() {
        let policy = FieldPolicy::default();
        let coll = people();
        let handler = GridHandler::new(&policy, &coll);

        let mut raw = request("");
        raw["draw"] = json!("abc");
        let err = handler.handle(&raw).unwrap_err();
        assert_eq!(err.code(), "GRID_VALIDATION_INVALID_INTEGER");

        let resp = handler.respond(&raw);
        assert!(!resp.is_success());
        assert_eq!(resp.draw(), 0);
    }

    #[test]
    fn test_plan_error_echoes_draw() {
        let policy = FieldPolicy::default();
        let coll = people();
        let handler = GridHandler::new(&policy, &coll);

        let mut raw = request("");
        raw["order"] = json!([{"column": "5", "dir": "asc"}]);
        let resp = handler.respond(&raw);
        assert_eq!(resp.draw(), 4);
        match resp {
            Response::Error(err) => assert_eq!(err.code, "GRID_PLAN_SORT_COLUMN_OUT_OF_RANGE"),
            Response::Success(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_explain() {
        let policy = FieldPolicy::default();
        let coll = people();
        let handler = GridHandler::new(&policy, &coll);

        let plan = handler.explain(&request("a"));
        assert!(plan.accepted);
        assert_eq!(plan.draw, Some(4));
        assert!(plan.stages.iter().any(|s| s.starts_with("FILTER")));

        let mut raw = request("");
        raw["columns"] = json!([]);
        let rejected = handler.explain(&raw);
        assert!(!rejected.accepted);
        assert!(rejected.rejection_code.is_some());
    }

    #[test]
    fn test_check_request() {
        assert!(check_request(&request("x")).is_ok());
        assert!(check_request(&json!({})).is_err());
    }

    struct DownCollection;

    impl AsyncCollection for DownCollection {
        async fn count(&self) -> CollectionResult<u64> {
            Err(CollectionError::new("connection refused"))
        }

        async fn select(&self, _filter: Option<&SearchMatcher>) -> CollectionResult<Vec<Value>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_handle_async() {
        let policy = FieldPolicy::default();
        let coll = people();
        let handler = GridHandler::new(&policy, &coll);

        let resp = handler.handle_async(&request("c")).await.unwrap();
        assert_eq!(resp.records_filtered, 1);

        let down = DownCollection;
        let handler = GridHandler::new(&policy, &down);
        let resp = handler.respond_async(&request("")).await;
        assert_eq!(resp.draw(), 4);
        assert!(!resp.is_success());
    }
}
