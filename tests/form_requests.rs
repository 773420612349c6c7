//! Form Request Tests
//!
//! Grid widgets send bracketed form pairs with every value as a string.
//! These tests drive that wire form through the whole pipeline.

use gridquery::api::{ApiError, GridHandler, GridRequest};
use gridquery::executor::MemoryCollection;
use gridquery::planner::FieldPolicy;
use gridquery::validator::{validate, SortDirection, ValidationErrorCode};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn widget_pairs() -> Vec<(String, String)> {
    let mut pairs = vec![
        ("draw", "3"),
        ("start", "1"),
        ("length", "2"),
        ("search[value]", "an"),
        ("search[regex]", "true"),
        ("order[0][column]", "0"),
        ("order[0][dir]", "desc"),
    ];
    pairs.extend([
        ("columns[0][data]", "name"),
        ("columns[0][name]", "name"),
        ("columns[0][searchable]", "true"),
        ("columns[0][orderable]", "true"),
        ("columns[0][search][value]", ""),
        ("columns[0][search][regex]", "false"),
        ("columns[1][data]", "city"),
        ("columns[1][name]", "city"),
        ("columns[1][searchable]", "false"),
        ("columns[1][orderable]", "true"),
        ("columns[1][search][value]", ""),
        ("columns[1][search][regex]", "false"),
    ]);
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn people() -> MemoryCollection {
    MemoryCollection::new(vec![
        json!({"id": "p1", "name": "dana", "city": "oslo"}),
        json!({"id": "p2", "name": "ann", "city": "lima"}),
        json!({"id": "p3", "name": "bob", "city": "anchorage"}),
        json!({"id": "p4", "name": "hans", "city": "bern"}),
        json!({"id": "p5", "name": "joan", "city": "rome"}),
    ])
}

// =============================================================================
// Parsing Tests
// =============================================================================

/// String-typed form values validate like their JSON counterparts.
#[test]
fn test_form_request_validates() {
    let request = GridRequest::from_form_pairs(widget_pairs()).unwrap();
    let validated = validate(request.as_value()).unwrap();

    assert_eq!(validated.draw(), 3);
    assert_eq!(validated.start(), 1);
    assert_eq!(validated.limit(), Some(2));
    assert_eq!(validated.order()[0].dir, SortDirection::Desc);
    assert_eq!(validated.columns().len(), 2);
    assert!(validated.columns()[0].searchable);
    assert!(!validated.columns()[1].searchable);
}

/// A form request with a bad flag fails with the column's path.
#[test]
fn test_form_request_bad_flag() {
    let mut pairs = widget_pairs();
    for (k, v) in pairs.iter_mut() {
        if k == "columns[1][orderable]" {
            *v = "yes".to_string();
        }
    }
    let request = GridRequest::from_form_pairs(pairs).unwrap();
    let err = validate(request.as_value()).unwrap_err();

    assert_eq!(err.code(), ValidationErrorCode::InvalidBoolean);
    assert_eq!(err.field(), "columns[1].orderable");
}

// =============================================================================
// Pipeline Tests
// =============================================================================

/// Form pairs run end to end; only searchable columns are searched.
#[test]
fn test_form_request_pipeline() {
    let policy = FieldPolicy::default();
    let coll = people();
    let request = GridRequest::from_form_pairs(widget_pairs()).unwrap();

    let page = GridHandler::new(&policy, &coll)
        .handle(request.as_value())
        .unwrap();

    // "an" matches dana, ann, hans, joan by name; anchorage is city-only
    assert_eq!(page.draw, 3);
    assert_eq!(page.records_total, 5);
    assert_eq!(page.records_filtered, 4);

    // Page [1, 3) of the filtered set is ann, hans; then name desc
    let ids: Vec<&str> = page
        .data
        .iter()
        .map(|row| row["DT_RowId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["p4", "p2"]);
}

/// A missing sort column surfaces as an API error with the planner code.
#[test]
fn test_form_request_sort_column_out_of_range() {
    let mut pairs = widget_pairs();
    pairs.retain(|(k, _)| !k.starts_with("columns[1]"));
    for (k, v) in pairs.iter_mut() {
        if k == "order[0][column]" {
            *v = "1".to_string();
        }
    }

    let policy = FieldPolicy::default();
    let coll = people();
    let request = GridRequest::from_form_pairs(pairs).unwrap();
    let err: ApiError = GridHandler::new(&policy, &coll)
        .handle(request.as_value())
        .unwrap_err();

    assert_eq!(err.code(), "GRID_PLAN_SORT_COLUMN_OUT_OF_RANGE");
    assert!(err.is_client_error());
}
