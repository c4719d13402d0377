use std::sync::OnceLock;

use crate::query::core::respond;
use crate::query::{
    Query, QueryError, STATUS_INVALID_QUERY, STATUS_OK, STATUS_SERVER_ERROR, handle_query,
    parse_query,
};
use crate::solver::{Solver, SolverError};

fn solver() -> &'static Solver {
    static SOLVER: OnceLock<Solver> = OnceLock::new();
    SOLVER.get_or_init(Solver::default)
}

#[test]
fn test_parse_query() {
    let query = parse_query("numbers=1,2,3&target=6");
    assert_eq!(
        query,
        Ok(Query {
            numbers: vec![1.0, 2.0, 3.0],
            target: 6,
        })
    );
}

#[test]
fn test_parse_query_leading_question_mark_and_encoded_commas() {
    let query = parse_query("?target=12&numbers=4%2C4%2c4&extra=1");
    assert_eq!(
        query,
        Ok(Query {
            numbers: vec![4.0, 4.0, 4.0],
            target: 12,
        })
    );
}

#[test]
fn test_parse_query_first_occurrence_wins() {
    let query = parse_query("numbers=1,2&target=3&target=4");
    assert!(matches!(query, Ok(Query { target: 3, .. })));
}

#[test]
fn test_parse_query_missing_parameters() {
    assert_eq!(
        parse_query("numbers=1,2,3"),
        Err(QueryError::MissingParameter("target"))
    );
    assert_eq!(
        parse_query("target=3"),
        Err(QueryError::MissingParameter("numbers"))
    );
    assert_eq!(
        parse_query("numbers=&target=3"),
        Err(QueryError::MissingParameter("numbers"))
    );
    assert_eq!(parse_query(""), Err(QueryError::MissingParameter("target")));
}

#[test]
fn test_parse_query_malformed_values() {
    assert_eq!(
        parse_query("numbers=1,x,3&target=6"),
        Err(QueryError::InvalidNumber("x".to_string()))
    );
    assert_eq!(
        parse_query("numbers=1,,3&target=6"),
        Err(QueryError::InvalidNumber(String::new()))
    );
    assert_eq!(
        parse_query("numbers=1,inf&target=6"),
        Err(QueryError::InvalidNumber("inf".to_string()))
    );
    assert_eq!(
        parse_query("numbers=1,2&target=6.5"),
        Err(QueryError::InvalidTarget("6.5".to_string()))
    );
}

#[test]
fn test_parse_query_operand_count() {
    assert!(matches!(
        parse_query("numbers=7&target=7"),
        Err(QueryError::OperandCount { count: 1, .. })
    ));
    assert!(matches!(
        parse_query("numbers=1,2,3,4,5,6&target=7"),
        Err(QueryError::OperandCount { count: 6, .. })
    ));
}

#[test]
fn test_handle_query_found() {
    let response = handle_query(solver(), "numbers=1,1,1,1,1&target=5");
    assert_eq!(response.status, STATUS_OK);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(
        response.body,
        r#"{"result":[[[0,1],"+"],[[0,1],"+"],[[0,1],"+"],[[0,1],"+"]]}"#
    );
}

#[test]
fn test_handle_query_not_found() {
    let response = handle_query(solver(), "numbers=1,1,1,1,1&target=99");
    assert_eq!(response.status, STATUS_OK);
    assert_eq!(response.body, "{}");
}

#[test]
fn test_handle_query_invalid() {
    let response = handle_query(solver(), "numbers=one,two&target=3");
    assert_eq!(response.status, STATUS_INVALID_QUERY);
    assert_eq!(response.content_type, "text/plain");
    assert!(response.body.starts_with("Invalid query string:"));
}

#[test]
fn test_handle_query_result_replays_to_target() {
    let response = handle_query(solver(), "numbers=6,3,2,5,1&target=36");
    assert_eq!(response.status, STATUS_OK);

    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&response.body);
    assert!(parsed.is_ok());
    if let Ok(value) = parsed {
        let sequence: Result<crate::reduction::ReductionSequence, _> =
            serde_json::from_value(value["result"].clone());
        assert!(sequence.is_ok());
        if let Ok(sequence) = sequence {
            let replayed = sequence.apply(&[6.0, 3.0, 2.0, 5.0, 1.0]);
            assert!(matches!(replayed, Ok(v) if (v - 36.0).abs() < 1e-4));
        }
    }
}

#[test]
fn test_solver_failure_is_server_error() {
    let response = respond(
        "numbers=1,2&target=3",
        Err(SolverError::UnsupportedOperandCount { count: 9 }),
    );
    assert_eq!(response.status, STATUS_SERVER_ERROR);
    assert_eq!(response.content_type, "text/plain");
    assert!(response.body.starts_with("Unexpected problem:"));
}
