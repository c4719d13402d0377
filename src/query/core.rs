use log::{debug, warn};
use serde::Serialize;

use crate::enumerator::constants::{MAX_OPERANDS, MIN_OPERANDS};
use crate::query::errors::QueryError;
use crate::reduction::ReductionSequence;
use crate::solver::{Solver, SolverError};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INVALID_QUERY: u16 = 409;
pub const STATUS_SERVER_ERROR: u16 = 500;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain";

/// Decoded `numbers=..&target=..` request
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub numbers: Vec<f64>,
    pub target: i64,
}

/// Transport-agnostic reply: status code, content type and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl QueryResponse {
    fn json(body: String) -> Self {
        Self {
            status: STATUS_OK,
            content_type: JSON,
            body,
        }
    }

    fn text(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: TEXT,
            body,
        }
    }
}

#[derive(Serialize)]
struct ResultBody<'a> {
    result: &'a ReductionSequence,
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'+' => decoded.push(b' '),
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value);
                let lo = bytes.get(i + 2).copied().and_then(hex_value);
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    decoded.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
                decoded.push(byte);
            }
            _ => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn parameter(query: &str, name: &'static str) -> Result<String, QueryError> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode(value))
        .filter(|value| !value.trim().is_empty())
        .ok_or(QueryError::MissingParameter(name))
}

/// Parses a query string such as `numbers=1,2,3&target=6`.
///
/// A leading `?` is ignored and only the first occurrence of each parameter
/// counts.
///
/// # Errors
///
/// Returns an error if a parameter is missing or malformed, or if the number
/// of operands is outside the supported range.
pub fn parse_query(raw: &str) -> Result<Query, QueryError> {
    let query = raw.strip_prefix('?').unwrap_or(raw);
    debug!("Parsing query string '{}'", query);

    let target_text = parameter(query, "target")?;
    let target = target_text
        .trim()
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidTarget(target_text.clone()))?;

    let numbers = parameter(query, "numbers")?
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| QueryError::InvalidNumber(item.to_string()))
        })
        .collect::<Result<Vec<f64>, QueryError>>()?;

    if !(MIN_OPERANDS..=MAX_OPERANDS).contains(&numbers.len()) {
        return Err(QueryError::OperandCount {
            count: numbers.len(),
            min: MIN_OPERANDS,
            max: MAX_OPERANDS,
        });
    }

    Ok(Query { numbers, target })
}

/// Answers one lookup request.
///
/// A found sequence is returned as `{"result": [[[i, j], "op"], ...]}` and an
/// unsolvable puzzle as `{}`. Bad input gets a 409, anything else a 500.
pub fn handle_query(solver: &Solver, raw: &str) -> QueryResponse {
    let query = match parse_query(raw) {
        Ok(query) => query,
        Err(err) => {
            warn!("Rejecting query '{}': {}", raw, err);
            return QueryResponse::text(
                STATUS_INVALID_QUERY,
                format!("Invalid query string: {}", err),
            );
        }
    };

    respond(raw, solver.find_result(&query.numbers, query.target as f64))
}

/// Turns a search outcome into a response. Solver failures become a 500.
pub(crate) fn respond(
    raw: &str,
    outcome: Result<Option<ReductionSequence>, SolverError>,
) -> QueryResponse {
    let body = outcome
        .map_err(|err| err.to_string())
        .and_then(|found| match found {
            Some(sequence) => serde_json::to_string(&ResultBody { result: &sequence })
                .map_err(|err| err.to_string()),
            None => Ok("{}".to_string()),
        });

    match body {
        Ok(body) => QueryResponse::json(body),
        Err(err) => {
            warn!("Query '{}' failed: {}", raw, err);
            QueryResponse::text(STATUS_SERVER_ERROR, format!("Unexpected problem: {}", err))
        }
    }
}
