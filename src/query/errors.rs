use thiserror::Error;

/// Problems with the caller's input, reported back as a client error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("missing parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("'{0}' is not a valid integer target")]
    InvalidTarget(String),
    #[error("expected between {min} and {max} numbers, got {count}")]
    OperandCount { count: usize, min: usize, max: usize },
}
