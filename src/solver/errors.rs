use thiserror::Error;

use crate::enumerator::CacheError;
use crate::enumerator::constants::{MAX_OPERANDS, MIN_OPERANDS};

#[derive(Error, Debug)]
pub enum SolverError {
    #[error(
        "Expected between {min} and {max} operands, got {count}",
        min = MIN_OPERANDS,
        max = MAX_OPERANDS
    )]
    UnsupportedOperandCount { count: usize },
    #[error("Sequence cache error: {0}")]
    CacheError(#[from] CacheError),
}
