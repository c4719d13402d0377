use thiserror::Error;

use crate::reduction::{ReductionError, ReductionStep};

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cache snapshot could not be encoded or decoded: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("Cache snapshot has format version {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("Cache snapshot has no entry for {count} operands")]
    MissingEntry { count: usize },
    #[error("Cache snapshot has an unexpected entry for {count} operands")]
    UnexpectedEntry { count: usize },
    #[error("Cache entry for {count} operands holds {found} sequences, expected {expected}")]
    WrongSize {
        count: usize,
        found: usize,
        expected: usize,
    },
    #[error("Cache entry for {count} operands holds a duplicate sequence")]
    DuplicateSequence { count: usize },
    #[error("Cache entry for {count} operands holds an invalid sequence: {source}")]
    InvalidSequence {
        count: usize,
        #[source]
        source: ReductionError,
    },
    #[error("Cache entry for {count} operands holds the redundant step {step}")]
    RedundantStep { count: usize, step: ReductionStep },
    #[error("Cache entry for {count} operands is out of generation order at position {position}")]
    OutOfOrder { count: usize, position: usize },
    #[error("Cannot determine the directory of the running executable")]
    NoInstallDir,
}
