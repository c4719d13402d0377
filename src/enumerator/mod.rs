//! Enumeration of every distinct reduction sequence for a given operand count

pub mod cache;
pub mod constants;
mod core;
mod errors;
pub mod generator;
mod set;

pub use cache::{Candidates, SequenceCache};
pub use self::core::{SequenceIterator, generate_sequences};
pub use errors::CacheError;
pub use set::SequenceSet;
