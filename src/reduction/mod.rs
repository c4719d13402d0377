//! Reduction steps and sequences, and how they are replayed against operands

mod display;
mod errors;
mod eval;
mod types;

pub use display::{render_expression, render_trace};
pub use errors::ReductionError;
pub use eval::DIVISION_SENTINEL;
pub use types::{Operator, ReductionSequence, ReductionStep};
