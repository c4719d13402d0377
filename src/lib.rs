//! Ptorzot - A library for reaching a target number from a handful of operands
//!
//! Every structurally distinct way of combining N numbers (2 to 5) pairwise with
//! `+`, `-`, `*` and `/` is enumerated once, cached, and then replayed against the
//! actual operands until one of the sequences lands on the target.

pub mod drill;
pub mod enumerator;
pub mod query;
pub mod reduction;
pub mod solver;

// Re-export the main public API
pub use drill::Drill;
pub use enumerator::{CacheError, SequenceCache, SequenceSet, generate_sequences};
pub use reduction::{
    DIVISION_SENTINEL, Operator, ReductionError, ReductionSequence, ReductionStep,
    render_expression, render_trace,
};
pub use solver::{MatchPolicy, Solver, SolverConfig, SolverError};

/// Find a reduction sequence that turns `numbers` into `target`
///
/// This is a convenience function that builds an in-memory solver with the
/// default tolerance and runs a single search. Build a [`Solver`] once and
/// reuse it when answering more than one puzzle.
///
/// # Arguments
///
/// * `numbers` - Between two and five operands
/// * `target` - The value to reach
///
/// # Returns
///
/// * `Ok(Some(ReductionSequence))` - If a matching sequence is found
/// * `Ok(None)` - If every sequence was tried without a match
/// * `Err(SolverError)` - If the number of operands is not supported
///
/// # Errors
///
/// This function will return an error if fewer than two or more than five
/// operands are given.
///
/// # Examples
///
/// ```
/// use ptorzot::{find_result, render_expression};
///
/// let numbers = [1.0, 1.0, 5.0];
/// match find_result(&numbers, 10.0) {
///     Ok(Some(sequence)) => println!("Found: {}", render_expression(&numbers, &sequence).unwrap_or_default()),
///     Ok(None) => println!("No result"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn find_result(
    numbers: &[f64],
    target: f64,
) -> Result<Option<ReductionSequence>, SolverError> {
    let solver = Solver::default();
    solver.find_result(numbers, target)
}
