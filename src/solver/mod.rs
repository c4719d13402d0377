pub mod constants;
mod core;
mod errors;

pub use self::core::{MatchPolicy, Solver, SolverConfig};
pub use errors::SolverError;
