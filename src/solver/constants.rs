// Absolute tolerance used when comparing a replayed value to the target
pub const EPSILON: f64 = 1e-4;
