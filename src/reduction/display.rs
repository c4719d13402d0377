use std::fmt;

use crate::reduction::errors::ReductionError;
use crate::reduction::eval::reduce_slots;
use crate::reduction::types::{Operator, ReductionSequence, ReductionStep};

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for ReductionStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}) {}", self.first, self.second, self.operator)
    }
}

impl fmt::Display for ReductionSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, step) in self.steps().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", step)?;
        }
        write!(f, "]")
    }
}

fn combine_text(operator: Operator, left: &str, right: &str) -> String {
    format!("({} {} {})", left, operator, right)
}

fn format_slots(slots: &[String]) -> String {
    format!("[{}]", slots.join(", "))
}

/// Renders the sequence applied to `numbers` as one nested expression,
/// e.g. `((1 + 1) * 5)`.
///
/// # Errors
///
/// Returns an error if the sequence does not fit the number of operands.
pub fn render_expression(
    numbers: &[f64],
    sequence: &ReductionSequence,
) -> Result<String, ReductionError> {
    let mut slots: Vec<String> = numbers.iter().map(|n| n.to_string()).collect();
    for step in sequence {
        reduce_slots(&mut slots, step, |left, right| {
            combine_text(step.operator, left, right)
        })?;
    }
    let remaining = slots.len();
    match slots.pop() {
        Some(text) if remaining == 1 => Ok(text),
        _ => Err(ReductionError::LeftoverSlots { remaining }),
    }
}

/// Renders the slot list before the first step and after every step.
///
/// # Errors
///
/// Returns an error if a step does not fit the slot list it meets.
pub fn render_trace(
    numbers: &[f64],
    sequence: &ReductionSequence,
) -> Result<Vec<String>, ReductionError> {
    let mut slots: Vec<String> = numbers.iter().map(|n| n.to_string()).collect();
    let mut lines = Vec::with_capacity(sequence.len() + 1);
    lines.push(format_slots(&slots));
    for step in sequence {
        reduce_slots(&mut slots, step, |left, right| {
            combine_text(step.operator, left, right)
        })?;
        lines.push(format_slots(&slots));
    }
    Ok(lines)
}
