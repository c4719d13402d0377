use log::debug;

use crate::reduction::errors::ReductionError;
use crate::reduction::types::{Operator, ReductionSequence, ReductionStep};

/// Value produced by dividing by zero.
///
/// The branch keeps going with this value instead of failing, so it only
/// matches a target that happens to equal it.
pub const DIVISION_SENTINEL: f64 = -1.0;

impl Operator {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => {
                if right == 0.0 {
                    debug!("Division by zero, substituting {}", DIVISION_SENTINEL);
                    DIVISION_SENTINEL
                } else {
                    left / right
                }
            }
        }
    }
}

impl ReductionStep {
    /// # Errors
    ///
    /// Returns an error if fewer than two slots remain, either index is out
    /// of bounds, or both indices name the same slot.
    pub fn validate(&self, len: usize) -> Result<(), ReductionError> {
        if len < 2 {
            return Err(ReductionError::TooFewSlots { len });
        }
        for index in [self.first, self.second] {
            if index >= len {
                return Err(ReductionError::IndexOutOfBounds { index, len });
            }
        }
        if self.first == self.second {
            return Err(ReductionError::SameIndex { index: self.first });
        }
        Ok(())
    }

    /// Applies this step to `slots` in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is not valid for the current slot count.
    pub fn apply(&self, slots: &mut Vec<f64>) -> Result<(), ReductionError> {
        let operator = self.operator;
        reduce_slots(slots, self, |left, right| operator.apply(*left, *right))
    }
}

impl ReductionSequence {
    /// Checks the sequence against `operand_count` starting slots without
    /// computing anything.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found, or `LeftoverSlots` if the
    /// sequence does not end with exactly one slot.
    pub fn validate(&self, operand_count: usize) -> Result<(), ReductionError> {
        let mut len = operand_count;
        for step in self {
            step.validate(len)?;
            len -= 1;
        }
        if len != 1 {
            return Err(ReductionError::LeftoverSlots { remaining: len });
        }
        Ok(())
    }

    /// Replays the sequence on a private copy of `operands` and returns the
    /// single remaining value.
    ///
    /// # Errors
    ///
    /// Returns an error if a step does not fit the slot list it meets, or if
    /// more than one slot is left at the end.
    pub fn apply(&self, operands: &[f64]) -> Result<f64, ReductionError> {
        let mut slots = operands.to_vec();
        for step in self {
            step.apply(&mut slots)?;
        }
        match slots.as_slice() {
            [value] => Ok(*value),
            rest => Err(ReductionError::LeftoverSlots {
                remaining: rest.len(),
            }),
        }
    }
}

/// Shared slot bookkeeping for numeric replay and for rendering
pub(crate) fn reduce_slots<T, F>(
    slots: &mut Vec<T>,
    step: &ReductionStep,
    combine: F,
) -> Result<(), ReductionError>
where
    F: FnOnce(&T, &T) -> T,
{
    let len = slots.len();
    step.validate(len)?;

    let combined = match (slots.get(step.first), slots.get(step.second)) {
        (Some(left), Some(right)) => combine(left, right),
        _ => {
            return Err(ReductionError::IndexOutOfBounds {
                index: step.first.max(step.second),
                len,
            });
        }
    };

    if let Some(slot) = slots.get_mut(step.first) {
        *slot = combined;
    }
    slots.remove(step.second);
    Ok(())
}
