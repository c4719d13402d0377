use log::debug;

use crate::reduction::{ReductionSequence, ReductionStep};

use super::generator::steps_for;

/// Lazily walks every reduction sequence for a fixed operand count.
///
/// Sequences come out in the same order a depth-first recursion would
/// produce them: the first step varies slowest, the last step fastest.
#[derive(Debug, Clone)]
pub struct SequenceIterator {
    // levels[k] holds the steps available when k steps have already been taken
    levels: Vec<Vec<ReductionStep>>,
    cursor: Vec<usize>,
    exhausted: bool,
}

impl SequenceIterator {
    pub fn new(operands: usize) -> Self {
        if operands < 2 {
            debug!("No reduction possible for {} operands", operands);
            return Self {
                levels: Vec::new(),
                cursor: Vec::new(),
                exhausted: true,
            };
        }

        let levels: Vec<Vec<ReductionStep>> = (2..=operands).rev().map(steps_for).collect();
        let cursor = vec![0; levels.len()];
        debug!(
            "Initialized sequence iterator for {} operands ({} levels)",
            operands,
            levels.len()
        );

        Self {
            levels,
            cursor,
            exhausted: false,
        }
    }

    fn current(&self) -> Option<ReductionSequence> {
        self.levels
            .iter()
            .zip(&self.cursor)
            .map(|(steps, &position)| steps.get(position).copied())
            .collect()
    }

    /// Moves the cursor like an odometer; marks exhaustion on overflow.
    fn advance(&mut self) {
        for (position, steps) in self.cursor.iter_mut().zip(&self.levels).rev() {
            *position += 1;
            if *position < steps.len() {
                return;
            }
            *position = 0;
        }
        self.exhausted = true;
    }

    fn remaining(&self) -> usize {
        if self.exhausted {
            return 0;
        }
        let total: usize = self.levels.iter().map(Vec::len).product();
        let consumed = self
            .cursor
            .iter()
            .zip(&self.levels)
            .fold(0, |acc, (&position, steps)| acc * steps.len() + position);
        total - consumed
    }
}

impl Iterator for SequenceIterator {
    type Item = ReductionSequence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let sequence = self.current();
        self.advance();
        if sequence.is_none() {
            self.exhausted = true;
        }
        sequence
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SequenceIterator {}

/// Lazily generates every reduction sequence for `operands` slots.
///
/// Yields nothing when fewer than two operands are given.
pub fn generate_sequences(operands: usize) -> SequenceIterator {
    SequenceIterator::new(operands)
}
