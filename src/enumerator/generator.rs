use crate::reduction::{Operator, ReductionStep};

/// Operators worth trying on an ordered pair.
///
/// Commutative operators only appear under the increasing ordering, so
/// `(a, b, +)` and `(b, a, +)` are never both produced.
pub fn operators_for(first: usize, second: usize) -> &'static [Operator] {
    if first < second {
        Operator::ALL
    } else {
        Operator::NON_COMMUTATIVE
    }
}

/// Every step that can be taken on `slots` slots, in generation order:
/// unordered pairs in lexicographic order, each in both orderings, each with
/// its applicable operators.
pub fn steps_for(slots: usize) -> Vec<ReductionStep> {
    let mut steps = Vec::new();
    for i in 0..slots {
        for j in i + 1..slots {
            for (first, second) in [(i, j), (j, i)] {
                for &operator in operators_for(first, second) {
                    steps.push(ReductionStep::new(first, second, operator));
                }
            }
        }
    }
    steps
}

/// Number of distinct sequences that reduce `operands` slots to one
pub fn sequence_count(operands: usize) -> usize {
    if operands < 2 {
        return 0;
    }
    (2..=operands).map(steps_for_count).product()
}

fn steps_for_count(slots: usize) -> usize {
    let pairs = slots * (slots - 1) / 2;
    pairs * (Operator::ALL.len() + Operator::NON_COMMUTATIVE.len())
}
