use serde::{Deserialize, Serialize};

/// One of the four arithmetic operators a step can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub const ALL: &'static [Operator] =
        &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];
    pub const NON_COMMUTATIVE: &'static [Operator] = &[Operator::Sub, Operator::Div];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }
}

/// Combines the slot at `first` with the slot at `second`.
///
/// The result lands in `first`; `second` is removed and every later slot
/// shifts down by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "((usize, usize), Operator)", into = "((usize, usize), Operator)")]
pub struct ReductionStep {
    pub first: usize,
    pub second: usize,
    pub operator: Operator,
}

impl ReductionStep {
    pub fn new(first: usize, second: usize, operator: Operator) -> Self {
        Self {
            first,
            second,
            operator,
        }
    }

    pub fn pair(&self) -> (usize, usize) {
        (self.first, self.second)
    }
}

impl From<((usize, usize), Operator)> for ReductionStep {
    fn from(((first, second), operator): ((usize, usize), Operator)) -> Self {
        Self::new(first, second, operator)
    }
}

impl From<ReductionStep> for ((usize, usize), Operator) {
    fn from(step: ReductionStep) -> Self {
        (step.pair(), step.operator)
    }
}

/// An ordered chain of steps collapsing `len() + 1` operands into one
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReductionSequence(Vec<ReductionStep>);

impl ReductionSequence {
    pub fn new(steps: Vec<ReductionStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[ReductionStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of operands this sequence reduces to a single value
    pub fn operand_count(&self) -> usize {
        self.0.len() + 1
    }
}

impl From<Vec<ReductionStep>> for ReductionSequence {
    fn from(steps: Vec<ReductionStep>) -> Self {
        Self(steps)
    }
}

impl FromIterator<ReductionStep> for ReductionSequence {
    fn from_iter<I: IntoIterator<Item = ReductionStep>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReductionSequence {
    type Item = &'a ReductionStep;
    type IntoIter = std::slice::Iter<'a, ReductionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
