use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::reduction::ReductionSequence;

/// Duplicate-free collection of reduction sequences.
///
/// Iteration follows insertion order, which for a generated set is the
/// generation order. Searches rely on that to return the same first match
/// every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceSet {
    sequences: Vec<ReductionSequence>,
}

impl SequenceSet {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReductionSequence> {
        self.sequences.iter()
    }

    pub fn as_slice(&self) -> &[ReductionSequence] {
        &self.sequences
    }

    /// Whether any sequence appears more than once.
    ///
    /// Only a decoded set can fail this; sets built through `FromIterator`
    /// drop repeats on the way in.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.sequences.len());
        !self.sequences.iter().all(|sequence| seen.insert(sequence))
    }
}

impl FromIterator<ReductionSequence> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = ReductionSequence>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut seen = HashSet::with_capacity(iter.size_hint().0);
        let mut sequences = Vec::with_capacity(iter.size_hint().0);
        for sequence in iter {
            if seen.insert(sequence.clone()) {
                sequences.push(sequence);
            }
        }
        Self { sequences }
    }
}

impl<'a> IntoIterator for &'a SequenceSet {
    type Item = &'a ReductionSequence;
    type IntoIter = std::slice::Iter<'a, ReductionSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}
