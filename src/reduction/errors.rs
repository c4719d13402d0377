use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionError {
    #[error("At least two slots are needed to reduce, found {len}")]
    TooFewSlots { len: usize },
    #[error("Slot index {index} is out of bounds for {len} slots")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("A step cannot combine slot {index} with itself")]
    SameIndex { index: usize },
    #[error("Sequence left {remaining} slots instead of one")]
    LeftoverSlots { remaining: usize },
}
