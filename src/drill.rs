//! Random practice puzzles rolled with six-sided dice

use std::fmt;

use log::debug;
use rand::Rng;

pub const DIE_FACES: u8 = 6;
pub const OPERAND_DICE: usize = 5;

/// A puzzle: reach `target` using every one of `numbers` exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drill {
    pub numbers: Vec<i64>,
    pub target: i64,
}

fn roll<R: Rng>(rng: &mut R) -> i64 {
    i64::from(rng.random_range(1..=DIE_FACES))
}

impl Drill {
    pub fn new(numbers: Vec<i64>, target: i64) -> Self {
        Self { numbers, target }
    }

    /// Rolls two dice for the tens and units of the target, then five more
    /// for the operands
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let target = roll(rng) * 10 + roll(rng);
        let numbers = (0..OPERAND_DICE).map(|_| roll(rng)).collect();
        let drill = Self { numbers, target };
        debug!("Rolled drill: {}", drill);
        drill
    }

    pub fn operands(&self) -> Vec<f64> {
        self.numbers.iter().map(|&n| n as f64).collect()
    }
}

impl fmt::Display for Drill {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Reach {} from {:?}", self.target, self.numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_drill_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let drill = Drill::random(&mut rng);
            assert_eq!(drill.numbers.len(), OPERAND_DICE);
            assert!(drill.numbers.iter().all(|n| (1..=6).contains(n)));
            assert!((11..=66).contains(&drill.target));
            let units = drill.target % 10;
            assert!((1..=6).contains(&units));
        }
    }

    #[test]
    fn test_random_drill_is_reproducible_with_seed() {
        let a = Drill::random(&mut StdRng::seed_from_u64(42));
        let b = Drill::random(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let drill = Drill::new(vec![1, 1, 1, 1, 1], 99);
        assert_eq!(format!("{}", drill), "Reach 99 from [1, 1, 1, 1, 1]");
        assert_eq!(drill.operands(), vec![1.0; 5]);
    }
}
