use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::enumerator::constants::{MAX_OPERANDS, MIN_OPERANDS};
use crate::enumerator::{Candidates, SequenceCache};
use crate::reduction::ReductionSequence;
use crate::solver::constants::EPSILON;
use crate::solver::errors::SolverError;

/// How a replayed value is compared with the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPolicy {
    /// Bit-for-bit floating point equality
    Exact,
    /// Absolute difference strictly below the given tolerance
    Tolerance(f64),
}

impl MatchPolicy {
    pub fn matches(self, value: f64, target: f64) -> bool {
        match self {
            MatchPolicy::Exact => value == target,
            MatchPolicy::Tolerance(epsilon) => (value - target).abs() < epsilon,
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Tolerance(EPSILON)
    }
}

/// Configuration for the search
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub policy: MatchPolicy,
}

/// Searches the precomputed reduction sequences for one that turns the
/// operands into the target
pub struct Solver {
    cache: SequenceCache,
    config: SolverConfig,
}

impl Solver {
    pub fn new(cache: SequenceCache, config: SolverConfig) -> Self {
        Self { cache, config }
    }

    /// Solver backed by the cache file at `path`, computing and storing it
    /// first if it cannot be loaded
    pub fn with_cache_file(path: &Path, config: SolverConfig) -> Self {
        Self::new(SequenceCache::open(path), config)
    }

    /// Solver backed by the cache file next to the running executable
    ///
    /// # Errors
    ///
    /// Returns an error if the executable's directory cannot be determined.
    pub fn with_default_cache(config: SolverConfig) -> Result<Self, SolverError> {
        let path = SequenceCache::default_path()?;
        Ok(Self::with_cache_file(&path, config))
    }

    /// Solver with a freshly computed cache that is never written to disk
    pub fn in_memory(config: SolverConfig) -> Self {
        Self::new(SequenceCache::compute(), config)
    }

    pub fn cache(&self) -> &SequenceCache {
        &self.cache
    }

    /// Finds the first sequence, in generation order, whose replay on
    /// `operands` matches `target` under the configured policy.
    ///
    /// Returns `Ok(None)` once every candidate has been tried.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of operands is outside the supported
    /// range.
    pub fn find_result(
        &self,
        operands: &[f64],
        target: f64,
    ) -> Result<Option<ReductionSequence>, SolverError> {
        let count = operands.len();
        if !(MIN_OPERANDS..=MAX_OPERANDS).contains(&count) {
            return Err(SolverError::UnsupportedOperandCount { count });
        }

        info!("Searching for {} from {:?}", target, operands);

        let policy = self.config.policy;
        let is_match = |sequence: &ReductionSequence| {
            // A sequence that does not fit the operands simply never matches
            matches!(sequence.apply(operands), Ok(value) if policy.matches(value, target))
        };

        let found = match self.cache.get(count) {
            Candidates::Cached(set) => {
                debug!("Scanning {} cached sequences", set.len());
                set.as_slice()
                    .par_iter()
                    .find_first(|sequence| is_match(*sequence))
                    .cloned()
            }
            Candidates::Generated(mut iter) => {
                debug!("Scanning {} generated sequences", iter.len());
                iter.find(|sequence| is_match(sequence))
            }
        };

        match &found {
            Some(sequence) => info!("Found match: {}", sequence),
            None => info!("No match found"),
        }
        Ok(found)
    }

    /// Integer convenience wrapper around [`Solver::find_result`]
    ///
    /// # Errors
    ///
    /// Same as [`Solver::find_result`].
    pub fn find_result_ints(
        &self,
        operands: &[i64],
        target: i64,
    ) -> Result<Option<ReductionSequence>, SolverError> {
        let operands: Vec<f64> = operands.iter().map(|&n| n as f64).collect();
        self.find_result(&operands, target as f64)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::in_memory(SolverConfig::default())
    }
}
