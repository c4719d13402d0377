use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::reduction::ReductionSequence;

use super::constants::{CACHE_FILE_NAME, CACHE_FORMAT_VERSION, MAX_OPERANDS, MIN_OPERANDS};
use super::core::{SequenceIterator, generate_sequences};
use super::errors::CacheError;
use super::generator::{operators_for, sequence_count};
use super::set::SequenceSet;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    entries: &'a BTreeMap<usize, SequenceSet>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    entries: BTreeMap<usize, SequenceSet>,
}

/// Sequences to try for one operand count
#[derive(Debug)]
pub enum Candidates<'a> {
    Cached(&'a SequenceSet),
    Generated(SequenceIterator),
}

impl Candidates<'_> {
    pub fn is_cached(&self) -> bool {
        matches!(self, Candidates::Cached(_))
    }

    /// Collects the candidates, cloning them out of the cache if needed
    pub fn into_vec(self) -> Vec<ReductionSequence> {
        match self {
            Candidates::Cached(set) => set.as_slice().to_vec(),
            Candidates::Generated(iter) => iter.collect(),
        }
    }
}

/// Precomputed sequence sets for every supported operand count.
///
/// Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceCache {
    entries: BTreeMap<usize, SequenceSet>,
}

impl SequenceCache {
    /// Generates the sets for every supported operand count
    pub fn compute() -> Self {
        let mut entries = BTreeMap::new();
        for count in MIN_OPERANDS..=MAX_OPERANDS {
            let set: SequenceSet = generate_sequences(count).collect();
            info!("Calculated {} sequences for {} operands", set.len(), count);
            entries.insert(count, set);
        }
        Self { entries }
    }

    /// Loads the snapshot at `path`, or computes a fresh cache and tries to
    /// store it there. A failed store is logged and otherwise ignored.
    pub fn open(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cache) => {
                info!("Loaded sequence cache from {}", path.display());
                cache
            }
            Err(err) => {
                warn!(
                    "Can't load cache from {}: {}, calculating",
                    path.display(),
                    err
                );
                let cache = Self::compute();
                if let Err(err) = cache.store(path) {
                    warn!("Can't store cache in {}: {}", path.display(), err);
                }
                cache
            }
        }
    }

    /// `ops.cache` next to the running executable
    ///
    /// # Errors
    ///
    /// Returns an error if the executable's location cannot be determined.
    pub fn default_path() -> Result<PathBuf, CacheError> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or(CacheError::NoInstallDir)?;
        Ok(dir.join(CACHE_FILE_NAME))
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid
    /// snapshot.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let bytes = fs::read(path)?;
        Self::from_cbor(&bytes)
    }

    /// Writes the snapshot through a temporary sibling file and renames it
    /// into place, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error on any filesystem or encoding failure.
    pub fn store(&self, path: &Path) -> Result<(), CacheError> {
        let bytes = self.to_cbor()?;

        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        fs::create_dir_all(parent)?;

        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0_u128, |d| d.as_nanos());
        let tmp_path = parent.join(format!(
            ".{}.tmp.{}.{}",
            CACHE_FILE_NAME,
            std::process::id(),
            nanos
        ));

        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .and_then(|mut file| {
                file.write_all(&bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        info!("Stored sequence cache in {}", path.display());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_cbor(&self) -> Result<Vec<u8>, CacheError> {
        let snapshot = SnapshotRef {
            version: CACHE_FORMAT_VERSION,
            entries: &self.entries,
        };
        Ok(serde_cbor::to_vec(&snapshot)?)
    }

    /// # Errors
    ///
    /// Returns an error if the bytes do not decode, or decode to a snapshot
    /// of another version or with entries that differ from a fresh
    /// generation.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CacheError> {
        let snapshot: Snapshot = serde_cbor::from_slice(bytes)?;
        if snapshot.version != CACHE_FORMAT_VERSION {
            return Err(CacheError::VersionMismatch {
                found: snapshot.version,
                expected: CACHE_FORMAT_VERSION,
            });
        }
        let cache = Self {
            entries: snapshot.entries,
        };
        cache.validate()?;
        Ok(cache)
    }

    fn validate(&self) -> Result<(), CacheError> {
        for count in MIN_OPERANDS..=MAX_OPERANDS {
            if !self.entries.contains_key(&count) {
                return Err(CacheError::MissingEntry { count });
            }
        }

        for (&count, set) in &self.entries {
            if !(MIN_OPERANDS..=MAX_OPERANDS).contains(&count) {
                return Err(CacheError::UnexpectedEntry { count });
            }
            let expected = sequence_count(count);
            if set.len() != expected {
                return Err(CacheError::WrongSize {
                    count,
                    found: set.len(),
                    expected,
                });
            }
            for sequence in set {
                sequence
                    .validate(count)
                    .map_err(|source| CacheError::InvalidSequence { count, source })?;
                if let Some(&step) = sequence
                    .steps()
                    .iter()
                    .find(|step| !operators_for(step.first, step.second).contains(&step.operator))
                {
                    return Err(CacheError::RedundantStep { count, step });
                }
            }
            if set.has_duplicates() {
                return Err(CacheError::DuplicateSequence { count });
            }
            // Searches return the first match, so the order has to be the
            // generation order too
            if let Some(position) = set
                .iter()
                .zip(generate_sequences(count))
                .position(|(cached, fresh)| *cached != fresh)
            {
                return Err(CacheError::OutOfOrder { count, position });
            }
            debug!("Validated {} cached sequences for {} operands", set.len(), count);
        }
        Ok(())
    }

    /// Cached set for `operands`, if there is one
    pub fn cached(&self, operands: usize) -> Option<&SequenceSet> {
        self.entries.get(&operands)
    }

    /// Cached set for `operands`, or a fresh lazy generation when the count
    /// is not cached. Uncached counts are regenerated on every call.
    pub fn get(&self, operands: usize) -> Candidates<'_> {
        match self.entries.get(&operands) {
            Some(set) => Candidates::Cached(set),
            None => {
                debug!("No cached sequences for {} operands, generating", operands);
                Candidates::Generated(generate_sequences(operands))
            }
        }
    }

    pub fn operand_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }
}
