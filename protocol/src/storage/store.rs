//! # ChainStore — Persistent Chain File
//!
//! The whole chain is stored as one JSON document: an array of block
//! records in chain order, pretty-printed with two-space indentation.
//!
//! ```json
//! [
//!   {
//!     "index": 0,
//!     "timestamp": "2026-01-15T09:30:00Z",
//!     "data": "GENESIS",
//!     "previous_hash": "0000…0000",
//!     "hash": "9908…ae3a"
//!   }
//! ]
//! ```
//!
//! ## Atomicity
//!
//! `save` rewrites the file in full. The bytes go to a sibling temporary
//! file first, are synced, and then renamed over the target, so a crash
//! mid-write leaves either the old chain or the new one on disk, never a
//! torn mix.
//!
//! ## Recovery
//!
//! `load` is fail-open. A missing, unreadable, unparsable, or invalid file
//! yields a fresh genesis-only chain instead of an error. Whatever `load`
//! returns is internally consistent. Callers that must know when this
//! happened use [`ChainStore::load_with_outcome`] or
//! [`ChainStore::load_strict`].

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::block::Block;
use super::chain::{Chain, IntegrityError};

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors that can occur while reading or writing the chain file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chain file is not a list of block records: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored chain failed validation: {0}")]
    Integrity(#[from] IntegrityError),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// LoadOutcome
// ---------------------------------------------------------------------------

/// Which recovery branch `load` took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored chain parsed and validated.
    Loaded,
    /// No chain file existed.
    Missing,
    /// The file exists but could not be read.
    Unreadable(String),
    /// The file was read but is not a sequence of block records.
    Unparsable(String),
    /// The records parsed but the chain failed validation.
    Invalid(IntegrityError),
}

impl LoadOutcome {
    /// True if stored state was thrown away in favor of a fresh chain.
    pub fn discarded_state(&self) -> bool {
        matches!(
            self,
            LoadOutcome::Unreadable(_) | LoadOutcome::Unparsable(_) | LoadOutcome::Invalid(_)
        )
    }
}

// ---------------------------------------------------------------------------
// ChainStore
// ---------------------------------------------------------------------------

/// File-backed persistence for a [`Chain`].
#[derive(Debug, Clone)]
pub struct ChainStore {
    path: PathBuf,
}

impl ChainStore {
    /// A store for the chain file at `path`. Nothing is touched on disk
    /// until `save` or `load` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the chain file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the scratch file used during `save`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Overwrite the chain file with the full contents of `chain`.
    pub fn save(&self, chain: &Chain) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(chain.blocks())?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let temp = self.temp_path();
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp)
                .map_err(|e| StoreError::io(&temp, e))?;
            file.write_all(&bytes).map_err(|e| StoreError::io(&temp, e))?;
            file.sync_all().map_err(|e| StoreError::io(&temp, e))?;
        }

        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(StoreError::io(&self.path, e));
        }

        #[cfg(unix)]
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            blocks = chain.len(),
            bytes = bytes.len(),
            "chain saved"
        );
        Ok(())
    }

    /// Load the stored chain, falling back to a fresh genesis-only chain
    /// on any problem.
    pub fn load(&self) -> Chain {
        self.load_with_outcome().0
    }

    /// Load the stored chain and report which recovery branch was taken.
    pub fn load_with_outcome(&self) -> (Chain, LoadOutcome) {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no chain file, starting fresh");
                return (Chain::new(), LoadOutcome::Missing);
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "chain file unreadable, starting fresh"
                );
                return (Chain::new(), LoadOutcome::Unreadable(e.to_string()));
            }
        };

        let chain = match parse_blocks(&bytes) {
            Ok(chain) => chain,
            Err(reason) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %reason,
                    "chain file unparsable, starting fresh"
                );
                return (Chain::new(), LoadOutcome::Unparsable(reason));
            }
        };

        if let Err(e) = chain.verify() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "stored chain invalid, starting fresh"
            );
            return (Chain::new(), LoadOutcome::Invalid(e));
        }

        tracing::debug!(path = %self.path.display(), blocks = chain.len(), "chain loaded");
        (chain, LoadOutcome::Loaded)
    }

    /// Load the stored chain without the fail-open fallback.
    ///
    /// A missing file still yields a fresh chain. Unreadable, unparsable,
    /// and invalid files are errors.
    pub fn load_strict(&self) -> StoreResult<Chain> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Chain::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let blocks: Vec<Block> = serde_json::from_slice(&bytes)?;
        let chain = Chain::from_blocks(blocks)?;
        chain.verify()?;
        Ok(chain)
    }
}

/// Parse a chain file body into a chain, without validating links.
fn parse_blocks(bytes: &[u8]) -> Result<Chain, String> {
    let blocks: Vec<Block> = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    Chain::from_blocks(blocks).map_err(|e| e.to_string())
}
