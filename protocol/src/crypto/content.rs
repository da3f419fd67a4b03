//! # Document Content Hashing
//!
//! Streams a document through SHA-256 in fixed-size chunks
//! ([`CHUNK_SIZE`](crate::config::CHUNK_SIZE)) so that hashing a 10 GB file
//! costs the same memory as hashing a 10 byte one.
//!
//! A digest is either complete or absent: any open or read failure aborts
//! the whole computation and nothing partial escapes.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::CHUNK_SIZE;

/// Errors raised while hashing a document on disk.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContentError {
    /// The underlying I/O error kind, for callers that branch on
    /// `NotFound` versus `PermissionDenied`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Open { source, .. } | ContentError::Read { source, .. } => source.kind(),
        }
    }
}

/// Digest everything `reader` yields, returning lowercase hex.
///
/// Interrupted reads are retried; every other read error is returned as-is.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }

    tracing::trace!(bytes = total, "content digested");
    Ok(hex::encode(hasher.finalize()))
}

/// Digest the file at `path`, returning lowercase hex.
///
/// The file handle lives only for the duration of this call.
pub fn digest_file(path: impl AsRef<Path>) -> Result<String, ContentError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ContentError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = digest_reader(file).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), digest = %digest, "document hashed");
    Ok(digest)
}
