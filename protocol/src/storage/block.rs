//! # Block Structure
//!
//! A block records one registration event: "this document digest was seen
//! at this time, after everything before it".
//!
//! ## Block Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Block                                               │
//! │  ├── index: u64            (0 = genesis)             │
//! │  ├── timestamp: String     (YYYY-MM-DDTHH:MM:SSZ)    │
//! │  ├── data: String          (document digest, hex)    │
//! │  ├── previous_hash: String (parent hash, hex)        │
//! │  └── hash: String          (SHA-256 of the above)    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The block hash covers `index`, `timestamp`, `data` and `previous_hash`
//! through a canonical encoding: a compact JSON object with sorted keys,
//!
//! ```text
//! {"data":"…","index":N,"previous_hash":"…","timestamp":"…"}
//! ```
//!
//! with every character outside printable ASCII escaped as `\uXXXX`. The
//! `hash` field itself is never part of its own preimage.
//!
//! The encoding is written by hand rather than through `serde_json` so that
//! the byte layout cannot drift with a dependency upgrade.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::{GENESIS_DATA, GENESIS_PREVIOUS_HASH};
use crate::crypto::hash::sha256_hex;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// One registration event in the chain.
///
/// Field names and declaration order are the on-disk record format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0-indexed, genesis = 0).
    pub index: u64,
    /// Creation time, UTC, second resolution.
    pub timestamp: String,
    /// Digest of the registered document, or [`GENESIS_DATA`] for block 0.
    pub data: String,
    /// Hash of the preceding block. [`GENESIS_PREVIOUS_HASH`] for genesis.
    pub previous_hash: String,
    /// SHA-256 over the canonical encoding of the four fields above.
    pub hash: String,
}

impl Block {
    /// Construct a block and compute its hash from the other fields.
    pub fn new(
        index: u64,
        timestamp: impl Into<String>,
        data: impl Into<String>,
        previous_hash: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        let data = data.into();
        let previous_hash = previous_hash.into();
        let hash = compute_block_hash(index, &timestamp, &data, &previous_hash);

        Block {
            index,
            timestamp,
            data,
            previous_hash,
            hash,
        }
    }

    /// Construct the genesis block: index 0, the genesis payload, and the
    /// all-zero previous hash.
    pub fn genesis(timestamp: impl Into<String>) -> Self {
        Block::new(0, timestamp, GENESIS_DATA, GENESIS_PREVIOUS_HASH)
    }

    /// Construct the block that follows `parent`.
    ///
    /// `None` if `parent` already carries the largest representable index.
    pub fn next(
        parent: &Block,
        data: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Option<Self> {
        let index = parent.index.checked_add(1)?;
        Some(Block::new(index, timestamp, data, parent.hash.clone()))
    }

    /// Recompute the hash from the stored fields.
    pub fn compute_hash(&self) -> String {
        compute_block_hash(self.index, &self.timestamp, &self.data, &self.previous_hash)
    }

    /// True if the stored `hash` matches the recomputed one.
    pub fn has_valid_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// True if this block is shaped like a genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

// ---------------------------------------------------------------------------
// Hash Computation
// ---------------------------------------------------------------------------

/// Compute a block hash from its linkage fields.
///
/// Pure: identical arguments always produce the identical digest.
pub fn compute_block_hash(index: u64, timestamp: &str, data: &str, previous_hash: &str) -> String {
    sha256_hex(canonical_encoding(index, timestamp, data, previous_hash).as_bytes())
}

/// The canonical preimage of a block hash.
pub fn canonical_encoding(index: u64, timestamp: &str, data: &str, previous_hash: &str) -> String {
    let mut out = String::with_capacity(64 + timestamp.len() + data.len() + previous_hash.len());
    out.push_str("{\"data\":");
    push_json_str(&mut out, data);
    // Writing into a String cannot fail.
    let _ = write!(out, ",\"index\":{index},\"previous_hash\":");
    push_json_str(&mut out, previous_hash);
    out.push_str(",\"timestamp\":");
    push_json_str(&mut out, timestamp);
    out.push('}');
    out
}

/// Append `s` as an ASCII-only JSON string literal.
fn push_json_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out.push('"');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
