//! # Cryptographic Primitives for DocChain
//!
//! Two concerns live here and nothing else:
//!
//! - **hash** — SHA-256 over in-memory bytes, hex helpers, digest shape checks.
//! - **content** — streaming SHA-256 over files and readers, in fixed chunks.
//!
//! Everything is a thin wrapper around the audited `sha2` implementation.

pub mod content;
pub mod hash;

pub use content::{digest_file, digest_reader, ContentError};
pub use hash::{is_hex_digest, normalize_digest, sha256, sha256_hex};
