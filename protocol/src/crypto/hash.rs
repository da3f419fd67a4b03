//! # Hashing Utilities
//!
//! SHA-256 helpers shared by the block hasher and the content hasher. Block
//! hashes, document digests, and the genesis sentinel are all 64-character
//! lowercase hex strings, so the helpers here speak hex as well as bytes.

use sha2::{Digest, Sha256};

use crate::config::DIGEST_HEX_LENGTH;

/// Compute the SHA-256 hash of the input data as a fixed-size array.
///
/// # Example
///
/// ```
/// use docchain_protocol::crypto::sha256;
///
/// let hash = sha256(b"docchain");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-256 hash of the input data as lowercase hex.
///
/// # Example
///
/// ```
/// use docchain_protocol::crypto::sha256_hex;
///
/// let hash = sha256_hex(b"docchain");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Return true if `s` has the shape of a digest this crate produces:
/// exactly 64 lowercase hex characters.
///
/// Uppercase input is rejected on purpose. Membership checks compare
/// digests byte-for-byte, so callers should normalize before asking.
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == DIGEST_HEX_LENGTH && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Normalize user-supplied digest text: trim whitespace and lowercase it.
///
/// Returns `None` when the result is not a well-formed digest.
pub fn normalize_digest(s: &str) -> Option<String> {
    let normalized = s.trim().to_ascii_lowercase();
    is_hex_digest(&normalized).then_some(normalized)
}
