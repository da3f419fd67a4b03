//! # Protocol Configuration & Constants
//!
//! Every fixed parameter of a DocChain lives here. Changing any of the
//! hashing or genesis constants changes every block hash downstream, which
//! invalidates every chain file written before the change. Treat them as
//! frozen.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Library/protocol version string reported by the CLI.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Hashing Parameters
// ---------------------------------------------------------------------------

/// The digest used for document contents and block hashes.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Digest output length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Length of a hex-encoded digest. Two characters per byte.
pub const DIGEST_HEX_LENGTH: usize = HASH_OUTPUT_LENGTH * 2;

/// Read buffer size used when hashing documents. Peak memory while hashing
/// a file is bounded by this, not by the file size.
pub const CHUNK_SIZE: usize = 8 * 1024;

// ---------------------------------------------------------------------------
// Genesis Parameters
// ---------------------------------------------------------------------------

/// Payload of the genesis block. Not valid hex, so it can never collide
/// with a real document digest.
pub const GENESIS_DATA: &str = "GENESIS";

/// Previous-hash sentinel for the genesis block: a digest-length run of `0`.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

// ---------------------------------------------------------------------------
// Time & Storage
// ---------------------------------------------------------------------------

/// `chrono` format string for block timestamps: UTC, second resolution,
/// explicit `Z` marker. Example: `2026-01-15T09:30:00Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Chain file used when the caller does not name one.
pub const DEFAULT_CHAIN_FILE: &str = "blockchain.json";
