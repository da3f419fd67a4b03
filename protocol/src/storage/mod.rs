//! # Storage Module
//!
//! The hash chain itself and its on-disk form.
//!
//! ## Architecture
//!
//! ```text
//! block.rs  — Block record, canonical encoding, block hashing
//! chain.rs  — In-memory chain: genesis, append, lookup, validation
//! store.rs  — JSON chain file with atomic save and fail-open load
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! digest → Chain::append → Block::next → compute_block_hash
//!                ↓
//!        ChainStore::save ──► blockchain.json ──► ChainStore::load → Chain::verify
//! ```
//!
//! ## Design Decisions
//!
//! 1. **SHA-256 everywhere.** Document digests and block hashes use the
//!    same function and the same hex form, so a chain file can be audited
//!    with nothing more than `sha256sum` and a JSON reader.
//!
//! 2. **One JSON document per chain.** Saves rewrite the whole file. The
//!    chains this is built for are small enough that full rewrites are
//!    cheaper than the bookkeeping an incremental log would need.
//!
//! 3. **Fail-open loading.** A damaged chain file is replaced by a fresh
//!    chain rather than refusing to start. See [`store`] for the stricter
//!    variants.

pub mod block;
pub mod chain;
pub mod store;

pub use block::{canonical_encoding, compute_block_hash, Block};
pub use chain::{Chain, IntegrityError};
pub use store::{ChainStore, LoadOutcome, StoreError, StoreResult};
