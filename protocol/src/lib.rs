// Copyright (c) 2026 DocChain Contributors. MIT License.
// See LICENSE for details.

//! # DocChain — Core Library
//!
//! Proof that a document existed, unchanged, at some point in the past.
//! Each registered document's SHA-256 digest is sealed into a block, and
//! each block is sealed into the next by hash, so editing any stored
//! registration breaks every link after it.
//!
//! ## Architecture
//!
//! - **crypto** — SHA-256 helpers and streaming document digests.
//! - **storage** — Blocks, the chain, and the chain file.
//! - **clock** — Where block timestamps come from.
//! - **config** — Protocol constants.
//!
//! ## Scope
//!
//! One writer, one process, one local file. There is no replication,
//! consensus, mining, or block signing: the chain detects tampering, it
//! does not arbitrate between parties.
//!
//! ## Example
//!
//! ```
//! use docchain_protocol::storage::ChainStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = ChainStore::new(dir.path().join("blockchain.json"));
//!
//! let mut chain = store.load();
//! let digest = docchain_protocol::crypto::sha256_hex(b"contract v1");
//! chain.append(digest.clone()).unwrap();
//! store.save(&chain).unwrap();
//!
//! let reloaded = store.load();
//! assert!(reloaded.validate());
//! assert!(reloaded.contains(&digest));
//! ```

pub mod clock;
pub mod config;
pub mod crypto;
pub mod storage;

pub use storage::{Block, Chain, ChainStore};
