//! # Chain
//!
//! An ordered, append-only sequence of blocks rooted at a genesis block.
//!
//! A chain built in-process through [`Chain::append`] is valid by
//! construction. Validation exists for chains rebuilt from storage, where
//! anything could have happened to the bytes in between.
//!
//! ## Validity
//!
//! A chain is valid iff:
//!
//! 1. it is non-empty;
//! 2. block 0 has index 0 and the all-zero previous hash;
//! 3. block 0's stored hash matches its recomputed hash;
//! 4. every later block's `previous_hash` equals its predecessor's `hash`;
//! 5. every later block's stored hash matches its recomputed hash.
//!
//! Anything else is rejected as a whole. There is no partial repair.

use std::collections::HashMap;

use super::block::Block;
use crate::clock::{timestamp_now, Clock, SystemClock};

/// The first integrity violation found in a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("chain has no blocks")]
    Empty,

    #[error("genesis block has index {0}, expected 0")]
    GenesisIndex(u64),

    #[error("genesis block previous_hash is {0}, expected the zero sentinel")]
    GenesisPreviousHash(String),

    #[error("block at position {position} has index {found}, expected {position}")]
    IndexMismatch { position: usize, found: u64 },

    #[error("block {position} does not link to its parent: previous_hash={found}, parent hash={expected}")]
    BrokenLink {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("block {position} hash mismatch: stored={stored}, computed={computed}")]
    HashMismatch {
        position: usize,
        stored: String,
        computed: String,
    },

    #[error("tail block has index {0}; no further block can be appended")]
    IndexExhausted(u64),
}

/// Ordered chain of blocks, genesis first.
///
/// Never empty. Blocks are only ever added at the tail.
#[derive(Debug, Clone)]
pub struct Chain {
    blocks: Vec<Block>,
    /// `data` → position of the first block carrying it.
    by_data: HashMap<String, usize>,
}

impl Chain {
    /// A fresh chain holding only a genesis block stamped with the current time.
    pub fn new() -> Self {
        Self::with_clock(&SystemClock)
    }

    /// A fresh chain whose genesis timestamp comes from `clock`.
    pub fn with_clock(clock: &dyn Clock) -> Self {
        let genesis = Block::genesis(timestamp_now(clock));
        tracing::debug!(hash = %genesis.hash, "genesis block created");
        Self::index_blocks(vec![genesis])
    }

    /// Rebuild a chain from a stored block sequence.
    ///
    /// Only emptiness is rejected here. Link and hash checks are left to
    /// [`Chain::verify`] so callers decide what an invalid chain means.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, IntegrityError> {
        if blocks.is_empty() {
            return Err(IntegrityError::Empty);
        }
        Ok(Self::index_blocks(blocks))
    }

    fn index_blocks(blocks: Vec<Block>) -> Self {
        let mut by_data = HashMap::with_capacity(blocks.len());
        for (pos, block) in blocks.iter().enumerate() {
            by_data.entry(block.data.clone()).or_insert(pos);
        }
        Chain { blocks, by_data }
    }

    /// The tail block.
    pub fn last_block(&self) -> &Block {
        // Non-empty by construction.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Register `data` in a new tail block stamped with the current time.
    pub fn append(&mut self, data: impl Into<String>) -> Result<&Block, IntegrityError> {
        self.append_with_clock(data, &SystemClock)
    }

    /// Register `data` in a new tail block stamped by `clock`.
    ///
    /// Fails without touching the chain if the tail index cannot be
    /// incremented. Only a chain rebuilt from storage can get there.
    pub fn append_with_clock(
        &mut self,
        data: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<&Block, IntegrityError> {
        let tail = self.last_block();
        let block = Block::next(tail, data, timestamp_now(clock))
            .ok_or(IntegrityError::IndexExhausted(tail.index))?;
        tracing::debug!(index = block.index, data = %block.data, hash = %block.hash, "block appended");

        let pos = self.blocks.len();
        self.by_data.entry(block.data.clone()).or_insert(pos);
        self.blocks.push(block);
        Ok(&self.blocks[pos])
    }

    /// True iff some block's `data` equals `data` exactly.
    pub fn contains(&self, data: &str) -> bool {
        self.by_data.contains_key(data)
    }

    /// The first block whose `data` equals `data`.
    pub fn find(&self, data: &str) -> Option<&Block> {
        self.by_data.get(data).map(|&pos| &self.blocks[pos])
    }

    /// True iff every chain invariant holds.
    pub fn validate(&self) -> bool {
        self.verify().is_ok()
    }

    /// Check every chain invariant, stopping at the first violation.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        let genesis = self.blocks.first().ok_or(IntegrityError::Empty)?;

        if !genesis.is_genesis() {
            return Err(if genesis.index != 0 {
                IntegrityError::GenesisIndex(genesis.index)
            } else {
                IntegrityError::GenesisPreviousHash(genesis.previous_hash.clone())
            });
        }
        check_hash(0, genesis)?;

        for (pos, pair) in self.blocks.windows(2).enumerate() {
            let (prev, curr) = (&pair[0], &pair[1]);
            let pos = pos + 1;

            if curr.previous_hash != prev.hash {
                return Err(IntegrityError::BrokenLink {
                    position: pos,
                    expected: prev.hash.clone(),
                    found: curr.previous_hash.clone(),
                });
            }
            check_hash(pos, curr)?;
        }

        Ok(())
    }

    /// Like [`Chain::verify`], and additionally requires each block's
    /// `index` to equal its position.
    ///
    /// Positional indices are not part of the validity rules above: a
    /// chain whose indices skip is still accepted by `verify` as long as
    /// links and hashes hold. Use this for audits that want both.
    pub fn verify_strict(&self) -> Result<(), IntegrityError> {
        self.verify()?;
        for (pos, block) in self.blocks.iter().enumerate() {
            if block.index != pos as u64 {
                return Err(IntegrityError::IndexMismatch {
                    position: pos,
                    found: block.index,
                });
            }
        }
        Ok(())
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// True if no document has been registered yet.
    pub fn is_genesis_only(&self) -> bool {
        self.blocks.len() == 1
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

fn check_hash(position: usize, block: &Block) -> Result<(), IntegrityError> {
    if block.has_valid_hash() {
        return Ok(());
    }
    Err(IntegrityError::HashMismatch {
        position,
        stored: block.hash.clone(),
        computed: block.compute_hash(),
    })
}
