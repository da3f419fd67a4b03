//! End-to-end tests for DocChain.
//!
//! These walk the full lifecycle through the public API only: hash a file
//! on disk, register it, persist the chain, reload it, and check that
//! tampering with the file on disk is caught at load time.
//!
//! Each test gets its own temporary directory.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};

use docchain_protocol::clock::FixedClock;
use docchain_protocol::config::{DEFAULT_CHAIN_FILE, GENESIS_PREVIOUS_HASH};
use docchain_protocol::crypto::{digest_file, is_hex_digest, sha256_hex};
use docchain_protocol::storage::{Chain, ChainStore, IntegrityError, LoadOutcome};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn write_document(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write document");
    path
}

fn store_in(dir: &Path) -> ChainStore {
    ChainStore::new(dir.join(DEFAULT_CHAIN_FILE))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn register_and_verify_document_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_document(dir.path(), "deed.pdf", b"title deed, parcel 42");
    let store = store_in(dir.path());

    // First run: nothing on disk yet.
    let mut chain = store.load();
    assert!(chain.is_genesis_only());

    let digest = digest_file(&doc).unwrap();
    assert!(is_hex_digest(&digest));
    assert!(!chain.contains(&digest));

    let block = chain.append(digest.clone()).unwrap().clone();
    store.save(&chain).unwrap();

    // Second run: the registration survived.
    let (reloaded, outcome) = store.load_with_outcome();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert!(reloaded.validate());
    assert_eq!(reloaded.find(&digest), Some(&block));
}

#[test]
fn edited_document_is_not_verified() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_document(dir.path(), "report.txt", b"Q3 revenue: 100");
    let mut chain = Chain::new();
    chain.append(digest_file(&doc).unwrap()).unwrap();

    fs::write(&doc, b"Q3 revenue: 1000").unwrap();
    assert!(!chain.contains(&digest_file(&doc).unwrap()));
}

#[test]
fn fresh_chain_append_scenario() {
    let mut chain = Chain::new();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.last_block().previous_hash, GENESIS_PREVIOUS_HASH);

    let aa = "aa".repeat(32);
    let bb = "bb".repeat(32);
    chain.append(aa.clone()).unwrap();

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.blocks()[1].previous_hash, chain.blocks()[0].hash);
    assert!(chain.validate());
    assert!(chain.contains(&aa));
    assert!(!chain.contains(&bb));
}

#[test]
fn corrupted_store_falls_back_to_valid_genesis() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let mut chain = Chain::new();
    chain.append("aa".repeat(32)).unwrap();
    chain.append("bb".repeat(32)).unwrap();
    assert_eq!(chain.len(), 3);
    store.save(&chain).unwrap();

    let mut bytes = fs::read(store.path()).unwrap();
    bytes[0] ^= 0xFF;
    fs::write(store.path(), &bytes).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.validate());
}

#[test]
fn relinked_forgery_is_rejected() {
    // Rewrite block 1 with a new document and fix up its own hash. The
    // forgery is only caught because block 2 still points at the old hash.
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let mut chain = Chain::new();
    chain.append(sha256_hex(b"original")).unwrap();
    chain.append(sha256_hex(b"later")).unwrap();
    store.save(&chain).unwrap();

    let mut records: Vec<serde_json::Value> =
        serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
    let forged = docchain_protocol::Block::new(
        1,
        records[1]["timestamp"].as_str().unwrap(),
        sha256_hex(b"forged"),
        records[1]["previous_hash"].as_str().unwrap(),
    );
    records[1] = serde_json::to_value(&forged).unwrap();
    fs::write(store.path(), serde_json::to_vec_pretty(&records).unwrap()).unwrap();

    let (loaded, outcome) = store.load_with_outcome();
    assert!(matches!(
        outcome,
        LoadOutcome::Invalid(IntegrityError::BrokenLink { position: 2, .. })
    ));
    assert!(loaded.is_genesis_only());
    assert!(!loaded.contains(&sha256_hex(b"forged")));
}

#[test]
fn reads_hand_written_chain_file() {
    // A chain file typed out by hand in the documented layout, with a
    // pinned genesis hash. Guards the on-disk format and the encoding.
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let genesis = docchain_protocol::Block::genesis("2026-01-15T09:30:00Z");
    assert_eq!(
        genesis.hash,
        "9908e51c84004b7aa82085fcca4ac746567fe3190767d3f52b7e7449c5fdae3a"
    );

    let text = format!(
        "[\n  {{\n    \"index\": 0,\n    \"timestamp\": \"2026-01-15T09:30:00Z\",\n    \"data\": \"GENESIS\",\n    \"previous_hash\": \"{}\",\n    \"hash\": \"{}\"\n  }}\n]",
        GENESIS_PREVIOUS_HASH, genesis.hash
    );
    fs::write(store.path(), text).unwrap();

    let (chain, outcome) = store.load_with_outcome();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(chain.blocks(), &[genesis]);
}

#[test]
fn deterministic_chains_with_fixed_clock() {
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap());
    let build = || {
        let mut chain = Chain::with_clock(&clock);
        chain.append_with_clock("aa".repeat(32), &clock).unwrap();
        chain
    };
    let (a, b) = (build(), build());
    assert_eq!(a.blocks(), b.blocks());
    assert_eq!(a.last_block().timestamp, "2026-06-01T12:00:00Z");
}

#[test]
fn save_then_load_roundtrip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let mut chain = Chain::new();
    for i in 0..10u8 {
        chain.append(sha256_hex(&[i])).unwrap();
    }
    store.save(&chain).unwrap();

    let strict = store.load_strict().unwrap();
    assert_eq!(strict.blocks(), chain.blocks());
    assert_eq!(strict.validate(), chain.validate());
}

#[test]
fn stored_tail_at_max_index_refuses_further_appends() {
    // Indices after genesis are not part of validity, so this file loads.
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let genesis = docchain_protocol::Block::genesis("2026-01-15T09:30:00Z");
    let tail = docchain_protocol::Block::new(
        u64::MAX,
        "2026-01-15T09:30:00Z",
        "aa".repeat(32),
        genesis.hash.clone(),
    );
    let stored = Chain::from_blocks(vec![genesis, tail]).unwrap();
    store.save(&stored).unwrap();

    let (mut chain, outcome) = store.load_with_outcome();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert!(chain.validate());

    let err = chain.append("bb".repeat(32)).unwrap_err();
    assert_eq!(err, IntegrityError::IndexExhausted(u64::MAX));
    assert_eq!(chain.blocks(), stored.blocks());
}
