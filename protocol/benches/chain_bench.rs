// Hashing & chain benchmarks for DocChain.
//
// Covers streaming document digests at several sizes, block hashing,
// append, full-chain validation, and a save/load round trip.

use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use docchain_protocol::crypto::{digest_reader, sha256_hex};
use docchain_protocol::storage::{compute_block_hash, Chain, ChainStore};

fn build_chain(len: usize) -> Chain {
    let mut chain = Chain::new();
    for i in 0..len {
        chain
            .append(sha256_hex(&(i as u64).to_le_bytes()))
            .unwrap();
    }
    chain
}

fn bench_content_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("content/digest_reader");
    for size in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let data = vec![0x5Au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| digest_reader(Cursor::new(data.as_slice())));
        });
    }
    group.finish();
}

fn bench_block_hash(c: &mut Criterion) {
    let data = "aa".repeat(32);
    let prev = "bb".repeat(32);
    c.bench_function("block/compute_hash", |b| {
        b.iter(|| compute_block_hash(42, "2026-01-15T09:30:00Z", &data, &prev));
    });
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("chain/append", |b| {
        let mut chain = Chain::new();
        let data = "cc".repeat(32);
        b.iter(|| {
            chain.append(data.clone()).unwrap();
        });
    });
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/validate");
    for len in [10, 100, 1_000] {
        let chain = build_chain(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &chain, |b, chain| {
            b.iter(|| chain.validate());
        });
    }
    group.finish();
}

fn bench_store_roundtrip(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ChainStore::new(dir.path().join("blockchain.json"));
    let chain = build_chain(1_000);

    c.bench_function("store/save_load_1000", |b| {
        b.iter(|| {
            store.save(&chain).expect("save");
            store.load()
        });
    });
}

criterion_group!(
    benches,
    bench_content_digest,
    bench_block_hash,
    bench_append,
    bench_validate,
    bench_store_roundtrip,
);
criterion_main!(benches);
