// Copyright (c) 2026 DocChain Contributors. MIT License.
// See LICENSE for details.

//! # DocChain CLI
//!
//! Entry point for the `docchain` binary. Parses CLI arguments, initializes
//! logging, loads the chain file, and runs one subcommand:
//!
//! - `add`      — register a document's digest on the chain
//! - `verify`   — check whether a document or digest is registered
//! - `show`     — print the chain
//! - `validate` — check the stored chain's integrity
//! - `version`  — print build version information
//!
//! The binary owns exactly one `Chain` per invocation. Nothing outlives the
//! process except the chain file.

mod cli;
mod filter;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use docchain_protocol::config::{HASH_ALGORITHM, PROTOCOL_VERSION};
use docchain_protocol::crypto::{digest_file, normalize_digest};
use docchain_protocol::storage::{Block, Chain, ChainStore, LoadOutcome};

use cli::{Commands, DocChainCli, GlobalArgs};
use filter::ExtensionFilter;

/// Result of a subcommand that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Pass,
    /// Document not registered, or chain invalid.
    Fail,
}

impl From<Verdict> for ExitCode {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => ExitCode::SUCCESS,
            Verdict::Fail => ExitCode::FAILURE,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = DocChainCli::parse();
    logging::init_logging(&cli.global.log_level, cli.global.log_format);

    let verdict = match cli.command {
        Commands::Add(args) => add_document(&cli.global, &args.file)?,
        Commands::Verify(args) => verify_document(&cli.global, args)?,
        Commands::Show => show_chain(&cli.global)?,
        Commands::Validate => validate_chain(&cli.global)?,
        Commands::Version => {
            print_version();
            Verdict::Pass
        }
    };
    Ok(verdict.into())
}

/// Loads the chain according to the fail-open or strict policy.
fn open_chain(global: &GlobalArgs) -> Result<(ChainStore, Chain)> {
    let store = ChainStore::new(&global.chain);

    if global.strict {
        let chain = store
            .load_strict()
            .with_context(|| format!("refusing to use chain file {}", store.path().display()))?;
        return Ok((store, chain));
    }

    // Fail-open: the store logs whatever it had to discard.
    let chain = store.load();
    Ok((store, chain))
}

/// Checks that `path` is a regular file with an accepted extension.
fn ensure_document(path: &Path, filter: &ExtensionFilter) -> Result<()> {
    if !path.is_file() {
        bail!("file not found: {}", path.display());
    }
    if !filter.allows(path) {
        bail!(
            "file extension not allowed: {} (allowed: {})",
            path.display(),
            filter
        );
    }
    Ok(())
}

fn extension_filter(global: &GlobalArgs) -> ExtensionFilter {
    global
        .allow_ext
        .as_deref()
        .map(ExtensionFilter::parse)
        .unwrap_or_default()
}

/// Hashes a document after the existence and extension checks.
fn hash_document(path: &Path, filter: &ExtensionFilter) -> Result<String> {
    ensure_document(path, filter)?;
    digest_file(path).with_context(|| format!("failed to hash {}", path.display()))
}

/// Registers a document, unless its digest is already on the chain.
fn add_document(global: &GlobalArgs, file: &Path) -> Result<Verdict> {
    let digest = hash_document(file, &extension_filter(global))?;
    let (store, mut chain) = open_chain(global)?;

    if let Some(block) = chain.find(&digest) {
        println!("Document already verified.");
        print_registration(block);
        return Ok(Verdict::Pass);
    }

    let block = chain
        .append(digest)
        .context("cannot register document on this chain")?
        .clone();
    store
        .save(&chain)
        .with_context(|| format!("failed to save chain to {}", store.path().display()))?;

    tracing::info!(index = block.index, digest = %block.data, "document registered");
    println!("Document added successfully.");
    print_registration(&block);
    Ok(Verdict::Pass)
}

/// Resolves the digest to look up from either a file or `--digest`.
fn resolve_digest(args: &cli::VerifyArgs, filter: &ExtensionFilter) -> Result<String> {
    match (&args.file, &args.digest) {
        (_, Some(raw)) => normalize_digest(raw)
            .with_context(|| format!("not a SHA-256 hex digest: {raw:?}")),
        (Some(file), None) => hash_document(file, filter),
        (None, None) => bail!("either a file or --digest is required"),
    }
}

/// Reports whether a document is registered. Exit code 1 when it is not.
fn verify_document(global: &GlobalArgs, args: cli::VerifyArgs) -> Result<Verdict> {
    let digest = resolve_digest(&args, &extension_filter(global))?;
    let (_, chain) = open_chain(global)?;

    match chain.find(&digest) {
        Some(block) => {
            println!("Document already verified.");
            print_registration(block);
            Ok(Verdict::Pass)
        }
        None => {
            println!("Document not found in the blockchain.");
            Ok(Verdict::Fail)
        }
    }
}

fn print_registration(block: &Block) {
    println!("  Block      : {}", block.index);
    println!("  Registered : {}", block.timestamp);
    println!("  Digest     : {}", block.data);
}

/// Prints the chain summary followed by every block.
fn show_chain(global: &GlobalArgs) -> Result<Verdict> {
    let (_, chain) = open_chain(global)?;
    let last = chain.last_block();

    println!("=== Blockchain ===");
    println!("Blocks: {}", chain.len());
    println!("Last Index: {} | Last Hash: {}", last.index, last.hash);
    for block in chain.blocks() {
        println!("Index: {}", block.index);
        println!("Timestamp: {}", block.timestamp);
        println!("Block Hash: {}", block.hash);
        println!("Previous Hash: {}", block.previous_hash);
        println!("Document Hash (data): {}", block.data);
        println!("{}", "-".repeat(40));
    }
    Ok(Verdict::Pass)
}

/// Validates the chain file as stored. A file that `load` would discard is
/// reported as invalid rather than masked by the fresh replacement.
fn validate_chain(global: &GlobalArgs) -> Result<Verdict> {
    let store = ChainStore::new(&global.chain);
    let (chain, outcome) = store.load_with_outcome();

    let verdict = match outcome {
        LoadOutcome::Loaded => chain.verify().map_err(|e| e.to_string()),
        LoadOutcome::Missing => {
            println!("No chain file at {}.", store.path().display());
            Ok(())
        }
        LoadOutcome::Unreadable(reason) | LoadOutcome::Unparsable(reason) => Err(reason),
        LoadOutcome::Invalid(e) => Err(e.to_string()),
    };

    match verdict {
        Ok(()) => {
            println!("Blockchain is valid.");
            Ok(Verdict::Pass)
        }
        Err(reason) => {
            println!("Blockchain is INVALID: {reason}");
            Ok(Verdict::Fail)
        }
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("docchain  {}", env!("CARGO_PKG_VERSION"));
    println!("protocol  {}", PROTOCOL_VERSION);
    println!("hash      {}", HASH_ALGORITHM);
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
