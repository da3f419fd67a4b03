//! # CLI Interface
//!
//! Defines the command-line argument structure for `docchain` using
//! `clap` derive. Subcommands: `add`, `verify`, `show`, `validate`, and
//! `version`. Every global option can also be set from the environment.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use docchain_protocol::config::DEFAULT_CHAIN_FILE;

use crate::logging::LogFormat;

/// Register documents on a tamper-evident hash chain and verify them later.
#[derive(Parser, Debug)]
#[command(
    name = "docchain",
    about = "Register and verify documents on a tamper-evident hash chain",
    version,
    propagate_version = true
)]
pub struct DocChainCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to the chain file. Created on the first `add`.
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "DOCCHAIN_CHAIN_FILE",
        default_value = DEFAULT_CHAIN_FILE
    )]
    pub chain: PathBuf,

    /// Comma-separated list of accepted file extensions, e.g. `.pdf,.docx`.
    ///
    /// Empty or absent means every extension is accepted.
    #[arg(long, global = true, env = "DOCCHAIN_ALLOWED_EXT", value_name = "LIST")]
    pub allow_ext: Option<String>,

    /// Refuse to run when the chain file exists but is unreadable, corrupt,
    /// or fails validation, instead of starting over with a fresh chain.
    #[arg(long, global = true, env = "DOCCHAIN_STRICT")]
    pub strict: bool,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "DOCCHAIN_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a document: hash it and append the digest to the chain.
    Add(AddArgs),
    /// Check whether a document (or digest) is registered on the chain.
    Verify(VerifyArgs),
    /// Print every block in the chain.
    Show,
    /// Check the integrity of the stored chain.
    Validate,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `add` subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Document to register.
    pub file: PathBuf,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Document to look up.
    #[arg(required_unless_present = "digest")]
    pub file: Option<PathBuf>,

    /// Look up a precomputed SHA-256 hex digest instead of hashing a file.
    #[arg(long, conflicts_with = "file")]
    pub digest: Option<String>,
}
