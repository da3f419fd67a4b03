//! # Logging
//!
//! Diagnostics for `docchain` go through `tracing` and land on stderr.
//! Stdout is reserved for command results, so `docchain show > chain.txt`
//! or `docchain verify --digest .. | grep` never pick up log lines.
//!
//! The default filter is `warn`: a normal run prints nothing but its
//! result, while a chain file that had to be discarded still shows up.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How log events are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One readable line per event.
    Pretty,
    /// One JSON object per event, for scripts that wrap the binary.
    Json,
}

/// Install the process-wide subscriber. Must run once, before any command.
///
/// `RUST_LOG` wins over `default_level` (the `--log-level` flag or
/// `DOCCHAIN_LOG`). Both take `EnvFilter` directives, so
/// `docchain_protocol=debug` traces every load, append and save.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!(?format, "logging initialized");
}
