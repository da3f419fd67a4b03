//! Current-time provider for block timestamps.
//!
//! Blocks only ever see time through [`Clock`], so tests can pin the clock
//! and get byte-identical blocks across runs.

use chrono::{DateTime, SubsecRound, Utc};

use crate::config::TIMESTAMP_FORMAT;

/// Source of the current UTC time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render `instant` as a block timestamp (`YYYY-MM-DDTHH:MM:SSZ`).
/// Sub-second precision is truncated.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.trunc_subsecs(0).format(TIMESTAMP_FORMAT).to_string()
}

/// Block timestamp for "now" according to `clock`.
pub fn timestamp_now(clock: &dyn Clock) -> String {
    format_timestamp(clock.now())
}
