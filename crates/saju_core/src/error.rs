//! Error types shared by all engine crates.
//!
//! Pure computation has no transient failure mode: nothing here is
//! retryable, and construction either fully succeeds or fails atomically.

use thiserror::Error;

/// Errors from Saju calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SajuError {
    /// Stem or branch index outside its declared range.
    #[error("invalid {kind} index: {value}")]
    InvalidPillarIndex {
        /// Which coordinate was out of range ("stem" or "branch").
        kind: &'static str,
        /// The offending raw value.
        value: i64,
    },
    /// Stem and branch disagree on yin/yang parity.
    #[error("parity mismatch: stem {stem} and branch {branch} differ in polarity")]
    ParityMismatch {
        /// Raw stem index.
        stem: u8,
        /// Raw branch index.
        branch: u8,
    },
    /// Fewer than the required Year/Month/Day pillars were supplied.
    #[error("insufficient pillars: got {got}, need at least 3")]
    InsufficientPillars {
        /// How many pillars were present.
        got: usize,
    },
    /// The datetime string matched none of the accepted layouts.
    #[error("unsupported datetime format: {input:?}")]
    UnsupportedDatetimeFormat {
        /// The rejected input string.
        input: String,
    },
    /// Timezone offset outside ±1080 minutes.
    #[error("invalid timezone offset: {minutes} minutes")]
    InvalidTimezoneOffset {
        /// The offending offset.
        minutes: i32,
    },
    /// A fortune-window range parameter was out of bounds.
    #[error("invalid range parameter: {0}")]
    InvalidRangeParameter(&'static str),
}
