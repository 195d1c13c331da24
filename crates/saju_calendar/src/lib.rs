//! Timestamp-based Four Pillars calculator.
//!
//! This crate provides:
//! - Solar-term day lookup (per-year table with template fallback)
//! - The timestamp → raw-pillar calculator (lichun year boundary, 3-year
//!   month-boundary window, anchored day count, hour formula)
//! - Multi-layout local datetime parsing with precision detection
//!
//! It emits `saju_core::RawPillars`; the chart engine never sees an instant.

pub mod datetime;
pub mod pillars;
pub mod solar_terms;

pub use datetime::{ParsedLocal, TimePrecision, parse_local};
pub use pillars::{
    DEFAULT_TZ_OFFSET_MIN, MAX_TZ_OFFSET_MIN, hour_branch, hour_stem, raw_pillars_at,
    raw_pillars_local,
};
pub use solar_terms::{MONTH_TERMS, TermTemplate, lichun_day, term_day};
