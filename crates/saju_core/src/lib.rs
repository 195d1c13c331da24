//! Sexagenary (stem/branch) arithmetic and lookup tables for Saju charts.
//!
//! This crate provides:
//! - The 10 heavenly stems and 12 earthly branches with element/polarity data
//! - Sexagenary cycle index, na-yin labels, void-branch pairs, parity rule
//! - Hidden-stem, ten-god and twelve-fate derivation tables
//! - Stem/branch relation tables (combination, clash, punishment, harm,
//!   break, triad)
//! - The `RawPillars` contract consumed by the chart engine
//!
//! All tables are immutable statics; every function is pure.

pub mod branch;
pub mod cycle;
pub mod element;
pub mod error;
pub mod pillar;
pub mod relation;
pub mod stem;
pub mod ten_god;
pub mod twelve_fate;
pub mod util;

pub use branch::{ALL_BRANCHES, Branch, hidden_stems};
pub use cycle::{na_yin, sexagenary_index, validate, void_branches};
pub use element::{ALL_ELEMENTS, FiveElement, Polarity};
pub use error::SajuError;
pub use pillar::{ALL_PILLAR_KEYS, PillarKey, RawPair, RawPillars};
pub use relation::{
    ALL_RELATIONS, RelationKind, branch_relations, is_break, is_clash, is_harm, is_punishment,
    is_six_combination, stem_combination, triad_combination,
};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{TenGod, ten_god};
pub use twelve_fate::{ALL_FATES, TwelveFate, twelve_fate};
pub use util::{clamp0_100, clamp01, collect_refs, mod10, mod12, mod60};
