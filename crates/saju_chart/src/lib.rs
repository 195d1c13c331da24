//! Single-chart Saju engine.
//!
//! This crate turns a birth input into an immutable `SajuDoc`:
//! - Pillar/graph construction with positional strength weights
//! - Ten-god, twelve-fate and five-element derivation per node
//! - Element distribution, balance/support/overall scoring
//! - Fact/eval assembly with evidence
//! - Hour-uncertainty candidates and stable id sets
//! - Daeun/Seun/Wolun/Ilun fortune periods
//!
//! Every construction call is pure; the injected "now" feeds only the
//! creation timestamp and current-period selection.

pub mod chart;
pub mod doc;
pub mod facts;
pub mod fortune;
pub mod graph;
pub mod hour;
pub mod input;
pub mod score;

pub use chart::{build_chart, build_chart_from_raw};
pub use doc::{
    DaeunPeriod, Edge, EdgeKind, ElDistribution, EvalItem, Evidence, FactItem, FortuneKind,
    HourCandidate, HourContext, HourStatus, Node, NodeKind, Pillar, RULE_VER, SCHEMA_VER, SajuDoc,
    Score, ScorePart,
};
pub use facts::dominant_relation;
pub use hour::HOUR_WINDOWS;
pub use input::{BirthInput, CalendarTag, EngineMeta, FortuneWindow, GeoPoint, Sex};
pub use score::{balance_score, conflict_penalty, distribution, overall_score, support_score};
