//! Two-chart Saju compatibility engine.
//!
//! Consumes two `SajuDoc`s and produces a `PairDoc`: cross-chart relation
//! edges per pillar position, the aggregated compatibility metrics with a
//! five-part overall score, pair facts/evals with split A/B evidence, and a
//! capped hour-candidate projection when either birth time is uncertain.
//!
//! Construction is pure; the injected "now" feeds only the creation
//! timestamp.

pub mod doc;
pub mod engine;

pub use doc::{
    PAIR_SCHEMA_VER, PairDoc, PairEdge, PairEvalItem, PairEvidence, PairFactItem,
    PairHourCandidate, PairHourContext, PairMetrics,
};
pub use engine::build_pair;
