//! Pair document types.
//!
//! Mirrors of the single-chart output shapes, with every reference split
//! into an A-side and a B-side node id. Field names are a wire contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use saju_core::{FiveElement, PillarKey};

use saju_chart::{EdgeKind, HourCandidate, HourStatus, RULE_VER, Score};

/// Pair document schema version.
pub const PAIR_SCHEMA_VER: &str = "saju.pair.v1";

/// One cross-chart edge between an A-side and a B-side node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairEdge {
    pub id: u32,
    pub kind: EdgeKind,
    /// Pillar position this edge was tested at.
    pub position: PillarKey,
    pub a_node: u32,
    pub b_node: u32,
    /// Weight in (0, 1].
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_element: Option<FiveElement>,
    pub active: bool,
}

/// Why a pair fact or eval holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairEvidence {
    pub rule_id: String,
    pub rule_ver: String,
    pub a_node_refs: Vec<u32>,
    pub b_node_refs: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PairEvidence {
    pub fn new(rule_id: impl Into<String>, a_node_refs: Vec<u32>, b_node_refs: Vec<u32>) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_ver: RULE_VER.to_string(),
            a_node_refs,
            b_node_refs,
            params: None,
            note: None,
        }
    }
}

/// A derived pair conclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairFactItem {
    pub id: String,
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub evidence: PairEvidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

/// A derived pair judgement; always scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairEvalItem {
    pub id: String,
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub evidence: PairEvidence,
    pub score: Score,
}

/// The aggregated compatibility metrics, all in fixed 0-100 (net: ±100)
/// ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairMetrics {
    pub harmony_index: f64,
    pub conflict_index: f64,
    /// harmony − conflict, clamped to [-100, 100].
    pub net_index: f64,
    pub element_complement: f64,
    pub useful_god_support: f64,
    pub role_fit: f64,
    pub pressure_risk: f64,
    pub confidence: f64,
    pub sensitivity: f64,
    pub timing_alignment: f64,
}

/// One projected A×B hour combination; each side is a single-chart
/// hour candidate (the known pillar counts as a certain one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairHourCandidate {
    pub a: HourCandidate,
    pub b: HourCandidate,
    /// Product of the two side weights.
    pub weight: f64,
    pub score: f64,
    pub confidence: f64,
}

/// Pair-level hour uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairHourContext {
    pub a_status: HourStatus,
    pub b_status: HourStatus,
    /// Empty when both hours are known; capped cross-product otherwise.
    pub candidates: Vec<PairHourCandidate>,
}

/// The two-chart compatibility document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDoc {
    pub schema_ver: String,
    /// Day-master stem indices of the two sides.
    pub a_day_master: u8,
    pub b_day_master: u8,
    pub edges: Vec<PairEdge>,
    pub facts: Vec<PairFactItem>,
    pub evals: Vec<PairEvalItem>,
    pub metrics: PairMetrics,
    pub hour_ctx: PairHourContext,
    /// RFC3339 creation timestamp (the injected "now").
    pub created_at: String,
}
