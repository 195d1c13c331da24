//! Output document types.
//!
//! `SajuDoc` and its parts are a wire contract: field names and optionality
//! are depended on by downstream consumers and must not drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use saju_core::{
    Branch, FiveElement, PillarKey, Polarity, RelationKind, SajuError, Stem, TenGod, TwelveFate,
    clamp01,
};

use crate::input::BirthInput;

/// Document schema version.
pub const SCHEMA_VER: &str = "saju.v1";

/// Evidence rule version stamped on every fact/eval.
pub const RULE_VER: &str = "1.0.0";

/// Graph vertex kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Stem,
    Branch,
    Hidden,
}

/// One graph vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Sequential id, 1-based, never reused within a document.
    pub id: u32,
    pub kind: NodeKind,
    pub pillar: PillarKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_slot: Option<u8>,
    pub element: FiveElement,
    pub polarity: Polarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ten_god: Option<TenGod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twelve_fate: Option<TwelveFate>,
    /// Positional strength weight.
    pub strength: f64,
}

/// Edge kinds: structural links plus the relational kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Stem↔branch within one pillar.
    PillarLink,
    /// Branch↔hidden stem within one pillar.
    HiddenLink,
    StemCombination,
    Clash,
    SixCombination,
    Punishment,
    Harm,
    Break,
    TriadCombination,
}

impl From<RelationKind> for EdgeKind {
    fn from(r: RelationKind) -> Self {
        match r {
            RelationKind::StemCombination => Self::StemCombination,
            RelationKind::Clash => Self::Clash,
            RelationKind::SixCombination => Self::SixCombination,
            RelationKind::Punishment => Self::Punishment,
            RelationKind::Harm => Self::Harm,
            RelationKind::Break => Self::Break,
            RelationKind::TriadCombination => Self::TriadCombination,
        }
    }
}

impl EdgeKind {
    /// The relational kind, if this is not a structural link.
    pub const fn relation(self) -> Option<RelationKind> {
        match self {
            Self::PillarLink | Self::HiddenLink => None,
            Self::StemCombination => Some(RelationKind::StemCombination),
            Self::Clash => Some(RelationKind::Clash),
            Self::SixCombination => Some(RelationKind::SixCombination),
            Self::Punishment => Some(RelationKind::Punishment),
            Self::Harm => Some(RelationKind::Harm),
            Self::Break => Some(RelationKind::Break),
            Self::TriadCombination => Some(RelationKind::TriadCombination),
        }
    }
}

/// One graph edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: u32,
    pub kind: EdgeKind,
    pub from: u32,
    pub to: u32,
    /// Weight in (0, 1].
    pub weight: f64,
    /// Resulting element, only for combination-type results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_element: Option<FiveElement>,
    /// Always true at construction.
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<u32>>,
}

/// Why a fact or eval holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub rule_id: String,
    pub rule_ver: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub node_refs: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Evidence {
    pub fn new(rule_id: impl Into<String>, node_refs: Vec<u32>) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_ver: RULE_VER.to_string(),
            system: None,
            node_refs,
            params: None,
            note: None,
        }
    }
}

/// One weighted component of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePart {
    pub label: String,
    pub weight: f64,
    pub value: f64,
    pub refs: Vec<u32>,
}

/// A normalized score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub total: f64,
    pub min: f64,
    pub max: f64,
    /// Linear rescale of `total` within [min, max], clamped to [0, 100].
    #[serde(rename = "norm0_100")]
    pub norm0_100: f64,
    /// Clamped to [0, 1].
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<ScorePart>>,
}

impl Score {
    /// Build a score, deriving the clamped normalization.
    pub fn new(total: f64, min: f64, max: f64, confidence: f64) -> Self {
        let norm = if max > min {
            clamp01((total - min) / (max - min)) * 100.0
        } else {
            0.0
        };
        Self {
            total,
            min,
            max,
            norm0_100: norm,
            confidence: clamp01(confidence),
            parts: None,
        }
    }

    pub fn with_parts(mut self, parts: Vec<ScorePart>) -> Self {
        self.parts = Some(parts);
        self
    }
}

/// A derived conclusion without judgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactItem {
    pub id: String,
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub node_refs: Vec<u32>,
    pub evidence: Evidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

/// A derived judgement; always scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalItem {
    pub id: String,
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub node_refs: Vec<u32>,
    pub evidence: Evidence,
    pub score: Score,
}

/// Weighted five-element proportions, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElDistribution {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl ElDistribution {
    /// Uniform fallback when no nodes exist.
    pub const fn uniform() -> Self {
        Self {
            wood: 0.2,
            fire: 0.2,
            earth: 0.2,
            metal: 0.2,
            water: 0.2,
        }
    }

    pub fn get(&self, el: FiveElement) -> f64 {
        match el {
            FiveElement::Wood => self.wood,
            FiveElement::Fire => self.fire,
            FiveElement::Earth => self.earth,
            FiveElement::Metal => self.metal,
            FiveElement::Water => self.water,
        }
    }

    /// Sum of absolute deviations from the uniform 0.2 share.
    pub fn deviation(&self) -> f64 {
        [self.wood, self.fire, self.earth, self.metal, self.water]
            .iter()
            .map(|v| (v - 0.2).abs())
            .sum()
    }
}

/// One display pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub key: PillarKey,
    pub stem: u8,
    pub branch: u8,
    /// Hidden stem indices, residual → primary.
    pub hidden: Vec<u8>,
    pub na_yin: String,
    /// The two void branches of this pair's decade.
    pub void: [u8; 2],
}

/// Hour knowledge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HourStatus {
    Known,
    Estimated,
    Missing,
}

/// One possible hour pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCandidate {
    pub stem: u8,
    pub branch: u8,
    pub weight: f64,
    /// Display window, e.g. "13:00-14:59".
    pub window: String,
}

/// Hour-uncertainty context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourContext {
    pub status: HourStatus,
    /// Ids unaffected by the hour; full sets whenever status ≠ KNOWN.
    pub stable_node_ids: Vec<u32>,
    pub stable_edge_ids: Vec<u32>,
    pub stable_fact_ids: Vec<String>,
    pub stable_eval_ids: Vec<String>,
    pub candidates: Vec<HourCandidate>,
}

/// Fortune period kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FortuneKind {
    Daeun,
    Seun,
    Wolun,
    Ilun,
}

/// One fortune period with its display attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaeunPeriod {
    pub kind: FortuneKind,
    pub order: u32,
    pub stem: u8,
    pub branch: u8,
    pub stem_name: String,
    pub branch_name: String,
    pub element: FiveElement,
    pub polarity: Polarity,
    pub ten_god: TenGod,
    pub twelve_fate: TwelveFate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub na_yin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_to: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Instant this period was derived from, RFC3339.
    pub at: String,
}

/// The single-chart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SajuDoc {
    pub schema_ver: String,
    pub input: BirthInput,
    pub pillars: Vec<Pillar>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub facts: Vec<FactItem>,
    pub evals: Vec<EvalItem>,
    /// Day-master stem index.
    pub day_master: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_daeun: Option<DaeunPeriod>,
    pub daeun_list: Vec<DaeunPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seun: Option<DaeunPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wolun: Option<DaeunPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ilun: Option<DaeunPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seun_list: Option<Vec<DaeunPeriod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wolun_list: Option<Vec<DaeunPeriod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ilun_list: Option<Vec<DaeunPeriod>>,
    pub el_distribution: ElDistribution,
    pub hour_ctx: HourContext,
    /// Void branches of the day pillar.
    pub void_branches: [u8; 2],
    /// RFC3339 creation timestamp (the injected "now").
    pub created_at: String,
}

impl SajuDoc {
    /// Day master as a typed stem.
    pub fn day_master_stem(&self) -> Result<Stem, SajuError> {
        Stem::from_index(self.day_master)
    }

    /// The pillar at a position, if present.
    pub fn pillar(&self, key: PillarKey) -> Option<&Pillar> {
        self.pillars.iter().find(|p| p.key == key)
    }

    /// Typed stem/branch of a pillar position.
    pub fn pillar_pair(&self, key: PillarKey) -> Option<(Stem, Branch)> {
        let p = self.pillar(key)?;
        let s = Stem::from_index(p.stem).ok()?;
        let b = Branch::from_index(p.branch).ok()?;
        Some((s, b))
    }

    /// The stem/branch node ids of a pillar position.
    pub fn pillar_node_ids(&self, key: PillarKey) -> Option<(u32, u32)> {
        let stem = self
            .nodes
            .iter()
            .find(|n| n.pillar == key && n.kind == NodeKind::Stem)?;
        let branch = self
            .nodes
            .iter()
            .find(|n| n.pillar == key && n.kind == NodeKind::Branch)?;
        Some((stem.id, branch.id))
    }
}
