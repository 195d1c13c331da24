//! Fact/eval assembly.
//!
//! Packages derived conclusions with evidence (rule id/version, referenced
//! nodes) and normalized scores. Histogram tie-breaking iterates sorted keys
//! so the result never depends on hash-map order.

use std::collections::BTreeMap;

use saju_core::{ALL_ELEMENTS, FiveElement, PillarKey, collect_refs};

use crate::doc::{
    EvalItem, Evidence, FactItem, HourStatus, Node, Score, ScorePart,
};
use crate::graph::ChartGraph;
use crate::score::{balance_score, conflict_penalty, overall_score, support_score};

impl HourStatus {
    /// Wire code, also used as a fact value.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Known => "KNOWN",
            Self::Estimated => "ESTIMATED",
            Self::Missing => "MISSING",
        }
    }
}

/// Confidence baseline per hour knowledge.
pub(crate) fn confidence_baseline(status: HourStatus) -> f64 {
    match status {
        HourStatus::Known => 0.86,
        HourStatus::Estimated | HourStatus::Missing => 0.68,
    }
}

/// Dominant relation key of a histogram: "NONE" when empty, alphabetically
/// smallest key on a count tie.
pub fn dominant_relation(hist: &BTreeMap<&'static str, u32>) -> String {
    let mut best: Option<(&str, u32)> = None;
    for (&key, &count) in hist {
        // Strictly greater: ascending key order makes ties resolve to the
        // alphabetically smallest key.
        if best.map(|(_, c)| count > c).unwrap_or(true) {
            best = Some((key, count));
        }
    }
    best.map(|(k, _)| k.to_string())
        .unwrap_or_else(|| "NONE".to_string())
}

/// Per-element strength sums.
fn element_sums(nodes: &[Node]) -> [f64; 5] {
    let mut sums = [0.0f64; 5];
    for n in nodes {
        sums[n.element.index() as usize] += n.strength;
    }
    sums
}

fn extreme_element(sums: &[f64; 5], want_max: bool) -> FiveElement {
    let mut best = ALL_ELEMENTS[0];
    for el in ALL_ELEMENTS {
        let v = sums[el.index() as usize];
        let b = sums[best.index() as usize];
        if (want_max && v > b) || (!want_max && v < b) {
            best = el;
        }
    }
    best
}

/// Build the fixed fact and eval sets for one chart.
pub(crate) fn build_facts(
    graph: &ChartGraph,
    dist: &crate::doc::ElDistribution,
    status: HourStatus,
) -> (Vec<FactItem>, Vec<EvalItem>) {
    let confidence = confidence_baseline(status);
    let sums = element_sums(&graph.nodes);
    let mut facts = Vec::with_capacity(6);

    // Day master identity.
    let day_stem_node = graph
        .built
        .iter()
        .find(|p| p.key == PillarKey::Day)
        .map(|p| p.stem_node)
        .unwrap_or_default();
    facts.push(FactItem {
        id: "fact.day_master".to_string(),
        kind: "DAY_MASTER".to_string(),
        name: "Day master".to_string(),
        value: Some(graph.day_master.name().to_string()),
        node_refs: vec![day_stem_node],
        evidence: Evidence::new("rule.day_master", vec![day_stem_node]),
        score: None,
    });

    // Dominant / weakest element by summed strength.
    for (id, name, want_max) in [
        ("fact.dominant_element", "Dominant element", true),
        ("fact.weakest_element", "Weakest element", false),
    ] {
        let el = extreme_element(&sums, want_max);
        let refs = collect_refs(
            graph
                .nodes
                .iter()
                .filter(|n| n.element == el)
                .map(|n| n.id),
        );
        facts.push(FactItem {
            id: id.to_string(),
            kind: "ELEMENT".to_string(),
            name: name.to_string(),
            value: Some(el.name().to_string()),
            node_refs: refs.clone(),
            evidence: Evidence::new(format!("rule.{}", &id[5..]), refs),
            score: None,
        });
    }

    // Month command: the month branch's element.
    if let Some(month) = graph.built.iter().find(|p| p.key == PillarKey::Month) {
        facts.push(FactItem {
            id: "fact.month_command".to_string(),
            kind: "MONTH_COMMAND".to_string(),
            name: "Month command".to_string(),
            value: Some(month.branch.element().name().to_string()),
            node_refs: vec![month.branch_node],
            evidence: Evidence::new("rule.month_command", vec![month.branch_node]),
            score: None,
        });
    }

    // Relation-type frequency histogram.
    let mut hist: BTreeMap<&'static str, u32> = BTreeMap::new();
    let mut rel_nodes = Vec::new();
    for e in &graph.edges {
        if let Some(rel) = e.kind.relation() {
            *hist.entry(rel.code()).or_insert(0) += 1;
            rel_nodes.push(e.from);
            rel_nodes.push(e.to);
        }
    }
    let params: BTreeMap<String, String> = hist
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let refs = collect_refs(rel_nodes);
    let mut evidence = Evidence::new("rule.relation_histogram", refs.clone());
    evidence.params = Some(params);
    facts.push(FactItem {
        id: "fact.relation_histogram".to_string(),
        kind: "RELATION".to_string(),
        name: "Relation histogram".to_string(),
        value: Some(dominant_relation(&hist)),
        node_refs: refs,
        evidence,
        score: None,
    });

    // Hour knowledge.
    facts.push(FactItem {
        id: "fact.hour_status".to_string(),
        kind: "HOUR".to_string(),
        name: "Hour status".to_string(),
        value: Some(status.code().to_string()),
        node_refs: Vec::new(),
        evidence: Evidence::new("rule.hour_status", Vec::new()),
        score: None,
    });

    // Evals.
    let all_refs = collect_refs(graph.nodes.iter().map(|n| n.id));
    let balance = balance_score(dist);
    let support = support_score(dist, graph.day_master.element());
    let penalty = conflict_penalty(&graph.edges);
    let overall = overall_score(balance, support, penalty);

    let evals = vec![
        EvalItem {
            id: "eval.balance".to_string(),
            kind: "SCORE".to_string(),
            name: "Element balance".to_string(),
            value: None,
            node_refs: all_refs.clone(),
            evidence: Evidence::new("rule.balance", all_refs.clone()),
            score: Score::new(balance, 0.0, 100.0, confidence),
        },
        EvalItem {
            id: "eval.support".to_string(),
            kind: "SCORE".to_string(),
            name: "Day-master support".to_string(),
            value: None,
            node_refs: all_refs.clone(),
            evidence: Evidence::new("rule.support", all_refs.clone()),
            score: Score::new(support, 0.0, 100.0, confidence),
        },
        EvalItem {
            id: "eval.overall".to_string(),
            kind: "SCORE".to_string(),
            name: "Overall".to_string(),
            value: None,
            node_refs: all_refs.clone(),
            evidence: Evidence::new("rule.overall", all_refs.clone()),
            score: Score::new(overall, 0.0, 100.0, confidence).with_parts(vec![
                ScorePart {
                    label: "balance".to_string(),
                    weight: 0.58,
                    value: balance,
                    refs: Vec::new(),
                },
                ScorePart {
                    label: "support".to_string(),
                    weight: 0.42,
                    value: support,
                    refs: Vec::new(),
                },
                ScorePart {
                    label: "conflict_penalty".to_string(),
                    weight: -1.0,
                    value: penalty,
                    refs: Vec::new(),
                },
            ]),
        },
    ];

    (facts, evals)
}
