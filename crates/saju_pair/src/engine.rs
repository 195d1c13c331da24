//! Two-chart compatibility engine.
//!
//! Cross-references two documents pillar-position-by-position with the same
//! relation tables the single-chart builder uses, then aggregates the
//! harmony/conflict/complement/role/pressure/timing metrics and projects a
//! capped set of hour-candidate combinations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::info;

use saju_core::{
    ALL_PILLAR_KEYS, PillarKey, RelationKind, SajuError, TenGod, branch_relations, clamp0_100,
    collect_refs, stem_combination, ten_god,
};

use saju_chart::{
    EdgeKind, ElDistribution, HOUR_WINDOWS, HourCandidate, HourStatus, SajuDoc, Score, ScorePart,
    balance_score, dominant_relation,
};

use crate::doc::{
    PAIR_SCHEMA_VER, PairDoc, PairEdge, PairEvalItem, PairEvidence, PairFactItem,
    PairHourCandidate, PairHourContext, PairMetrics,
};

/// Raw relation-weight sums are stretched onto the 0-100 index range.
const INDEX_SCALE: f64 = 12.0;

/// Upper bound on projected hour combinations.
const PROJECTION_CAP: usize = 16;

/// Candidates taken per side before forming the cross product.
const SIDE_CAP: usize = 4;

/// Fixed role score of one directional day-master classification.
const fn role_score(role: TenGod) -> f64 {
    match role {
        TenGod::DirectOfficer | TenGod::DirectResource | TenGod::DirectWealth => 88.0,
        TenGod::IndirectOfficer | TenGod::IndirectResource | TenGod::IndirectWealth => 76.0,
        TenGod::EatingGod => 72.0,
        TenGod::HurtingOfficer => 48.0,
        TenGod::Companion => 58.0,
        TenGod::RobWealth => 52.0,
    }
}

/// Pair confidence from the two hour states.
fn pair_confidence(a: HourStatus, b: HourStatus) -> f64 {
    if a == HourStatus::Missing || b == HourStatus::Missing {
        0.72
    } else if a == HourStatus::Estimated || b == HourStatus::Estimated {
        0.80
    } else {
        0.90
    }
}

/// Build the compatibility document for two charts.
pub fn build_pair(a: &SajuDoc, b: &SajuDoc, now: DateTime<Utc>) -> Result<PairDoc, SajuError> {
    for doc in [a, b] {
        if doc.pillars.len() < 3 {
            return Err(SajuError::InsufficientPillars {
                got: doc.pillars.len(),
            });
        }
    }
    let a_dm = a.day_master_stem()?;
    let b_dm = b.day_master_stem()?;

    // Cross-chart edges, position by position, stem combination first.
    let mut edges = Vec::new();
    let mut next_id = 1u32;
    for key in ALL_PILLAR_KEYS {
        let (Some((a_stem, a_branch)), Some((b_stem, b_branch))) =
            (a.pillar_pair(key), b.pillar_pair(key))
        else {
            continue;
        };
        let (Some((a_sn, a_bn)), Some((b_sn, b_bn))) =
            (a.pillar_node_ids(key), b.pillar_node_ids(key))
        else {
            continue;
        };

        if let Some(el) = stem_combination(a_stem, b_stem) {
            edges.push(PairEdge {
                id: next_id,
                kind: EdgeKind::StemCombination,
                position: key,
                a_node: a_sn,
                b_node: b_sn,
                weight: RelationKind::StemCombination.weight(),
                result_element: Some(el),
                active: true,
            });
            next_id += 1;
        }
        for (kind, el) in branch_relations(a_branch, b_branch) {
            edges.push(PairEdge {
                id: next_id,
                kind: kind.into(),
                position: key,
                a_node: a_bn,
                b_node: b_bn,
                weight: kind.weight(),
                result_element: el,
                active: true,
            });
            next_id += 1;
        }
    }

    // Index metrics off the raw weight sums.
    let mut harmony_raw = 0.0;
    let mut conflict_raw = 0.0;
    for e in &edges {
        if let Some(rel) = e.kind.relation() {
            if rel.is_harmonious() {
                harmony_raw += e.weight;
            } else {
                conflict_raw += e.weight;
            }
        }
    }
    let harmony_index = clamp0_100(harmony_raw * INDEX_SCALE);
    let conflict_index = clamp0_100(conflict_raw * INDEX_SCALE);
    let net_index = (harmony_index - conflict_index).clamp(-100.0, 100.0);

    // Averaged distribution measured against uniform.
    let da = &a.el_distribution;
    let db = &b.el_distribution;
    let avg = ElDistribution {
        wood: (da.wood + db.wood) / 2.0,
        fire: (da.fire + db.fire) / 2.0,
        earth: (da.earth + db.earth) / 2.0,
        metal: (da.metal + db.metal) / 2.0,
        water: (da.water + db.water) / 2.0,
    };
    let element_complement = balance_score(&avg);

    // Each side's day-master and resource elements against the other side.
    let a_el = a_dm.element();
    let b_el = b_dm.element();
    let support_a = db.get(a_el) + db.get(a_el.resource());
    let support_b = da.get(b_el) + da.get(b_el.resource());
    let useful_god_support = clamp0_100((support_a + support_b) / 2.0 * 100.0);

    let role_ab = ten_god(a_dm, b_dm);
    let role_ba = ten_god(b_dm, a_dm);
    let role_fit = (role_score(role_ab) + role_score(role_ba)) / 2.0;

    let pressure_risk = clamp0_100(conflict_index * 0.85);
    let confidence = pair_confidence(a.hour_ctx.status, b.hour_ctx.status);
    let sensitivity = clamp0_100((1.0 - confidence) * 100.0 + net_index.abs() * 0.2);

    // Only month-position edges move the timing baseline.
    let mut timing = 50.0;
    for e in &edges {
        if e.position != PillarKey::Month {
            continue;
        }
        if let Some(rel) = e.kind.relation() {
            timing += if rel.is_harmonious() { 10.0 } else { -10.0 };
        }
    }
    let timing_alignment = clamp0_100(timing);

    let net_norm = clamp0_100((net_index + 100.0) / 2.0);
    let overall_total = clamp0_100(
        0.45 * net_norm + 0.20 * element_complement + 0.15 * useful_god_support + 0.20 * role_fit
            - 0.20 * pressure_risk,
    );

    let facts = build_pair_facts(a, b, &edges, role_ab, role_ba);
    let evals = build_pair_evals(
        &edges,
        harmony_index,
        timing_alignment,
        overall_total,
        net_norm,
        element_complement,
        useful_god_support,
        role_fit,
        pressure_risk,
        confidence,
    );

    let hour_ctx = project_hours(a, b, overall_total, confidence);

    info!(
        "pair built: {} edges, net {net_index:.1}, overall {overall_total:.1}",
        edges.len()
    );

    Ok(PairDoc {
        schema_ver: PAIR_SCHEMA_VER.to_string(),
        a_day_master: a_dm.index(),
        b_day_master: b_dm.index(),
        edges,
        facts,
        evals,
        metrics: PairMetrics {
            harmony_index,
            conflict_index,
            net_index,
            element_complement,
            useful_god_support,
            role_fit,
            pressure_risk,
            confidence,
            sensitivity,
            timing_alignment,
        },
        hour_ctx,
        created_at: now.to_rfc3339(),
    })
}

fn build_pair_facts(
    a: &SajuDoc,
    b: &SajuDoc,
    edges: &[PairEdge],
    role_ab: TenGod,
    role_ba: TenGod,
) -> Vec<PairFactItem> {
    let mut facts = Vec::with_capacity(2);

    let mut hist: BTreeMap<&'static str, u32> = BTreeMap::new();
    for e in edges {
        if let Some(rel) = e.kind.relation() {
            *hist.entry(rel.code()).or_insert(0) += 1;
        }
    }
    let params: BTreeMap<String, String> = hist
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut evidence = PairEvidence::new(
        "rule.pair.relation_histogram",
        collect_refs(edges.iter().map(|e| e.a_node)),
        collect_refs(edges.iter().map(|e| e.b_node)),
    );
    evidence.params = Some(params);
    facts.push(PairFactItem {
        id: "pairfact.relation_histogram".to_string(),
        kind: "RELATION".to_string(),
        name: "Cross-chart relation histogram".to_string(),
        value: Some(dominant_relation(&hist)),
        evidence,
        score: None,
    });

    let a_day = a.pillar_node_ids(PillarKey::Day).map(|(s, _)| s);
    let b_day = b.pillar_node_ids(PillarKey::Day).map(|(s, _)| s);
    facts.push(PairFactItem {
        id: "pairfact.day_master_roles".to_string(),
        kind: "ROLE".to_string(),
        name: "Day-master roles".to_string(),
        value: Some(format!("{}/{}", role_ab.name(), role_ba.name())),
        evidence: PairEvidence::new(
            "rule.pair.day_master_roles",
            a_day.into_iter().collect(),
            b_day.into_iter().collect(),
        ),
        score: None,
    });

    facts
}

#[allow(clippy::too_many_arguments)]
fn build_pair_evals(
    edges: &[PairEdge],
    harmony_index: f64,
    timing_alignment: f64,
    overall_total: f64,
    net_norm: f64,
    element_complement: f64,
    useful_god_support: f64,
    role_fit: f64,
    pressure_risk: f64,
    confidence: f64,
) -> Vec<PairEvalItem> {
    let relational_ids: Vec<u32> = edges
        .iter()
        .filter(|e| e.kind.relation().is_some())
        .map(|e| e.id)
        .collect();
    let conflict_ids: Vec<u32> = edges
        .iter()
        .filter(|e| e.kind.relation().is_some_and(|r| !r.is_harmonious()))
        .map(|e| e.id)
        .collect();
    let a_refs = collect_refs(edges.iter().map(|e| e.a_node));
    let b_refs = collect_refs(edges.iter().map(|e| e.b_node));

    vec![
        PairEvalItem {
            id: "paireval.harmony".to_string(),
            kind: "SCORE".to_string(),
            name: "Harmony".to_string(),
            value: None,
            evidence: PairEvidence::new("rule.pair.harmony", a_refs.clone(), b_refs.clone()),
            score: Score::new(harmony_index, 0.0, 100.0, confidence),
        },
        PairEvalItem {
            id: "paireval.timing".to_string(),
            kind: "SCORE".to_string(),
            name: "Timing alignment".to_string(),
            value: None,
            evidence: PairEvidence::new("rule.pair.timing", a_refs.clone(), b_refs.clone()),
            score: Score::new(timing_alignment, 0.0, 100.0, confidence),
        },
        PairEvalItem {
            id: "paireval.overall".to_string(),
            kind: "SCORE".to_string(),
            name: "Overall compatibility".to_string(),
            value: None,
            evidence: PairEvidence::new("rule.pair.overall", a_refs, b_refs),
            score: Score::new(overall_total, 0.0, 100.0, confidence).with_parts(vec![
                ScorePart {
                    label: "net_norm".to_string(),
                    weight: 0.45,
                    value: net_norm,
                    refs: relational_ids,
                },
                ScorePart {
                    label: "element_complement".to_string(),
                    weight: 0.20,
                    value: element_complement,
                    refs: Vec::new(),
                },
                ScorePart {
                    label: "useful_support".to_string(),
                    weight: 0.15,
                    value: useful_god_support,
                    refs: Vec::new(),
                },
                ScorePart {
                    label: "role_fit".to_string(),
                    weight: 0.20,
                    value: role_fit,
                    refs: Vec::new(),
                },
                ScorePart {
                    label: "pressure_risk".to_string(),
                    weight: -0.20,
                    value: pressure_risk,
                    refs: conflict_ids,
                },
            ]),
        },
    ]
}

/// Up to four hour picks for one side: the known pillar counts as a single
/// certain pick.
fn side_choices(doc: &SajuDoc) -> Vec<HourCandidate> {
    match doc.hour_ctx.status {
        HourStatus::Known => doc
            .pillar_pair(PillarKey::Hour)
            .map(|(s, b)| {
                vec![HourCandidate {
                    stem: s.index(),
                    branch: b.index(),
                    weight: 1.0,
                    window: HOUR_WINDOWS[b.index() as usize].to_string(),
                }]
            })
            .unwrap_or_default(),
        _ => doc
            .hour_ctx
            .candidates
            .iter()
            .take(SIDE_CAP)
            .cloned()
            .collect(),
    }
}

fn project_hours(a: &SajuDoc, b: &SajuDoc, overall: f64, confidence: f64) -> PairHourContext {
    let a_status = a.hour_ctx.status;
    let b_status = b.hour_ctx.status;
    let mut candidates = Vec::new();

    if a_status != HourStatus::Known || b_status != HourStatus::Known {
        let a_choices = side_choices(a);
        let b_choices = side_choices(b);
        'outer: for ca in &a_choices {
            for cb in &b_choices {
                if candidates.len() == PROJECTION_CAP {
                    break 'outer;
                }
                let weight = ca.weight * cb.weight;
                candidates.push(PairHourCandidate {
                    a: ca.clone(),
                    b: cb.clone(),
                    weight,
                    score: overall * (0.8 + 0.2 * weight),
                    confidence: confidence * weight.max(0.6),
                });
            }
        }
    }

    PairHourContext {
        a_status,
        b_status,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_core::Stem;

    #[test]
    fn role_scores_match_table() {
        assert_eq!(role_score(TenGod::DirectOfficer), 88.0);
        assert_eq!(role_score(TenGod::IndirectWealth), 76.0);
        assert_eq!(role_score(TenGod::EatingGod), 72.0);
        assert_eq!(role_score(TenGod::HurtingOfficer), 48.0);
        assert_eq!(role_score(TenGod::Companion), 58.0);
        assert_eq!(role_score(TenGod::RobWealth), 52.0);
    }

    #[test]
    fn confidence_tiers() {
        use HourStatus::*;
        assert_eq!(pair_confidence(Known, Known), 0.90);
        assert_eq!(pair_confidence(Known, Estimated), 0.80);
        assert_eq!(pair_confidence(Estimated, Missing), 0.72);
        assert_eq!(pair_confidence(Missing, Known), 0.72);
    }

    #[test]
    fn role_fit_is_symmetric() {
        // Gap vs Sin: direct officer both ways up to polarity.
        let ab = role_score(ten_god(Stem::Gap, Stem::Sin));
        let ba = role_score(ten_god(Stem::Sin, Stem::Gap));
        let fit = (ab + ba) / 2.0;
        assert!(fit > 0.0 && fit <= 100.0);
    }
}
