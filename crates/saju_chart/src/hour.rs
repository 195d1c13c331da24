//! Hour-uncertainty resolution.
//!
//! KNOWN charts carry no candidates. ESTIMATED charts carry the single
//! candidate their bare hour implies; MISSING charts carry all twelve
//! two-hour buckets at equal weight. Stable id lists name everything in the
//! document the hour cannot move.

use saju_calendar::{TimePrecision, hour_stem};
use saju_core::PillarKey;

use crate::doc::{
    Edge, EvalItem, FactItem, HourCandidate, HourContext, HourStatus, Node,
};

/// Display windows per hour branch (Ja opens at 23:00).
pub const HOUR_WINDOWS: [&str; 12] = [
    "23:00-00:59",
    "01:00-02:59",
    "03:00-04:59",
    "05:00-06:59",
    "07:00-08:59",
    "09:00-10:59",
    "11:00-12:59",
    "13:00-14:59",
    "15:00-16:59",
    "17:00-18:59",
    "19:00-20:59",
    "21:00-22:59",
];

/// Map input precision to the hour status.
pub(crate) fn hour_status(precision: TimePrecision) -> HourStatus {
    match precision {
        TimePrecision::Minute => HourStatus::Known,
        TimePrecision::Hour => HourStatus::Estimated,
        TimePrecision::Unknown => HourStatus::Missing,
    }
}

/// Build the hour context over an assembled document's parts.
///
/// `estimated_branch` is the branch implied by a bare hour-of-day input and
/// is required exactly when the status is ESTIMATED.
pub(crate) fn build_hour_ctx(
    status: HourStatus,
    day_stem: u8,
    estimated_branch: Option<u8>,
    nodes: &[Node],
    edges: &[Edge],
    facts: &[FactItem],
    evals: &[EvalItem],
) -> HourContext {
    if status == HourStatus::Known {
        return HourContext {
            status,
            stable_node_ids: Vec::new(),
            stable_edge_ids: Vec::new(),
            stable_fact_ids: Vec::new(),
            stable_eval_ids: Vec::new(),
            candidates: Vec::new(),
        };
    }

    let hour_nodes: Vec<u32> = nodes
        .iter()
        .filter(|n| n.pillar == PillarKey::Hour)
        .map(|n| n.id)
        .collect();
    let stable_node_ids: Vec<u32> = nodes
        .iter()
        .filter(|n| n.pillar != PillarKey::Hour)
        .map(|n| n.id)
        .collect();
    let stable_edge_ids: Vec<u32> = edges
        .iter()
        .filter(|e| !hour_nodes.contains(&e.from) && !hour_nodes.contains(&e.to))
        .map(|e| e.id)
        .collect();
    let stable_fact_ids: Vec<String> = facts
        .iter()
        .filter(|f| f.evidence.node_refs.iter().all(|r| !hour_nodes.contains(r)))
        .map(|f| f.id.clone())
        .collect();
    let stable_eval_ids: Vec<String> = evals
        .iter()
        .filter(|e| e.evidence.node_refs.iter().all(|r| !hour_nodes.contains(r)))
        .map(|e| e.id.clone())
        .collect();

    let candidates = match status {
        HourStatus::Known => Vec::new(),
        HourStatus::Estimated => {
            let branch = estimated_branch.unwrap_or_default();
            vec![HourCandidate {
                stem: hour_stem(day_stem, branch),
                branch,
                weight: 1.0,
                window: HOUR_WINDOWS[branch as usize].to_string(),
            }]
        }
        HourStatus::Missing => (0u8..12)
            .map(|branch| HourCandidate {
                stem: hour_stem(day_stem, branch),
                branch,
                weight: 1.0 / 12.0,
                window: HOUR_WINDOWS[branch as usize].to_string(),
            })
            .collect(),
    };

    HourContext {
        status,
        stable_node_ids,
        stable_edge_ids,
        stable_fact_ids,
        stable_eval_ids,
        candidates,
    }
}
