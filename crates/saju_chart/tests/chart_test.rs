use chrono::{DateTime, Utc};

use saju_calendar::TimePrecision;
use saju_chart::{BirthInput, EdgeKind, FortuneWindow, HourStatus, Sex, build_chart};
use saju_core::PillarKey;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-29T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn golden_pillars_1992_07_15() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    assert_eq!(doc.pillars.len(), 4);
    let get = |k| doc.pillar_pair(k).map(|(s, b)| (s.index(), b.index()));
    assert_eq!(get(PillarKey::Year), Some((8, 8))); // Im-Sin
    assert_eq!(get(PillarKey::Month), Some((3, 7))); // Jeong-Mi
    assert_eq!(get(PillarKey::Day), Some((8, 4))); // Im-Jin
    assert_eq!(get(PillarKey::Hour), Some((0, 4))); // Gap-Jin
    assert_eq!(doc.day_master, 8);
    // Im-Jin day: cycle index 28, xun 2 → void O/Mi.
    assert_eq!(doc.void_branches, [6, 7]);
}

#[test]
fn known_hour_has_no_candidates() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Female, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    assert_eq!(doc.hour_ctx.status, HourStatus::Known);
    assert!(doc.hour_ctx.candidates.is_empty());
    for e in &doc.evals {
        assert_eq!(e.score.confidence, 0.86);
    }
}

#[test]
fn missing_hour_yields_twelve_candidates() {
    let input = BirthInput::solar("1992-07-15", Sex::Male, TimePrecision::Unknown);
    let doc = build_chart(&input, now()).unwrap();
    assert_eq!(doc.hour_ctx.status, HourStatus::Missing);
    assert_eq!(doc.hour_ctx.candidates.len(), 12);
    assert_eq!(doc.pillars.len(), 3);
    for e in &doc.evals {
        assert_eq!(e.score.confidence, 0.68);
    }
    // No hour pillar, so everything is stable.
    assert_eq!(doc.hour_ctx.stable_node_ids.len(), doc.nodes.len());
    assert_eq!(doc.hour_ctx.stable_edge_ids.len(), doc.edges.len());
    assert_eq!(doc.hour_ctx.stable_fact_ids.len(), doc.facts.len());
    assert_eq!(doc.hour_ctx.stable_eval_ids.len(), doc.evals.len());
}

#[test]
fn estimated_hour_yields_one_candidate() {
    let input = BirthInput::solar("1992-07-15 13", Sex::Male, TimePrecision::Hour);
    let doc = build_chart(&input, now()).unwrap();
    assert_eq!(doc.hour_ctx.status, HourStatus::Estimated);
    assert_eq!(doc.hour_ctx.candidates.len(), 1);
    let c = &doc.hour_ctx.candidates[0];
    assert_eq!(c.window, "13:00-14:59");
    assert_eq!(c.weight, 1.0);
    // Im day, Mi hour → Jeong-Mi, matching the built hour pillar.
    assert_eq!((c.stem, c.branch), (3, 7));
    let (hs, hb) = doc.pillar_pair(PillarKey::Hour).unwrap();
    assert_eq!((hs.index(), hb.index()), (c.stem, c.branch));
}

#[test]
fn estimated_stable_sets_exclude_hour_dependents() {
    let input = BirthInput::solar("1992-07-15 13", Sex::Male, TimePrecision::Hour);
    let doc = build_chart(&input, now()).unwrap();
    let ctx = &doc.hour_ctx;
    // Hour nodes exist, so stable node set is a strict subset.
    assert!(ctx.stable_node_ids.len() < doc.nodes.len());
    assert!(ctx.stable_fact_ids.contains(&"fact.day_master".to_string()));
    assert!(ctx.stable_fact_ids.contains(&"fact.hour_status".to_string()));
    // Evals reference every node, hour nodes included.
    assert!(ctx.stable_eval_ids.is_empty());
}

#[test]
fn ids_contiguous_from_one() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    for (i, n) in doc.nodes.iter().enumerate() {
        assert_eq!(n.id as usize, i + 1);
    }
    for (i, e) in doc.edges.iter().enumerate() {
        assert_eq!(e.id as usize, i + 1);
        assert!(e.weight > 0.0 && e.weight <= 1.0);
        assert!(e.active);
    }
}

#[test]
fn created_at_round_trips_the_injected_now() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    let parsed = DateTime::parse_from_rfc3339(&doc.created_at).unwrap();
    assert_eq!(parsed.with_timezone(&Utc), now());
}

#[test]
fn fixed_fact_and_eval_sets() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    let fact_ids: Vec<&str> = doc.facts.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(
        fact_ids,
        [
            "fact.day_master",
            "fact.dominant_element",
            "fact.weakest_element",
            "fact.month_command",
            "fact.relation_histogram",
            "fact.hour_status",
        ]
    );
    let eval_ids: Vec<&str> = doc.evals.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(eval_ids, ["eval.balance", "eval.support", "eval.overall"]);
    for e in &doc.evals {
        assert!(e.score.norm0_100 >= 0.0 && e.score.norm0_100 <= 100.0);
    }
}

#[test]
fn fortune_periods_present() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    assert_eq!(doc.daeun_list.len(), 8);
    assert!(doc.current_daeun.is_some());
    assert!(doc.seun.is_some());
    assert!(doc.wolun.is_some());
    assert!(doc.ilun.is_some());
    assert!(doc.seun_list.is_none());
}

#[test]
fn fortune_window_replaces_only_fortune_fields() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    let window = FortuneWindow {
        base: Some("2024-06-15 12:00".to_string()),
        seun_from: Some(2024),
        seun_to: Some(2026),
        ..Default::default()
    };
    let redone = doc.with_fortune_window(&window, now()).unwrap();
    assert_eq!(redone.nodes, doc.nodes);
    assert_eq!(redone.edges, doc.edges);
    assert_eq!(redone.created_at, doc.created_at);
    assert_eq!(redone.seun.as_ref().unwrap().year, Some(2024));
    assert_eq!(redone.seun_list.as_ref().unwrap().len(), 3);
}

#[test]
fn structural_edges_use_fixed_kinds() {
    let input = BirthInput::solar("1992-07-15 08:30", Sex::Male, TimePrecision::Minute);
    let doc = build_chart(&input, now()).unwrap();
    let links = doc
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::PillarLink)
        .count();
    assert_eq!(links, 4);
}
