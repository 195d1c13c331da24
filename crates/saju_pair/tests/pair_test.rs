use chrono::{DateTime, Utc};

use saju_calendar::TimePrecision;
use saju_chart::{BirthInput, EdgeKind, HourStatus, SajuDoc, Sex, build_chart};
use saju_core::{PillarKey, SajuError};
use saju_pair::build_pair;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-29T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn chart(datetime: &str, precision: TimePrecision) -> SajuDoc {
    let input = BirthInput::solar(datetime, Sex::Male, precision);
    build_chart(&input, now()).unwrap()
}

#[test]
fn month_six_combination_lifts_timing() {
    // O month (June) against Mi month (July): a six-combination.
    let a = chart("2024-06-15 12:30", TimePrecision::Minute);
    let b = chart("1992-07-15 08:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert_eq!(pair.metrics.timing_alignment, 60.0);
}

#[test]
fn month_clash_lowers_timing() {
    // Ja month (December) against O month (June): a clash.
    let a = chart("2023-12-15 12:30", TimePrecision::Minute);
    let b = chart("2024-06-15 12:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert_eq!(pair.metrics.timing_alignment, 40.0);
    assert!(pair.metrics.conflict_index > 0.0);
}

#[test]
fn non_month_clash_leaves_timing_at_baseline() {
    // Year branches Jin/Sul clash; months O/Yu carry no relation.
    let a = chart("2024-06-15 12:30", TimePrecision::Minute);
    let b = chart("1994-09-20 12:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert!(
        pair.edges
            .iter()
            .any(|e| e.kind == EdgeKind::Clash && e.position == PillarKey::Year)
    );
    assert!(!pair.edges.iter().any(|e| e.position == PillarKey::Month));
    assert_eq!(pair.metrics.timing_alignment, 50.0);
}

#[test]
fn identical_charts_have_no_self_combination_or_clash() {
    let a = chart("1992-07-15 08:30", TimePrecision::Minute);
    let b = chart("1992-07-15 08:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert!(
        !pair
            .edges
            .iter()
            .any(|e| e.kind == EdgeKind::StemCombination)
    );
    assert!(!pair.edges.iter().any(|e| e.kind == EdgeKind::Clash));
}

#[test]
fn edge_ids_contiguous_and_weights_bounded() {
    let a = chart("2023-12-15 12:30", TimePrecision::Minute);
    let b = chart("2024-06-15 12:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    for (i, e) in pair.edges.iter().enumerate() {
        assert_eq!(e.id as usize, i + 1);
        assert!(e.weight > 0.0 && e.weight <= 1.0);
        assert!(e.active);
    }
}

#[test]
fn overall_breakdown_has_exactly_five_parts() {
    let a = chart("2024-06-15 12:30", TimePrecision::Minute);
    let b = chart("1992-07-15 08:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    let overall = pair
        .evals
        .iter()
        .find(|e| e.id == "paireval.overall")
        .unwrap();
    let parts = overall.score.parts.as_ref().unwrap();
    let labelled: Vec<(&str, f64)> = parts.iter().map(|p| (p.label.as_str(), p.weight)).collect();
    assert_eq!(
        labelled,
        [
            ("net_norm", 0.45),
            ("element_complement", 0.20),
            ("useful_support", 0.15),
            ("role_fit", 0.20),
            ("pressure_risk", -0.20),
        ]
    );
}

#[test]
fn both_hours_known_means_no_candidates() {
    let a = chart("2024-06-15 12:30", TimePrecision::Minute);
    let b = chart("1992-07-15 08:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert_eq!(pair.hour_ctx.a_status, HourStatus::Known);
    assert_eq!(pair.hour_ctx.b_status, HourStatus::Known);
    assert!(pair.hour_ctx.candidates.is_empty());
    assert_eq!(pair.metrics.confidence, 0.90);
}

#[test]
fn missing_side_projects_against_known_hour() {
    let a = chart("1992-07-15", TimePrecision::Unknown);
    let b = chart("2024-06-15 12:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert_eq!(pair.metrics.confidence, 0.72);
    // 4 capped candidates on the missing side against the single known hour.
    assert_eq!(pair.hour_ctx.candidates.len(), 4);
    for c in &pair.hour_ctx.candidates {
        assert!((c.weight - 1.0 / 12.0).abs() < 1e-12);
        assert!((c.confidence - 0.72 * 0.6).abs() < 1e-12);
        assert!(c.score <= 100.0);
    }
    assert_eq!(pair.hour_ctx.candidates[0].b.weight, 1.0);
}

#[test]
fn two_missing_sides_cap_the_cross_product() {
    let a = chart("1992-07-15", TimePrecision::Unknown);
    let b = chart("1994-09-20", TimePrecision::Unknown);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert_eq!(pair.hour_ctx.candidates.len(), 16);
}

#[test]
fn estimated_side_uses_mid_confidence() {
    let a = chart("1992-07-15 13", TimePrecision::Hour);
    let b = chart("2024-06-15 12:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    assert_eq!(pair.metrics.confidence, 0.80);
    assert_eq!(pair.hour_ctx.candidates.len(), 1);
    assert_eq!(pair.hour_ctx.candidates[0].weight, 1.0);
}

#[test]
fn rejects_truncated_documents() {
    let a = chart("1992-07-15 08:30", TimePrecision::Minute);
    let mut b = chart("2024-06-15 12:30", TimePrecision::Minute);
    b.pillars.truncate(2);
    assert!(matches!(
        build_pair(&a, &b, now()),
        Err(SajuError::InsufficientPillars { got: 2 })
    ));
}

#[test]
fn pair_facts_present() {
    let a = chart("2024-06-15 12:30", TimePrecision::Minute);
    let b = chart("1992-07-15 08:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    let ids: Vec<&str> = pair.facts.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(
        ids,
        ["pairfact.relation_histogram", "pairfact.day_master_roles"]
    );
    let roles = &pair.facts[1];
    assert!(roles.value.as_ref().unwrap().contains('/'));
}

#[test]
fn metric_ranges_hold() {
    let a = chart("2023-12-15 12:30", TimePrecision::Minute);
    let b = chart("2024-06-15 12:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    let m = &pair.metrics;
    for v in [
        m.harmony_index,
        m.conflict_index,
        m.element_complement,
        m.useful_god_support,
        m.role_fit,
        m.pressure_risk,
        m.sensitivity,
        m.timing_alignment,
    ] {
        assert!((0.0..=100.0).contains(&v), "metric out of range: {v}");
    }
    assert!((-100.0..=100.0).contains(&m.net_index));
    assert!((m.pressure_risk - m.conflict_index * 0.85).abs() < 1e-9);
}

#[test]
fn wire_field_names() {
    let a = chart("2024-06-15 12:30", TimePrecision::Minute);
    let b = chart("1992-07-15 08:30", TimePrecision::Minute);
    let pair = build_pair(&a, &b, now()).unwrap();
    let json = serde_json::to_value(&pair).unwrap();
    for field in [
        "schemaVer",
        "aDayMaster",
        "bDayMaster",
        "edges",
        "facts",
        "evals",
        "metrics",
        "hourCtx",
        "createdAt",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["schemaVer"], "saju.pair.v1");
    assert!(json["metrics"].get("netIndex").is_some());
    assert!(json["metrics"].get("usefulGodSupport").is_some());
    assert!(json["hourCtx"].get("aStatus").is_some());
    assert!(json["evals"][0]["score"].get("norm0_100").is_some());
    let round: saju_pair::PairDoc = serde_json::from_value(json).unwrap();
    assert_eq!(round.schema_ver, "saju.pair.v1");
}
