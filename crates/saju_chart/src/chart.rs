//! Single-chart document assembly.
//!
//! One pure construction call per document: parse the birth datetime, derive
//! raw pillars, build the graph, score, resolve the hour context and the
//! fortune periods, then freeze everything into a `SajuDoc`. The injected
//! "now" feeds only the creation timestamp and period selection.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use log::info;

use saju_calendar::{
    MAX_TZ_OFFSET_MIN, TimePrecision, hour_branch, parse_local, raw_pillars_local,
};
use saju_core::{PillarKey, RawPair, RawPillars, SajuError};

use crate::doc::{HourStatus, SCHEMA_VER, SajuDoc};
use crate::facts::build_facts;
use crate::fortune::build_fortune;
use crate::graph::build_graph;
use crate::hour::{build_hour_ctx, hour_status};
use crate::input::{BirthInput, FortuneWindow};
use crate::score::distribution;

/// The weaker of two precisions wins: a declared-unknown birth time stays
/// unknown even when the datetime string carries a clock time.
fn weaker(a: TimePrecision, b: TimePrecision) -> TimePrecision {
    const fn rank(p: TimePrecision) -> u8 {
        match p {
            TimePrecision::Minute => 0,
            TimePrecision::Hour => 1,
            TimePrecision::Unknown => 2,
        }
    }
    if rank(a) >= rank(b) { a } else { b }
}

/// Build a full chart document from a birth input.
pub fn build_chart(input: &BirthInput, now: DateTime<Utc>) -> Result<SajuDoc, SajuError> {
    if input.tz_offset_min.abs() > MAX_TZ_OFFSET_MIN {
        return Err(SajuError::InvalidTimezoneOffset {
            minutes: input.tz_offset_min,
        });
    }
    let parsed = parse_local(input.effective_datetime())?;
    let precision = weaker(input.precision, parsed.precision);
    let raw = raw_pillars_local(parsed.datetime, precision)?;
    assemble(input, &raw, parsed.datetime, precision, now)
}

/// Build a chart from pre-resolved pillars (external calendar service).
///
/// The hour status follows the presence of the hour pair; the input datetime
/// is still parsed for the birth year the fortune engine needs.
pub fn build_chart_from_raw(
    input: &BirthInput,
    raw: &RawPillars,
    now: DateTime<Utc>,
) -> Result<SajuDoc, SajuError> {
    let parsed = parse_local(input.effective_datetime())?;
    let precision = if raw.hour.is_some() {
        TimePrecision::Minute
    } else {
        TimePrecision::Unknown
    };
    assemble(input, raw, parsed.datetime, precision, now)
}

fn assemble(
    input: &BirthInput,
    raw: &RawPillars,
    birth_local: NaiveDateTime,
    precision: TimePrecision,
    now: DateTime<Utc>,
) -> Result<SajuDoc, SajuError> {
    let graph = build_graph(raw)?;
    let dist = distribution(&graph.nodes);
    let status = hour_status(precision);
    let (facts, evals) = build_facts(&graph, &dist, status);

    let estimated_branch =
        (status == HourStatus::Estimated).then(|| hour_branch(birth_local.hour()));
    let hour_ctx = build_hour_ctx(
        status,
        graph.day_master.index(),
        estimated_branch,
        &graph.nodes,
        &graph.edges,
        &facts,
        &evals,
    );

    let now_local = now.naive_utc() + Duration::minutes(input.tz_offset_min as i64);
    let fortune = build_fortune(birth_local, raw, input.sex, input.fortune.as_ref(), now_local)?;

    info!(
        "chart built: {} nodes, {} edges, day master {}, hour {:?}",
        graph.nodes.len(),
        graph.edges.len(),
        graph.day_master.name(),
        status
    );

    Ok(SajuDoc {
        schema_ver: SCHEMA_VER.to_string(),
        input: input.clone(),
        pillars: graph.pillars,
        nodes: graph.nodes,
        edges: graph.edges,
        facts,
        evals,
        day_master: graph.day_master.index(),
        current_daeun: fortune.current_daeun,
        daeun_list: fortune.daeun_list,
        seun: fortune.seun,
        wolun: fortune.wolun,
        ilun: fortune.ilun,
        seun_list: fortune.seun_list,
        wolun_list: fortune.wolun_list,
        ilun_list: fortune.ilun_list,
        el_distribution: dist,
        hour_ctx,
        void_branches: graph.void,
        created_at: now.to_rfc3339(),
    })
}

impl SajuDoc {
    /// Recompute only the fortune-period fields for a new window.
    ///
    /// Everything else (graph, scores, hour context) is carried over
    /// unchanged from this document.
    pub fn with_fortune_window(
        &self,
        window: &FortuneWindow,
        now: DateTime<Utc>,
    ) -> Result<SajuDoc, SajuError> {
        let raw = self.raw_pillars()?;
        let parsed = parse_local(self.input.effective_datetime())?;
        let now_local = now.naive_utc() + Duration::minutes(self.input.tz_offset_min as i64);
        let fortune = build_fortune(
            parsed.datetime,
            &raw,
            self.input.sex,
            Some(window),
            now_local,
        )?;

        let mut doc = self.clone();
        doc.current_daeun = fortune.current_daeun;
        doc.daeun_list = fortune.daeun_list;
        doc.seun = fortune.seun;
        doc.wolun = fortune.wolun;
        doc.ilun = fortune.ilun;
        doc.seun_list = fortune.seun_list;
        doc.wolun_list = fortune.wolun_list;
        doc.ilun_list = fortune.ilun_list;
        Ok(doc)
    }

    /// The document's pillars as the raw index contract.
    pub fn raw_pillars(&self) -> Result<RawPillars, SajuError> {
        let pair = |key| {
            self.pillar(key)
                .map(|p| RawPair::new(p.stem, p.branch))
        };
        let (Some(year), Some(month), Some(day)) = (
            pair(PillarKey::Year),
            pair(PillarKey::Month),
            pair(PillarKey::Day),
        ) else {
            return Err(SajuError::InsufficientPillars {
                got: self.pillars.len(),
            });
        };
        Ok(RawPillars {
            year,
            month,
            day,
            hour: pair(PillarKey::Hour),
        })
    }
}
