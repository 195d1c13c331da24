//! Fortune-period generation.
//!
//! Daeun periods are the month pillar walked forward or backward through the
//! sexagenary cycle in ten-year steps; Seun/Wolun/Ilun are plain
//! re-derivations of the year/month/day pillar at a calendar point.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;

use saju_calendar::{TimePrecision, parse_local, raw_pillars_local};
use saju_core::{
    Branch, Polarity, RawPillars, SajuError, Stem, mod10, mod12, na_yin, ten_god, twelve_fate,
};

use crate::doc::{DaeunPeriod, FortuneKind};
use crate::input::{FortuneWindow, Sex};

/// Number of generated Daeun periods.
const DAEUN_COUNT: u32 = 8;

/// Longest accepted Seun range, in years.
const SEUN_SPAN_CAP: i32 = 30;

/// All fortune fields of one document.
pub(crate) struct FortuneSet {
    pub current_daeun: Option<DaeunPeriod>,
    pub daeun_list: Vec<DaeunPeriod>,
    pub seun: Option<DaeunPeriod>,
    pub wolun: Option<DaeunPeriod>,
    pub ilun: Option<DaeunPeriod>,
    pub seun_list: Option<Vec<DaeunPeriod>>,
    pub wolun_list: Option<Vec<DaeunPeriod>>,
    pub ilun_list: Option<Vec<DaeunPeriod>>,
}

/// Daeun direction: yang year-stem men and yin year-stem women run forward.
/// Unknown sex falls back to the year-stem parity alone.
pub(crate) fn daeun_forward(year_stem: Stem, sex: Sex) -> bool {
    match sex {
        Sex::Male | Sex::Unknown => year_stem.polarity() == Polarity::Yang,
        Sex::Female => year_stem.polarity() == Polarity::Yin,
    }
}

/// One fortune period with its derived display attributes.
fn make_period(
    kind: FortuneKind,
    order: u32,
    stem_idx: u8,
    branch_idx: u8,
    day_master: Stem,
    at: &str,
) -> Result<DaeunPeriod, SajuError> {
    let stem = Stem::from_index(stem_idx)?;
    let branch = Branch::from_index(branch_idx)?;
    Ok(DaeunPeriod {
        kind,
        order,
        stem: stem_idx,
        branch: branch_idx,
        stem_name: stem.name().to_string(),
        branch_name: branch.name().to_string(),
        element: stem.element(),
        polarity: stem.polarity(),
        ten_god: ten_god(day_master, stem),
        twelve_fate: twelve_fate(day_master, branch),
        na_yin: na_yin(stem, branch).map(|s| s.to_string()),
        age_from: None,
        age_to: None,
        year: None,
        month: None,
        day: None,
        at: at.to_string(),
    })
}

fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).expect("noon")
}

/// Build every fortune field from the birth pillars and an optional window.
///
/// `now_local` is the injected "now" shifted to the chart's local offset; a
/// window `base` datetime overrides it for period selection.
pub(crate) fn build_fortune(
    birth_local: NaiveDateTime,
    raw: &RawPillars,
    sex: Sex,
    window: Option<&FortuneWindow>,
    now_local: NaiveDateTime,
) -> Result<FortuneSet, SajuError> {
    let (year_stem, _) = raw.year.resolve()?;
    let (day_master, _) = raw.day.resolve()?;

    let base = match window.and_then(|w| w.base.as_deref()) {
        Some(s) => parse_local(s)?.datetime,
        None => now_local,
    };
    let at = base.format("%Y-%m-%dT%H:%M:%S").to_string();

    // Eight ten-year periods shifted off the month pillar.
    let forward = daeun_forward(year_stem, sex);
    let birth_year = birth_local.date().year();
    let mut daeun_list = Vec::with_capacity(DAEUN_COUNT as usize);
    for order in 1..=DAEUN_COUNT {
        let shift = if forward {
            order as i64
        } else {
            -(order as i64)
        };
        let stem = mod10(raw.month.stem as i64 + shift);
        let branch = mod12(raw.month.branch as i64 + shift);
        let age_from = 1 + (order - 1) * 10;
        let mut p = make_period(FortuneKind::Daeun, order, stem, branch, day_master, &at)?;
        p.age_from = Some(age_from);
        p.age_to = Some(age_from + 9);
        p.year = Some(birth_year + age_from as i32);
        daeun_list.push(p);
    }

    // Current period by East-Asian age, clamped to the last period.
    let age = (base.date().year() - birth_year + 1).max(1);
    let index = (((age - 1) / 10) as usize).min(daeun_list.len() - 1);
    let current_daeun = Some(daeun_list[index].clone());
    debug!("daeun: forward={forward} age={age} current=#{}", index + 1);

    // Point Seun/Wolun/Ilun at the base instant.
    let point = raw_pillars_local(base, TimePrecision::Unknown)?;
    let mut seun = make_period(
        FortuneKind::Seun,
        0,
        point.year.stem,
        point.year.branch,
        day_master,
        &at,
    )?;
    seun.year = Some(base.date().year());
    let mut wolun = make_period(
        FortuneKind::Wolun,
        0,
        point.month.stem,
        point.month.branch,
        day_master,
        &at,
    )?;
    wolun.year = Some(base.date().year());
    wolun.month = Some(base.date().month());
    let mut ilun = make_period(
        FortuneKind::Ilun,
        0,
        point.day.stem,
        point.day.branch,
        day_master,
        &at,
    )?;
    ilun.year = Some(base.date().year());
    ilun.month = Some(base.date().month());
    ilun.day = Some(base.date().day());

    let mut seun_list = None;
    let mut wolun_list = None;
    let mut ilun_list = None;
    if let Some(w) = window {
        if let (Some(from), Some(to)) = (w.seun_from, w.seun_to) {
            seun_list = Some(seun_range(from, to, day_master, &at)?);
        }
        if let Some(y) = w.wolun_year {
            wolun_list = Some(wolun_range(y, day_master, &at)?);
        }
        if let (Some(y), Some(m)) = (w.ilun_year, w.ilun_month) {
            ilun_list = Some(ilun_range(y, m, day_master, &at)?);
        }
    }

    Ok(FortuneSet {
        current_daeun,
        daeun_list,
        seun: Some(seun),
        wolun: Some(wolun),
        ilun: Some(ilun),
        seun_list,
        wolun_list,
        ilun_list,
    })
}

/// Yearly pillars over an inclusive span; inverted bounds swap, spans longer
/// than the cap are truncated.
fn seun_range(
    from: i32,
    to: i32,
    day_master: Stem,
    at: &str,
) -> Result<Vec<DaeunPeriod>, SajuError> {
    if from <= 0 || to <= 0 {
        return Err(SajuError::InvalidRangeParameter("year"));
    }
    let (from, mut to) = if from <= to { (from, to) } else { (to, from) };
    if to - from + 1 > SEUN_SPAN_CAP {
        to = from + SEUN_SPAN_CAP - 1;
    }
    let mut out = Vec::with_capacity((to - from + 1) as usize);
    for (i, y) in (from..=to).enumerate() {
        // July 1st sits safely after lichun inside the solar year.
        let date =
            NaiveDate::from_ymd_opt(y, 7, 1).ok_or(SajuError::InvalidRangeParameter("year"))?;
        let point = raw_pillars_local(noon(date), TimePrecision::Unknown)?;
        let mut p = make_period(
            FortuneKind::Seun,
            (i + 1) as u32,
            point.year.stem,
            point.year.branch,
            day_master,
            at,
        )?;
        p.year = Some(y);
        out.push(p);
    }
    Ok(out)
}

/// Monthly pillars over the 12 months of one year.
fn wolun_range(year: i32, day_master: Stem, at: &str) -> Result<Vec<DaeunPeriod>, SajuError> {
    if year <= 0 {
        return Err(SajuError::InvalidRangeParameter("year"));
    }
    let mut out = Vec::with_capacity(12);
    for m in 1..=12u32 {
        // Mid-month is past every solar-term boundary day.
        let date =
            NaiveDate::from_ymd_opt(year, m, 15).ok_or(SajuError::InvalidRangeParameter("year"))?;
        let point = raw_pillars_local(noon(date), TimePrecision::Unknown)?;
        let mut p = make_period(
            FortuneKind::Wolun,
            m,
            point.month.stem,
            point.month.branch,
            day_master,
            at,
        )?;
        p.year = Some(year);
        p.month = Some(m);
        out.push(p);
    }
    Ok(out)
}

/// Daily pillars over every day of one month.
fn ilun_range(
    year: i32,
    month: u32,
    day_master: Stem,
    at: &str,
) -> Result<Vec<DaeunPeriod>, SajuError> {
    if year <= 0 {
        return Err(SajuError::InvalidRangeParameter("year"));
    }
    if !(1..=12).contains(&month) {
        return Err(SajuError::InvalidRangeParameter("month"));
    }
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(SajuError::InvalidRangeParameter("year"))?;
    let mut out = Vec::with_capacity(31);
    let mut date = first;
    while date.month() == month {
        let point = raw_pillars_local(noon(date), TimePrecision::Unknown)?;
        let mut p = make_period(
            FortuneKind::Ilun,
            date.day(),
            point.day.stem,
            point.day.branch,
            day_master,
            at,
        )?;
        p.year = Some(year);
        p.month = Some(month);
        p.day = Some(date.day());
        out.push(p);
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    Ok(out)
}
