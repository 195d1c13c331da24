//! Timestamp → four pillars.
//!
//! Given an absolute instant and a timezone offset, computes the raw
//! stem/branch indices the chart engine consumes:
//! - Year from the lichun (start-of-spring) boundary of the local year
//! - Month from the last solar-term boundary ≤ the instant, built over a
//!   3-year window
//! - Day from a whole-day count since the 1900-01-01 anchor (a Gap-Sul day)
//! - Hour from the two-hour branch buckets and the day-stem formula

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use log::trace;

use saju_core::{Branch, RawPair, RawPillars, SajuError, mod10, mod12};

use crate::datetime::TimePrecision;
use crate::solar_terms::{MONTH_TERMS, lichun_day, term_day};

/// Default timezone offset: UTC+9 (KST), in minutes.
pub const DEFAULT_TZ_OFFSET_MIN: i32 = 540;

/// Largest accepted timezone offset magnitude (UTC±18h), in minutes.
pub const MAX_TZ_OFFSET_MIN: i32 = 1080;

/// Day-count anchor: 1900-01-01 local, sexagenary day index 10 (Gap-Sul).
const ANCHOR_DAY_CYCLE_OFFSET: i64 = 10;

fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("fixed anchor date")
}

/// Compute raw pillars for an absolute instant.
///
/// The hour pillar is produced only when `precision` is not `Unknown`.
pub fn raw_pillars_at(
    utc: DateTime<Utc>,
    tz_offset_min: i32,
    precision: TimePrecision,
) -> Result<RawPillars, SajuError> {
    if tz_offset_min.abs() > MAX_TZ_OFFSET_MIN {
        return Err(SajuError::InvalidTimezoneOffset {
            minutes: tz_offset_min,
        });
    }
    let local = utc.naive_utc() + Duration::minutes(tz_offset_min as i64);
    raw_pillars_local(local, precision)
}

/// Compute raw pillars for an already-localized naive datetime.
pub fn raw_pillars_local(
    local: NaiveDateTime,
    precision: TimePrecision,
) -> Result<RawPillars, SajuError> {
    let year = year_pair(local);
    let month = month_pair(local)?;
    let day = day_pair(local.date());
    let hour = match precision {
        TimePrecision::Unknown => None,
        _ => Some(hour_pair(day.stem, local.hour())),
    };

    let pillars = RawPillars {
        year,
        month,
        day,
        hour,
    };
    // Correct tables always satisfy range and parity.
    pillars.resolve_all()?;
    trace!(
        "pillars at {local}: y={}/{} m={}/{} d={}/{}",
        year.stem, year.branch, month.stem, month.branch, day.stem, day.branch
    );
    Ok(pillars)
}

/// Year pillar: the solar year begins at local lichun.
fn year_pair(local: NaiveDateTime) -> RawPair {
    let year = local.date().year();
    let lichun = NaiveDate::from_ymd_opt(year, 2, lichun_day(year))
        .expect("lichun day is always a valid February date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight");
    let cycle_year = if local < lichun { year - 1 } else { year };
    RawPair {
        stem: mod10(cycle_year as i64 - 4),
        branch: mod12(cycle_year as i64 - 4),
    }
}

/// Month-stem seed by year stem (Gap/Gi → Byeong, Eul/Gyeong → Mu, ...).
const MONTH_STEM_SEED: [u8; 10] = [2, 4, 6, 8, 0, 2, 4, 6, 8, 0];

/// Month pillar from the last solar-term boundary at or before the instant.
fn month_pair(local: NaiveDateTime) -> Result<RawPair, SajuError> {
    let year = local.date().year();

    // Boundaries over [year-1, year+1], ascending by construction.
    let mut boundaries: Vec<(NaiveDateTime, Branch)> = Vec::with_capacity(36);
    for y in (year - 1)..=(year + 1) {
        for t in MONTH_TERMS {
            let day = term_day(y, t.month);
            if let Some(date) = NaiveDate::from_ymd_opt(y, t.month, day) {
                boundaries.push((date.and_hms_opt(0, 0, 0).expect("midnight"), t.branch));
            }
        }
    }
    boundaries.sort_by_key(|(dt, _)| *dt);

    let (_, month_branch) = boundaries
        .iter()
        .rev()
        .find(|(dt, _)| *dt <= local)
        .copied()
        // Unreachable: the window always opens more than a year before `local`.
        .ok_or(SajuError::InvalidPillarIndex {
            kind: "branch",
            value: -1,
        })?;

    let year_stem = year_pair(local).stem;
    let month_order = mod12(month_branch.index() as i64 - 2) as i64 + 1;
    let stem = mod10(MONTH_STEM_SEED[year_stem as usize] as i64 + month_order - 1);
    Ok(RawPair {
        stem,
        branch: month_branch.index(),
    })
}

/// Day pillar: whole days from the anchor plus the anchor's own cycle offset.
fn day_pair(date: NaiveDate) -> RawPair {
    let diff = (date - anchor_date()).num_days() + ANCHOR_DAY_CYCLE_OFFSET;
    RawPair {
        stem: mod10(diff),
        branch: mod12(diff),
    }
}

/// Hour pillar: two-hour buckets starting at 23:00, stem from the day stem.
fn hour_pair(day_stem: u8, hour: u32) -> RawPair {
    let branch = mod12((hour as i64 + 1) / 2);
    RawPair {
        stem: mod10(day_stem as i64 * 2 + branch as i64),
        branch,
    }
}

/// Branch of a clock hour, shared with the hour-uncertainty resolver.
pub fn hour_branch(hour: u32) -> u8 {
    mod12((hour as i64 + 1) / 2)
}

/// Stem of an hour branch under a given day stem.
pub fn hour_stem(day_stem: u8, hour_branch: u8) -> u8 {
    mod10(day_stem as i64 * 2 + hour_branch as i64)
}
