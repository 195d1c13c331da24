//! Multi-layout local datetime parsing.
//!
//! An explicit ordered list of accepted layouts is tried in sequence; the
//! first successful parse wins and fixes the time precision. Hour-only and
//! date-only inputs degrade the precision rather than failing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use saju_core::SajuError;

/// How much of the birth time is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimePrecision {
    /// Full clock time.
    Minute,
    /// Hour of day only.
    Hour,
    /// No time at all.
    Unknown,
}

/// A parsed local datetime with the precision its layout implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedLocal {
    pub datetime: NaiveDateTime,
    pub precision: TimePrecision,
}

/// Full-time layouts, tried first.
const MINUTE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a local datetime string against the accepted layouts.
pub fn parse_local(input: &str) -> Result<ParsedLocal, SajuError> {
    let s = input.trim();

    for layout in MINUTE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(ParsedLocal {
                datetime: dt,
                precision: TimePrecision::Minute,
            });
        }
    }

    // "%Y-%m-%d %H": date plus a bare hour.
    if let Some((date_part, hour_part)) = s.split_once(' ') {
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d");
        let hour = hour_part.parse::<u32>();
        if let (Ok(date), Ok(hour)) = (date, hour) {
            if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
                return Ok(ParsedLocal {
                    datetime: date.and_time(time),
                    precision: TimePrecision::Hour,
                });
            }
        }
    }

    // "%Y-%m-%d": date only, unknown birth time.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(ParsedLocal {
            datetime: date.and_time(NaiveTime::MIN),
            precision: TimePrecision::Unknown,
        });
    }

    Err(SajuError::UnsupportedDatetimeFormat {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn iso_t_layout() {
        let p = parse_local("1992-07-15T08:30:00").unwrap();
        assert_eq!(p.precision, TimePrecision::Minute);
        assert_eq!(p.datetime.hour(), 8);
        assert_eq!(p.datetime.minute(), 30);
    }

    #[test]
    fn space_layout_without_seconds() {
        let p = parse_local("1992-07-15 08:30").unwrap();
        assert_eq!(p.precision, TimePrecision::Minute);
    }

    #[test]
    fn hour_only_is_estimated() {
        let p = parse_local("1992-07-15 13").unwrap();
        assert_eq!(p.precision, TimePrecision::Hour);
        assert_eq!(p.datetime.hour(), 13);
        assert_eq!(p.datetime.minute(), 0);
    }

    #[test]
    fn date_only_is_unknown() {
        let p = parse_local("1992-07-15").unwrap();
        assert_eq!(p.precision, TimePrecision::Unknown);
        assert_eq!(p.datetime.hour(), 0);
    }

    #[test]
    fn garbage_rejected() {
        assert!(matches!(
            parse_local("15/07/1992"),
            Err(SajuError::UnsupportedDatetimeFormat { .. })
        ));
    }

    #[test]
    fn hour_out_of_range_rejected() {
        assert!(parse_local("1992-07-15 25").is_err());
    }
}
