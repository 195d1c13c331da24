//! Birth-input record.
//!
//! The normalized field set an upstream caller supplies; the engine reads
//! only the resolved solar datetime, offset, precision and sex. Calendar
//! conversion (lunar→solar, leap months) happens before this record is built.

use serde::{Deserialize, Serialize};

use saju_calendar::{DEFAULT_TZ_OFFSET_MIN, TimePrecision};

/// Biological sex, as used by the daeun direction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

/// Which calendar system the raw input datetime was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarTag {
    Solar,
    Lunar,
}

/// Geographic point, kept for downstream display; unused by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Engine identification carried through to the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMeta {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,
}

/// Optional fortune-window parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneWindow {
    /// Local datetime the window is evaluated at; defaults to "now".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seun_from: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seun_to: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wolun_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ilun_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ilun_month: Option<u32>,
}

fn default_tz_offset() -> i32 {
    DEFAULT_TZ_OFFSET_MIN
}

/// Normalized birth input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    /// Local birth datetime string (one of the accepted layouts).
    pub local_datetime: String,
    /// IANA timezone id, display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Offset minutes actually used for calculation (default +540).
    #[serde(default = "default_tz_offset")]
    pub tz_offset_min: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
    pub calendar: CalendarTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leap_month: Option<bool>,
    pub sex: Sex,
    pub precision: TimePrecision,
    pub engine: EngineMeta,
    /// Lunar inputs converted to solar upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_datetime: Option<String>,
    /// Datetime after any manual correction (e.g. longitude adjustment).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fortune: Option<FortuneWindow>,
}

impl BirthInput {
    /// Minimal record for a solar datetime at the default offset.
    pub fn solar(local_datetime: impl Into<String>, sex: Sex, precision: TimePrecision) -> Self {
        Self {
            local_datetime: local_datetime.into(),
            timezone: None,
            tz_offset_min: DEFAULT_TZ_OFFSET_MIN,
            geo: None,
            calendar: CalendarTag::Solar,
            leap_month: None,
            sex,
            precision,
            engine: EngineMeta {
                name: "saju".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ruleset: None,
            },
            solar_datetime: None,
            adjusted_datetime: None,
            fortune: None,
        }
    }

    /// The datetime string the engine should calculate from: adjusted wins
    /// over solar-converted, which wins over the raw local string.
    pub fn effective_datetime(&self) -> &str {
        self.adjusted_datetime
            .as_deref()
            .or(self.solar_datetime.as_deref())
            .unwrap_or(&self.local_datetime)
    }
}
