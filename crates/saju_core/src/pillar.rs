//! The `RawPillars` contract between the calendar layer and the chart engine.
//!
//! The chart engine is calendar-agnostic: it consumes already-resolved
//! stem/branch index pairs, whether they come from the timestamp calculator
//! or an external calendar service.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::cycle::validate;
use crate::error::SajuError;
use crate::stem::Stem;

/// The four chart positions, in fixed construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PillarKey {
    Year,
    Month,
    Day,
    Hour,
}

/// All positions in construction order.
pub const ALL_PILLAR_KEYS: [PillarKey; 4] = [
    PillarKey::Year,
    PillarKey::Month,
    PillarKey::Day,
    PillarKey::Hour,
];

impl PillarKey {
    /// Wire code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
        }
    }
}

/// One raw stem/branch index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    /// Stem index 0-9.
    pub stem: u8,
    /// Branch index 0-11.
    pub branch: u8,
}

impl RawPair {
    pub const fn new(stem: u8, branch: u8) -> Self {
        Self { stem, branch }
    }

    /// Validate indices and the parity rule.
    pub fn resolve(self) -> Result<(Stem, Branch), SajuError> {
        validate(self.stem, self.branch)
    }
}

/// Pre-resolved pillars; hour is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPillars {
    pub year: RawPair,
    pub month: RawPair,
    pub day: RawPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<RawPair>,
}

impl RawPillars {
    /// The pair at a position, if present.
    pub fn get(&self, key: PillarKey) -> Option<RawPair> {
        match key {
            PillarKey::Year => Some(self.year),
            PillarKey::Month => Some(self.month),
            PillarKey::Day => Some(self.day),
            PillarKey::Hour => self.hour,
        }
    }

    /// Number of pillars present (3 or 4).
    pub fn len(&self) -> usize {
        if self.hour.is_some() { 4 } else { 3 }
    }

    /// Always false: year/month/day are mandatory.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Validate every present pair.
    pub fn resolve_all(&self) -> Result<(), SajuError> {
        self.year.resolve()?;
        self.month.resolve()?;
        self.day.resolve()?;
        if let Some(h) = self.hour {
            h.resolve()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawPillars {
        RawPillars {
            year: RawPair::new(0, 0),
            month: RawPair::new(2, 2),
            day: RawPair::new(4, 4),
            hour: Some(RawPair::new(6, 6)),
        }
    }

    #[test]
    fn get_by_key() {
        let p = sample();
        assert_eq!(p.get(PillarKey::Year), Some(RawPair::new(0, 0)));
        assert_eq!(p.get(PillarKey::Hour), Some(RawPair::new(6, 6)));
    }

    #[test]
    fn len_counts_hour() {
        let mut p = sample();
        assert_eq!(p.len(), 4);
        p.hour = None;
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn wire_round_trip_omits_unset_hour() {
        let mut p = sample();
        p.hour = None;
        let json = serde_json::to_value(p).unwrap();
        assert!(json.get("hour").is_none());
        let back: RawPillars = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn pillar_key_wire_codes() {
        for key in ALL_PILLAR_KEYS {
            let json = serde_json::to_value(key).unwrap();
            assert_eq!(json, key.code());
        }
    }

    #[test]
    fn resolve_all_rejects_parity_violation() {
        let mut p = sample();
        p.month = RawPair::new(2, 3);
        assert!(matches!(
            p.resolve_all(),
            Err(SajuError::ParityMismatch { stem: 2, branch: 3 })
        ));
    }
}
