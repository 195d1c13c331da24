//! Solar-term day lookup.
//!
//! The calculator only needs the principal ("jie") term that opens each
//! sexagenary month, at day granularity. A static per-year table covers the
//! years we ship data for; other years fall back to the template defaults.

use saju_core::Branch;

/// One month-opening term: calendar month, default day-of-month, and the
/// branch of the sexagenary month it opens.
#[derive(Debug, Clone, Copy)]
pub struct TermTemplate {
    pub month: u32,
    pub default_day: u32,
    pub branch: Branch,
}

/// The 12 month-opening terms in calendar order (January first).
///
/// Sohan opens the Chuk month, Ipchun (lichun) the In month, and so on.
pub const MONTH_TERMS: [TermTemplate; 12] = [
    TermTemplate { month: 1, default_day: 6, branch: Branch::Chuk },
    TermTemplate { month: 2, default_day: 4, branch: Branch::In },
    TermTemplate { month: 3, default_day: 6, branch: Branch::Myo },
    TermTemplate { month: 4, default_day: 5, branch: Branch::Jin },
    TermTemplate { month: 5, default_day: 6, branch: Branch::Sa },
    TermTemplate { month: 6, default_day: 6, branch: Branch::O },
    TermTemplate { month: 7, default_day: 7, branch: Branch::Mi },
    TermTemplate { month: 8, default_day: 8, branch: Branch::Sin },
    TermTemplate { month: 9, default_day: 8, branch: Branch::Yu },
    TermTemplate { month: 10, default_day: 8, branch: Branch::Sul },
    TermTemplate { month: 11, default_day: 7, branch: Branch::Hae },
    TermTemplate { month: 12, default_day: 7, branch: Branch::Ja },
];

/// Per-year term days (KST, day of month, January first).
const TERM_DAYS: [(i32, [u32; 12]); 6] = [
    (2020, [6, 4, 5, 4, 5, 5, 6, 7, 7, 8, 7, 7]),
    (2021, [5, 3, 5, 4, 5, 5, 6, 7, 7, 8, 7, 7]),
    (2022, [5, 4, 5, 5, 5, 6, 7, 7, 7, 8, 7, 7]),
    (2023, [5, 4, 6, 5, 6, 6, 7, 8, 8, 8, 8, 7]),
    (2024, [6, 4, 5, 4, 5, 5, 6, 7, 7, 8, 7, 6]),
    (2025, [5, 3, 5, 4, 5, 5, 7, 7, 7, 8, 7, 7]),
];

/// Day-of-month of the term opening `month` in `year`; template default when
/// the year is outside the shipped table.
pub fn term_day(year: i32, month: u32) -> u32 {
    debug_assert!((1..=12).contains(&month));
    TERM_DAYS
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, days)| days[(month - 1) as usize])
        .unwrap_or(MONTH_TERMS[(month - 1) as usize].default_day)
}

/// Day-of-February of lichun (start of the solar year); default 4.
pub fn lichun_day(year: i32) -> u32 {
    term_day(year, 2)
}
