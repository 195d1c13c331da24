//! Ten-god (sipseong) classification relative to the day master.
//!
//! Determined by the element offset from the day master in the generative
//! cycle and by whether the polarities agree.

use serde::{Deserialize, Serialize};

use crate::stem::Stem;

/// The 10 gods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenGod {
    /// Bigyeon: same element, same polarity.
    Companion,
    /// Geopjae: same element, opposite polarity.
    RobWealth,
    /// Siksin: day master generates, same polarity.
    EatingGod,
    /// Sanggwan: day master generates, opposite polarity.
    HurtingOfficer,
    /// Pyeonjae: day master controls, same polarity.
    IndirectWealth,
    /// Jeongjae: day master controls, opposite polarity.
    DirectWealth,
    /// Pyeongwan: controls the day master, same polarity.
    IndirectOfficer,
    /// Jeonggwan: controls the day master, opposite polarity.
    DirectOfficer,
    /// Pyeonin: generates the day master, same polarity.
    IndirectResource,
    /// Jeongin: generates the day master, opposite polarity.
    DirectResource,
}

impl TenGod {
    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "Bigyeon",
            Self::RobWealth => "Geopjae",
            Self::EatingGod => "Siksin",
            Self::HurtingOfficer => "Sanggwan",
            Self::IndirectWealth => "Pyeonjae",
            Self::DirectWealth => "Jeongjae",
            Self::IndirectOfficer => "Pyeongwan",
            Self::DirectOfficer => "Jeonggwan",
            Self::IndirectResource => "Pyeonin",
            Self::DirectResource => "Jeongin",
        }
    }
}

/// Classify a stem against the day master.
pub fn ten_god(day_master: Stem, target: Stem) -> TenGod {
    let offset = (target.element().index() as i32 - day_master.element().index() as i32)
        .rem_euclid(5);
    let same_polarity = day_master.polarity() == target.polarity();
    match (offset, same_polarity) {
        (0, true) => TenGod::Companion,
        (0, false) => TenGod::RobWealth,
        (1, true) => TenGod::EatingGod,
        (1, false) => TenGod::HurtingOfficer,
        (2, true) => TenGod::IndirectWealth,
        (2, false) => TenGod::DirectWealth,
        (3, true) => TenGod::IndirectOfficer,
        (3, false) => TenGod::DirectOfficer,
        (4, true) => TenGod::IndirectResource,
        // offset is always in 0..5
        _ => TenGod::DirectResource,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_master_is_own_companion() {
        for s in crate::stem::ALL_STEMS {
            assert_eq!(ten_god(s, s), TenGod::Companion);
        }
    }

    #[test]
    fn gap_classifications() {
        // Day master Gap (yang wood).
        assert_eq!(ten_god(Stem::Gap, Stem::Eul), TenGod::RobWealth);
        assert_eq!(ten_god(Stem::Gap, Stem::Byeong), TenGod::EatingGod);
        assert_eq!(ten_god(Stem::Gap, Stem::Jeong), TenGod::HurtingOfficer);
        assert_eq!(ten_god(Stem::Gap, Stem::Mu), TenGod::IndirectWealth);
        assert_eq!(ten_god(Stem::Gap, Stem::Gi), TenGod::DirectWealth);
        assert_eq!(ten_god(Stem::Gap, Stem::Gyeong), TenGod::IndirectOfficer);
        assert_eq!(ten_god(Stem::Gap, Stem::Sin), TenGod::DirectOfficer);
        assert_eq!(ten_god(Stem::Gap, Stem::Im), TenGod::IndirectResource);
        assert_eq!(ten_god(Stem::Gap, Stem::Gye), TenGod::DirectResource);
    }

    #[test]
    fn yin_day_master() {
        // Day master Eul (yin wood): yang water Im generates it with opposite
        // polarity → direct resource.
        assert_eq!(ten_god(Stem::Eul, Stem::Im), TenGod::DirectResource);
        assert_eq!(ten_god(Stem::Eul, Stem::Gye), TenGod::IndirectResource);
    }
}
