//! The 10 heavenly stems (cheongan).
//!
//! Stems cycle Gap..Gye. Element pairs follow the generative order, two
//! stems per element, yang first.

use serde::{Deserialize, Serialize};

use crate::element::{FiveElement, Polarity};
use crate::error::SajuError;

/// The 10 heavenly stems (index 0 = Gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in cycle order.
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// 0-based cycle index (Gap=0 .. Gye=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Gap => 0,
            Self::Eul => 1,
            Self::Byeong => 2,
            Self::Jeong => 3,
            Self::Mu => 4,
            Self::Gi => 5,
            Self::Gyeong => 6,
            Self::Sin => 7,
            Self::Im => 8,
            Self::Gye => 9,
        }
    }

    /// Create from a raw index; fails with `InvalidPillarIndex` when out of range.
    pub fn from_index(idx: u8) -> Result<Self, SajuError> {
        if (idx as usize) < ALL_STEMS.len() {
            Ok(ALL_STEMS[idx as usize])
        } else {
            Err(SajuError::InvalidPillarIndex {
                kind: "stem",
                value: idx as i64,
            })
        }
    }

    /// Create from an arbitrary integer, wrapping modulo 10.
    pub const fn from_cycle(idx: i64) -> Self {
        ALL_STEMS[idx.rem_euclid(10) as usize]
    }

    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gap => "Gap",
            Self::Eul => "Eul",
            Self::Byeong => "Byeong",
            Self::Jeong => "Jeong",
            Self::Mu => "Mu",
            Self::Gi => "Gi",
            Self::Gyeong => "Gyeong",
            Self::Sin => "Sin",
            Self::Im => "Im",
            Self::Gye => "Gye",
        }
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Gap => "甲",
            Self::Eul => "乙",
            Self::Byeong => "丙",
            Self::Jeong => "丁",
            Self::Mu => "戊",
            Self::Gi => "己",
            Self::Gyeong => "庚",
            Self::Sin => "辛",
            Self::Im => "壬",
            Self::Gye => "癸",
        }
    }

    /// Five element: two stems per element in generative order.
    pub const fn element(self) -> FiveElement {
        FiveElement::from_cycle((self.index() / 2) as i32)
    }

    /// Yang for even indices, yin for odd.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }
}
