//! The 12 earthly branches (jiji) and their hidden stems.

use serde::{Deserialize, Serialize};

use crate::element::{FiveElement, Polarity};
use crate::error::SajuError;
use crate::stem::Stem;

/// The 12 earthly branches (index 0 = Ja).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in cycle order.
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    /// 0-based cycle index (Ja=0 .. Hae=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ja => 0,
            Self::Chuk => 1,
            Self::In => 2,
            Self::Myo => 3,
            Self::Jin => 4,
            Self::Sa => 5,
            Self::O => 6,
            Self::Mi => 7,
            Self::Sin => 8,
            Self::Yu => 9,
            Self::Sul => 10,
            Self::Hae => 11,
        }
    }

    /// Create from a raw index; fails with `InvalidPillarIndex` when out of range.
    pub fn from_index(idx: u8) -> Result<Self, SajuError> {
        if (idx as usize) < ALL_BRANCHES.len() {
            Ok(ALL_BRANCHES[idx as usize])
        } else {
            Err(SajuError::InvalidPillarIndex {
                kind: "branch",
                value: idx as i64,
            })
        }
    }

    /// Create from an arbitrary integer, wrapping modulo 12.
    pub const fn from_cycle(idx: i64) -> Self {
        ALL_BRANCHES[idx.rem_euclid(12) as usize]
    }

    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ja => "Ja",
            Self::Chuk => "Chuk",
            Self::In => "In",
            Self::Myo => "Myo",
            Self::Jin => "Jin",
            Self::Sa => "Sa",
            Self::O => "O",
            Self::Mi => "Mi",
            Self::Sin => "Sin",
            Self::Yu => "Yu",
            Self::Sul => "Sul",
            Self::Hae => "Hae",
        }
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Ja => "子",
            Self::Chuk => "丑",
            Self::In => "寅",
            Self::Myo => "卯",
            Self::Jin => "辰",
            Self::Sa => "巳",
            Self::O => "午",
            Self::Mi => "未",
            Self::Sin => "申",
            Self::Yu => "酉",
            Self::Sul => "戌",
            Self::Hae => "亥",
        }
    }

    /// Five element of the branch proper (not its hidden stems).
    pub const fn element(self) -> FiveElement {
        match self {
            Self::Ja | Self::Hae => FiveElement::Water,
            Self::In | Self::Myo => FiveElement::Wood,
            Self::Sa | Self::O => FiveElement::Fire,
            Self::Sin | Self::Yu => FiveElement::Metal,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => FiveElement::Earth,
        }
    }

    /// Yang for even indices, yin for odd.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }
}

/// Hidden stems (jijanggan) per branch, ordered residual → middle → primary.
///
/// Standard table; 2 entries for the pure branches (Ja, Myo, Yu), 3 elsewhere.
pub const fn hidden_stems(branch: Branch) -> &'static [Stem] {
    match branch {
        Branch::Ja => &[Stem::Im, Stem::Gye],
        Branch::Chuk => &[Stem::Gye, Stem::Sin, Stem::Gi],
        Branch::In => &[Stem::Mu, Stem::Byeong, Stem::Gap],
        Branch::Myo => &[Stem::Gap, Stem::Eul],
        Branch::Jin => &[Stem::Eul, Stem::Gye, Stem::Mu],
        Branch::Sa => &[Stem::Mu, Stem::Gyeong, Stem::Byeong],
        Branch::O => &[Stem::Byeong, Stem::Gi, Stem::Jeong],
        Branch::Mi => &[Stem::Jeong, Stem::Eul, Stem::Gi],
        Branch::Sin => &[Stem::Mu, Stem::Im, Stem::Gyeong],
        Branch::Yu => &[Stem::Gyeong, Stem::Sin],
        Branch::Sul => &[Stem::Sin, Stem::Jeong, Stem::Mu],
        Branch::Hae => &[Stem::Mu, Stem::Gap, Stem::Im],
    }
}
