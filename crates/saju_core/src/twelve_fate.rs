//! Twelve-stage-of-fate (sibiunseong) classification of a branch.
//!
//! Each day stem anchors the cycle at a "birth" branch; yang stems walk the
//! 12 branches forward, yin stems backward.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Polarity;
use crate::stem::Stem;

/// The 12 stages in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TwelveFate {
    /// Jangsaeng.
    Birth,
    /// Mogyok.
    Bath,
    /// Gwandae.
    CapAndBelt,
    /// Geonnok.
    Establishment,
    /// Jewang.
    Peak,
    /// Soe.
    Decline,
    /// Byeong.
    Illness,
    /// Sa.
    Death,
    /// Myo.
    Grave,
    /// Jeol.
    Severance,
    /// Tae.
    Conception,
    /// Yang.
    Nurture,
}

/// All 12 stages in cycle order.
pub const ALL_FATES: [TwelveFate; 12] = [
    TwelveFate::Birth,
    TwelveFate::Bath,
    TwelveFate::CapAndBelt,
    TwelveFate::Establishment,
    TwelveFate::Peak,
    TwelveFate::Decline,
    TwelveFate::Illness,
    TwelveFate::Death,
    TwelveFate::Grave,
    TwelveFate::Severance,
    TwelveFate::Conception,
    TwelveFate::Nurture,
];

impl TwelveFate {
    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Birth => "Jangsaeng",
            Self::Bath => "Mogyok",
            Self::CapAndBelt => "Gwandae",
            Self::Establishment => "Geonnok",
            Self::Peak => "Jewang",
            Self::Decline => "Soe",
            Self::Illness => "Byeong",
            Self::Death => "Sa",
            Self::Grave => "Myo",
            Self::Severance => "Jeol",
            Self::Conception => "Tae",
            Self::Nurture => "Yang",
        }
    }
}

/// Birth-stage branch per day stem (standard table).
const fn start_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Gap => Branch::Hae,
        Stem::Byeong | Stem::Mu => Branch::In,
        Stem::Gyeong => Branch::Sa,
        Stem::Im => Branch::Sin,
        Stem::Eul => Branch::O,
        Stem::Jeong | Stem::Gi => Branch::Yu,
        Stem::Sin => Branch::Ja,
        Stem::Gye => Branch::Myo,
    }
}

/// Stage of `branch` relative to the day stem.
pub fn twelve_fate(day_stem: Stem, branch: Branch) -> TwelveFate {
    let start = start_branch(day_stem).index() as i32;
    let b = branch.index() as i32;
    let step = match day_stem.polarity() {
        Polarity::Yang => (b - start).rem_euclid(12),
        Polarity::Yin => (start - b).rem_euclid(12),
    };
    ALL_FATES[step as usize]
}
