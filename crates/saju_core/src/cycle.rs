//! Sexagenary cycle arithmetic: parity rule, cycle index, na-yin, void branches.
//!
//! A pillar is valid only when its stem and branch agree on polarity
//! (`stem % 2 == branch % 2`); only 60 of the 120 raw pairs exist.

use crate::branch::Branch;
use crate::error::SajuError;
use crate::stem::Stem;

/// Validate raw stem/branch indices and the parity rule.
pub fn validate(stem: u8, branch: u8) -> Result<(Stem, Branch), SajuError> {
    let s = Stem::from_index(stem)?;
    let b = Branch::from_index(branch)?;
    if stem % 2 != branch % 2 {
        return Err(SajuError::ParityMismatch { stem, branch });
    }
    Ok((s, b))
}

/// 0-59 cycle position with `index % 10 == stem` and `index % 12 == branch`.
///
/// Returns `None` when the pair violates the parity rule (no such position).
pub fn sexagenary_index(stem: Stem, branch: Branch) -> Option<u8> {
    let s = stem.index();
    let b = branch.index();
    if s % 2 != b % 2 {
        return None;
    }
    // CRT over the 10/12 cycles: walk the six candidates sharing the stem.
    (0..6).map(|k| s + 10 * k).find(|&idx| idx % 12 == b)
}

/// The 30 na-yin labels, indexed by `cycle_index / 2`.
const NA_YIN_LABELS: [&str; 30] = [
    "Haejunggeum",
    "Nojunghwa",
    "Daerimmok",
    "Nobangto",
    "Geombonggeum",
    "Sanduhwa",
    "Ganhasu",
    "Seongduto",
    "Baengnapgeum",
    "Yangnyumok",
    "Cheonjungsu",
    "Oksangto",
    "Byeongnyeokhwa",
    "Songbaengmok",
    "Jangnyusu",
    "Sajunggeum",
    "Sanhahwa",
    "Pyeongjimok",
    "Byeoksangto",
    "Geumbakgeum",
    "Bokdeunghwa",
    "Cheonhasu",
    "Daeyeokto",
    "Chacheongeum",
    "Sangjamok",
    "Daegyesu",
    "Sajungto",
    "Cheonsanghwa",
    "Seongnyumok",
    "Daehaesu",
];

/// Na-yin label of a stem/branch pair (two adjacent cycle positions share one).
pub fn na_yin(stem: Stem, branch: Branch) -> Option<&'static str> {
    sexagenary_index(stem, branch).map(|idx| NA_YIN_LABELS[(idx / 2) as usize])
}

/// Void (gongmang) branch pair for a stem/branch pair.
///
/// Each 10-day decade (xun) of the 60-cycle leaves two branches uncovered:
/// `start = (10 - 2*xun) mod 12`, returning `[start, start+1]`.
pub fn void_branches(stem: Stem, branch: Branch) -> Option<[Branch; 2]> {
    let idx = sexagenary_index(stem, branch)?;
    let xun = (idx / 10) as i64;
    let start = (10 - 2 * xun).rem_euclid(12);
    Some([Branch::from_cycle(start), Branch::from_cycle(start + 1)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::ALL_BRANCHES;
    use crate::stem::ALL_STEMS;

    #[test]
    fn validate_accepts_gap_ja() {
        let (s, b) = validate(0, 0).unwrap();
        assert_eq!(s, Stem::Gap);
        assert_eq!(b, Branch::Ja);
    }

    #[test]
    fn validate_rejects_parity() {
        assert!(matches!(
            validate(0, 1),
            Err(SajuError::ParityMismatch { stem: 0, branch: 1 })
        ));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(validate(10, 0).is_err());
        assert!(validate(0, 12).is_err());
    }

    #[test]
    fn cycle_index_round_trips() {
        for s in ALL_STEMS {
            for b in ALL_BRANCHES {
                match sexagenary_index(s, b) {
                    Some(idx) => {
                        assert_eq!(idx % 10, s.index());
                        assert_eq!(idx % 12, b.index());
                    }
                    None => assert_ne!(s.index() % 2, b.index() % 2),
                }
            }
        }
    }

    #[test]
    fn gap_ja_is_zero() {
        assert_eq!(sexagenary_index(Stem::Gap, Branch::Ja), Some(0));
    }

    #[test]
    fn gye_hae_is_last() {
        assert_eq!(sexagenary_index(Stem::Gye, Branch::Hae), Some(59));
    }

    #[test]
    fn na_yin_first_decade() {
        // Gap-Ja / Eul-Chuk share Haejunggeum ("gold in the sea").
        assert_eq!(na_yin(Stem::Gap, Branch::Ja), Some("Haejunggeum"));
        assert_eq!(na_yin(Stem::Eul, Branch::Chuk), Some("Haejunggeum"));
        assert_eq!(na_yin(Stem::Gye, Branch::Hae), Some("Daehaesu"));
    }

    #[test]
    fn void_of_first_xun_is_sul_hae() {
        assert_eq!(
            void_branches(Stem::Gap, Branch::Ja),
            Some([Branch::Sul, Branch::Hae])
        );
    }

    #[test]
    fn void_of_last_xun() {
        // Gap-In = cycle index 50, xun 5, start = (10 - 10) mod 12 = 0.
        assert_eq!(
            void_branches(Stem::Gap, Branch::In),
            Some([Branch::Ja, Branch::Chuk])
        );
    }

    #[test]
    fn void_none_on_parity_violation() {
        assert_eq!(void_branches(Stem::Gap, Branch::Chuk), None);
    }
}
