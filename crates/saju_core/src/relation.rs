//! Stem and branch relation tables.
//!
//! Fixed unordered pair/set tables: stem combination (cheonganhap), branch
//! clash (chung), six-combination (yukhap), punishment (hyeong), harm (hae),
//! break (pa) and triad combination (samhap). Weights are per-relation
//! constants in (0, 1].

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::FiveElement;
use crate::stem::Stem;

/// Relational edge kinds, in the order they are tested between two pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    StemCombination,
    Clash,
    SixCombination,
    Punishment,
    Harm,
    Break,
    TriadCombination,
}

/// All relational kinds in test order.
pub const ALL_RELATIONS: [RelationKind; 7] = [
    RelationKind::StemCombination,
    RelationKind::Clash,
    RelationKind::SixCombination,
    RelationKind::Punishment,
    RelationKind::Harm,
    RelationKind::Break,
    RelationKind::TriadCombination,
];

impl RelationKind {
    /// Edge weight for this relation.
    pub const fn weight(self) -> f64 {
        match self {
            Self::StemCombination => 0.86,
            Self::Clash => 1.00,
            Self::SixCombination => 0.84,
            Self::Punishment => 0.72,
            Self::Harm => 0.68,
            Self::Break => 0.64,
            Self::TriadCombination => 0.88,
        }
    }

    /// Stable wire code, also the histogram key (alphabetical tie-breaks
    /// depend on these exact strings).
    pub const fn code(self) -> &'static str {
        match self {
            Self::StemCombination => "STEM_COMBINATION",
            Self::Clash => "CLASH",
            Self::SixCombination => "SIX_COMBINATION",
            Self::Punishment => "PUNISHMENT",
            Self::Harm => "HARM",
            Self::Break => "BREAK",
            Self::TriadCombination => "TRIAD_COMBINATION",
        }
    }

    /// Harmonious relations contribute to harmony aggregates; the rest to
    /// conflict.
    pub const fn is_harmonious(self) -> bool {
        matches!(
            self,
            Self::StemCombination | Self::SixCombination | Self::TriadCombination
        )
    }
}

/// The 5 stem combinations and their resulting elements.
const STEM_COMBINATIONS: [(Stem, Stem, FiveElement); 5] = [
    (Stem::Gap, Stem::Gi, FiveElement::Earth),
    (Stem::Eul, Stem::Gyeong, FiveElement::Metal),
    (Stem::Byeong, Stem::Sin, FiveElement::Water),
    (Stem::Jeong, Stem::Im, FiveElement::Wood),
    (Stem::Mu, Stem::Gye, FiveElement::Fire),
];

/// Resulting element if two stems combine. Order-independent; a stem never
/// combines with itself.
pub fn stem_combination(a: Stem, b: Stem) -> Option<FiveElement> {
    STEM_COMBINATIONS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, el)| *el)
}

/// The 6 opposite-branch clash pairs.
const CLASH_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::O),
    (Branch::Chuk, Branch::Mi),
    (Branch::In, Branch::Sin),
    (Branch::Myo, Branch::Yu),
    (Branch::Jin, Branch::Sul),
    (Branch::Sa, Branch::Hae),
];

/// The 6 six-combination pairs.
const SIX_COMBINATION_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Chuk),
    (Branch::In, Branch::Hae),
    (Branch::Myo, Branch::Sul),
    (Branch::Jin, Branch::Yu),
    (Branch::Sa, Branch::Sin),
    (Branch::O, Branch::Mi),
];

/// The two triple-punishment sets (any two members punish each other).
const PUNISHMENT_TRIPLES: [[Branch; 3]; 2] = [
    [Branch::In, Branch::Sa, Branch::Sin],
    [Branch::Chuk, Branch::Sul, Branch::Mi],
];

/// The mutual punishment pair.
const PUNISHMENT_MUTUAL: (Branch, Branch) = (Branch::Ja, Branch::Myo);

/// Branches that punish themselves when two pillars share them.
const PUNISHMENT_SELF: [Branch; 4] = [Branch::Jin, Branch::O, Branch::Yu, Branch::Hae];

/// The 6 harm pairs.
const HARM_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Mi),
    (Branch::Chuk, Branch::O),
    (Branch::In, Branch::Sa),
    (Branch::Myo, Branch::Jin),
    (Branch::Sin, Branch::Hae),
    (Branch::Yu, Branch::Sul),
];

/// The 6 break pairs.
const BREAK_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Yu),
    (Branch::Chuk, Branch::Jin),
    (Branch::In, Branch::Hae),
    (Branch::Myo, Branch::O),
    (Branch::Sa, Branch::Sin),
    (Branch::Mi, Branch::Sul),
];

/// The 4 triad sets and their resulting elements; any 2 of 3 trigger.
const TRIAD_SETS: [([Branch; 3], FiveElement); 4] = [
    ([Branch::Sin, Branch::Ja, Branch::Jin], FiveElement::Water),
    ([Branch::Hae, Branch::Myo, Branch::Mi], FiveElement::Wood),
    ([Branch::In, Branch::O, Branch::Sul], FiveElement::Fire),
    ([Branch::Sa, Branch::Yu, Branch::Chuk], FiveElement::Metal),
];

fn pair_in(table: &[(Branch, Branch)], a: Branch, b: Branch) -> bool {
    table
        .iter()
        .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
}

/// Clash test (order-independent).
pub fn is_clash(a: Branch, b: Branch) -> bool {
    pair_in(&CLASH_PAIRS, a, b)
}

/// Six-combination test.
pub fn is_six_combination(a: Branch, b: Branch) -> bool {
    pair_in(&SIX_COMBINATION_PAIRS, a, b)
}

/// Punishment test: triple sets pairwise, the mutual pair, or a shared
/// self-punishing branch.
pub fn is_punishment(a: Branch, b: Branch) -> bool {
    if a == b {
        return PUNISHMENT_SELF.contains(&a);
    }
    if (PUNISHMENT_MUTUAL.0 == a && PUNISHMENT_MUTUAL.1 == b)
        || (PUNISHMENT_MUTUAL.0 == b && PUNISHMENT_MUTUAL.1 == a)
    {
        return true;
    }
    PUNISHMENT_TRIPLES
        .iter()
        .any(|set| set.contains(&a) && set.contains(&b))
}

/// Harm test.
pub fn is_harm(a: Branch, b: Branch) -> bool {
    pair_in(&HARM_PAIRS, a, b)
}

/// Break test.
pub fn is_break(a: Branch, b: Branch) -> bool {
    pair_in(&BREAK_PAIRS, a, b)
}

/// Triad test: two distinct members of one set combine toward its element.
pub fn triad_combination(a: Branch, b: Branch) -> Option<FiveElement> {
    if a == b {
        return None;
    }
    TRIAD_SETS
        .iter()
        .find(|(set, _)| set.contains(&a) && set.contains(&b))
        .map(|(_, el)| *el)
}

/// All branch relations between two branches, in fixed test order, with the
/// resulting element where the relation yields one.
pub fn branch_relations(a: Branch, b: Branch) -> Vec<(RelationKind, Option<FiveElement>)> {
    let mut out = Vec::new();
    if is_clash(a, b) {
        out.push((RelationKind::Clash, None));
    }
    if is_six_combination(a, b) {
        out.push((RelationKind::SixCombination, None));
    }
    if is_punishment(a, b) {
        out.push((RelationKind::Punishment, None));
    }
    if is_harm(a, b) {
        out.push((RelationKind::Harm, None));
    }
    if is_break(a, b) {
        out.push((RelationKind::Break, None));
    }
    if let Some(el) = triad_combination(a, b) {
        out.push((RelationKind::TriadCombination, Some(el)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::ALL_BRANCHES;
    use crate::stem::ALL_STEMS;

    #[test]
    fn stem_combination_order_independent() {
        assert_eq!(
            stem_combination(Stem::Gap, Stem::Gi),
            Some(FiveElement::Earth)
        );
        assert_eq!(
            stem_combination(Stem::Gi, Stem::Gap),
            Some(FiveElement::Earth)
        );
        assert_eq!(
            stem_combination(Stem::Mu, Stem::Gye),
            Some(FiveElement::Fire)
        );
    }

    #[test]
    fn no_stem_combines_with_itself() {
        for s in ALL_STEMS {
            assert_eq!(stem_combination(s, s), None);
        }
    }

    #[test]
    fn clash_pairs_are_opposites() {
        for (a, b) in CLASH_PAIRS {
            assert_eq!((a.index() + 6) % 12, b.index());
        }
        assert!(is_clash(Branch::O, Branch::Ja));
        assert!(!is_clash(Branch::Ja, Branch::Chuk));
    }

    #[test]
    fn no_branch_clashes_with_itself() {
        for b in ALL_BRANCHES {
            assert!(!is_clash(b, b));
        }
    }

    #[test]
    fn six_combination_hits() {
        assert!(is_six_combination(Branch::Ja, Branch::Chuk));
        assert!(is_six_combination(Branch::Hae, Branch::In));
        assert!(!is_six_combination(Branch::Ja, Branch::O));
    }

    #[test]
    fn triple_punishment_pairwise() {
        assert!(is_punishment(Branch::In, Branch::Sa));
        assert!(is_punishment(Branch::Sa, Branch::Sin));
        assert!(is_punishment(Branch::In, Branch::Sin));
        assert!(is_punishment(Branch::Chuk, Branch::Sul));
    }

    #[test]
    fn mutual_punishment() {
        assert!(is_punishment(Branch::Ja, Branch::Myo));
        assert!(is_punishment(Branch::Myo, Branch::Ja));
    }

    #[test]
    fn self_punishment_only_for_four_branches() {
        for b in ALL_BRANCHES {
            let expected = matches!(b, Branch::Jin | Branch::O | Branch::Yu | Branch::Hae);
            assert_eq!(is_punishment(b, b), expected, "{b:?}");
        }
    }

    #[test]
    fn triad_any_two_of_three() {
        assert_eq!(
            triad_combination(Branch::Sin, Branch::Ja),
            Some(FiveElement::Water)
        );
        assert_eq!(
            triad_combination(Branch::Ja, Branch::Jin),
            Some(FiveElement::Water)
        );
        assert_eq!(
            triad_combination(Branch::In, Branch::Sul),
            Some(FiveElement::Fire)
        );
        assert_eq!(triad_combination(Branch::Ja, Branch::O), None);
    }

    #[test]
    fn weights_in_unit_interval() {
        for r in ALL_RELATIONS {
            assert!(r.weight() > 0.0 && r.weight() <= 1.0);
        }
    }

    #[test]
    fn relation_test_order_is_stable() {
        // In-Sa is both punishment and harm; order must be punishment first.
        let rels = branch_relations(Branch::In, Branch::Sa);
        let kinds: Vec<_> = rels.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![RelationKind::Punishment, RelationKind::Harm]);
    }

    #[test]
    fn sa_sin_triple_overlap() {
        // Sa-Sin is six-combination, punishment and break at once.
        let rels = branch_relations(Branch::Sa, Branch::Sin);
        let kinds: Vec<_> = rels.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                RelationKind::SixCombination,
                RelationKind::Punishment,
                RelationKind::Break
            ]
        );
    }
}
