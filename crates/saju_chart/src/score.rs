//! Element distribution and single-chart scoring.

use saju_core::{FiveElement, clamp0_100, clamp01};

use crate::doc::{Edge, EdgeKind, ElDistribution, Node};

/// Weighted five-element proportions over all node strengths.
///
/// Uniform 0.2 shares when the total strength is zero.
pub fn distribution(nodes: &[Node]) -> ElDistribution {
    let mut sums = [0.0f64; 5];
    let mut total = 0.0;
    for n in nodes {
        sums[n.element.index() as usize] += n.strength;
        total += n.strength;
    }
    if total <= 0.0 {
        return ElDistribution::uniform();
    }
    ElDistribution {
        wood: sums[0] / total,
        fire: sums[1] / total,
        earth: sums[2] / total,
        metal: sums[3] / total,
        water: sums[4] / total,
    }
}

/// Balance score: how close the distribution sits to uniform, 0-100.
pub fn balance_score(dist: &ElDistribution) -> f64 {
    clamp01(1.0 - dist.deviation() / 1.6) * 100.0
}

/// Day-master support score, 0-100.
///
/// Support = own + resource shares; drain = output + controller shares.
pub fn support_score(dist: &ElDistribution, day_master: FiveElement) -> f64 {
    let support = dist.get(day_master) + dist.get(day_master.resource());
    let drain = dist.get(day_master.output()) + dist.get(day_master.controller());
    clamp01(0.5 + (support - drain) / 2.0) * 100.0
}

/// Penalty from conflict edges: 6·clash + 5·punishment + 4·harm + 4·break.
pub fn conflict_penalty(edges: &[Edge]) -> f64 {
    let mut penalty = 0.0;
    for e in edges {
        penalty += match e.kind {
            EdgeKind::Clash => 6.0,
            EdgeKind::Punishment => 5.0,
            EdgeKind::Harm => 4.0,
            EdgeKind::Break => 4.0,
            _ => 0.0,
        };
    }
    penalty
}

/// Overall single-chart score.
pub fn overall_score(balance: f64, support: f64, penalty: f64) -> f64 {
    clamp0_100(0.58 * balance + 0.42 * support - penalty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_core::{PillarKey, Polarity};

    use crate::doc::NodeKind;

    fn node(id: u32, element: FiveElement, strength: f64) -> Node {
        Node {
            id,
            kind: NodeKind::Stem,
            pillar: PillarKey::Year,
            hidden_slot: None,
            element,
            polarity: Polarity::Yang,
            ten_god: None,
            twelve_fate: None,
            strength,
        }
    }

    #[test]
    fn empty_nodes_yield_uniform() {
        let d = distribution(&[]);
        assert_eq!(d, ElDistribution::uniform());
    }

    #[test]
    fn proportions_sum_to_one() {
        let nodes = vec![
            node(1, FiveElement::Wood, 1.0),
            node(2, FiveElement::Fire, 2.0),
            node(3, FiveElement::Water, 1.0),
        ];
        let d = distribution(&nodes);
        let sum = d.wood + d.fire + d.earth + d.metal + d.water;
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((d.fire - 0.5).abs() < 1e-12);
    }

    #[test]
    fn uniform_balance_is_100() {
        assert!((balance_score(&ElDistribution::uniform()) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_element_balance_is_zero() {
        let d = distribution(&[node(1, FiveElement::Wood, 1.0)]);
        // Deviation: 0.8 + 4*0.2 = 1.6 → balance 0.
        assert!(balance_score(&d).abs() < 1e-9);
    }

    #[test]
    fn support_neutral_at_uniform() {
        // Uniform: support = drain = 0.4 → score 50.
        let s = support_score(&ElDistribution::uniform(), FiveElement::Wood);
        assert!((s - 50.0).abs() < 1e-9);
    }

    #[test]
    fn support_rises_with_resource() {
        let nodes = vec![
            node(1, FiveElement::Wood, 2.0),
            node(2, FiveElement::Water, 2.0),
        ];
        let d = distribution(&nodes);
        // Support = 1.0, drain = 0 → score 100.
        assert!((support_score(&d, FiveElement::Wood) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn overall_clamped() {
        assert_eq!(overall_score(100.0, 100.0, 0.0), 100.0);
        assert_eq!(overall_score(10.0, 10.0, 50.0), 0.0);
    }
}
