//! Pillar and relation-graph construction.
//!
//! Nodes and edges are numbered by two independent 1-based cursors, assigned
//! strictly in construction order: pillars Year→Month→Day→Hour (stem node,
//! branch node, hidden nodes, with structural edges as their endpoints
//! appear), then cross-pillar relational edges in pillar-pair order.

use log::debug;

use saju_core::{
    ALL_PILLAR_KEYS, Branch, PillarKey, RawPillars, RelationKind, SajuError, Stem, branch_relations,
    hidden_stems, na_yin, stem_combination, ten_god, twelve_fate, void_branches,
};

use crate::doc::{Edge, EdgeKind, Node, NodeKind, Pillar};

/// Positional base weight per pillar.
const fn position_weight(key: PillarKey) -> f64 {
    match key {
        PillarKey::Year => 0.90,
        PillarKey::Month => 1.30,
        PillarKey::Day => 1.10,
        PillarKey::Hour => 0.80,
    }
}

/// Branch nodes carry 1.2× the positional base; stems 1.0×.
const BRANCH_FACTOR: f64 = 1.20;

/// Hidden-stem strength factor per slot, floored.
fn hidden_factor(slot: usize) -> f64 {
    (0.62 - 0.08 * slot as f64).max(0.38)
}

/// Structural edge weights.
const PILLAR_LINK_WEIGHT: f64 = 1.0;
const HIDDEN_LINK_WEIGHT: f64 = 0.7;

/// A small cursor owned by one construction call; ids are never shared
/// between documents.
struct IdCursor {
    next: u32,
}

impl IdCursor {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn take(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One built pillar with its node ids.
pub(crate) struct BuiltPillar {
    pub key: PillarKey,
    pub stem: Stem,
    pub branch: Branch,
    pub stem_node: u32,
    pub branch_node: u32,
}

/// Everything the graph pass produces.
pub(crate) struct ChartGraph {
    pub pillars: Vec<Pillar>,
    pub built: Vec<BuiltPillar>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub day_master: Stem,
    pub void: [u8; 2],
}

/// Build pillars, nodes and edges from raw stem/branch pairs.
pub(crate) fn build_graph(raw: &RawPillars) -> Result<ChartGraph, SajuError> {
    raw.resolve_all()?;
    let (day_master, _) = raw.day.resolve()?;

    let mut node_ids = IdCursor::new();
    let mut edge_ids = IdCursor::new();
    let mut pillars = Vec::with_capacity(4);
    let mut built = Vec::with_capacity(4);
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for key in ALL_PILLAR_KEYS {
        let Some(pair) = raw.get(key) else { continue };
        let (stem, branch) = pair.resolve()?;
        let base = position_weight(key);

        let stem_node = node_ids.take();
        nodes.push(Node {
            id: stem_node,
            kind: NodeKind::Stem,
            pillar: key,
            hidden_slot: None,
            element: stem.element(),
            polarity: stem.polarity(),
            ten_god: Some(ten_god(day_master, stem)),
            twelve_fate: None,
            strength: base,
        });

        let branch_node = node_ids.take();
        nodes.push(Node {
            id: branch_node,
            kind: NodeKind::Branch,
            pillar: key,
            hidden_slot: None,
            element: branch.element(),
            polarity: branch.polarity(),
            ten_god: None,
            twelve_fate: Some(twelve_fate(day_master, branch)),
            strength: base * BRANCH_FACTOR,
        });

        edges.push(Edge {
            id: edge_ids.take(),
            kind: EdgeKind::PillarLink,
            from: stem_node,
            to: branch_node,
            weight: PILLAR_LINK_WEIGHT,
            result_element: None,
            active: true,
            contributors: None,
        });

        for (slot, &h) in hidden_stems(branch).iter().enumerate() {
            let hidden_node = node_ids.take();
            nodes.push(Node {
                id: hidden_node,
                kind: NodeKind::Hidden,
                pillar: key,
                hidden_slot: Some(slot as u8),
                element: h.element(),
                polarity: h.polarity(),
                ten_god: Some(ten_god(day_master, h)),
                twelve_fate: None,
                strength: base * hidden_factor(slot),
            });
            edges.push(Edge {
                id: edge_ids.take(),
                kind: EdgeKind::HiddenLink,
                from: branch_node,
                to: hidden_node,
                weight: HIDDEN_LINK_WEIGHT,
                result_element: None,
                active: true,
                contributors: None,
            });
        }

        // Display pillar: na-yin and the decade's void pair always exist for
        // parity-valid pairs, which resolve_all() guaranteed above.
        let ny = na_yin(stem, branch).unwrap_or_default().to_string();
        let void = void_branches(stem, branch)
            .map(|[a, b]| [a.index(), b.index()])
            .unwrap_or([0, 0]);
        pillars.push(Pillar {
            key,
            stem: stem.index(),
            branch: branch.index(),
            hidden: hidden_stems(branch).iter().map(|s| s.index()).collect(),
            na_yin: ny,
            void,
        });
        built.push(BuiltPillar {
            key,
            stem,
            branch,
            stem_node,
            branch_node,
        });
    }

    // Cross-pillar relational edges in pillar-pair order.
    for i in 0..built.len() {
        for j in (i + 1)..built.len() {
            let (a, b) = (&built[i], &built[j]);

            if let Some(el) = stem_combination(a.stem, b.stem) {
                edges.push(Edge {
                    id: edge_ids.take(),
                    kind: EdgeKind::StemCombination,
                    from: a.stem_node,
                    to: b.stem_node,
                    weight: RelationKind::StemCombination.weight(),
                    result_element: Some(el),
                    active: true,
                    contributors: None,
                });
            }

            for (kind, el) in branch_relations(a.branch, b.branch) {
                edges.push(Edge {
                    id: edge_ids.take(),
                    kind: kind.into(),
                    from: a.branch_node,
                    to: b.branch_node,
                    weight: kind.weight(),
                    result_element: el,
                    active: true,
                    contributors: None,
                });
            }
        }
    }

    let day_void = void_branches(day_master, raw.day.resolve()?.1)
        .map(|[a, b]| [a.index(), b.index()])
        .unwrap_or([0, 0]);

    debug!(
        "graph built: {} pillars, {} nodes, {} edges",
        built.len(),
        nodes.len(),
        edges.len()
    );

    Ok(ChartGraph {
        pillars,
        built,
        nodes,
        edges,
        day_master,
        void: day_void,
    })
}
