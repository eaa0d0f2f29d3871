//! The navigation graph: nodes, undirected weighted edges, and exit marks.

use rustc_hash::FxHashMap;

use evac_core::{NodeId, Vec2};
use evac_env::{Environment, SegmentKind};

// ── Node ──────────────────────────────────────────────────────────────────────

/// A navigable point with its adjacency map.
///
/// `edges` maps neighbour id → edge cost.  The graph keeps this symmetric:
/// `a.edges[b] == b.edges[a]`, always the Euclidean distance between the
/// two positions.
#[derive(Clone, Debug)]
pub struct Node {
    pub id:    NodeId,
    pub pos:   Vec2,
    pub edges: FxHashMap<NodeId, f32>,
}

impl Node {
    pub fn new(id: NodeId, pos: Vec2) -> Self {
        Self { id, pos, edges: FxHashMap::default() }
    }
}

// ── NavGraph ──────────────────────────────────────────────────────────────────

/// Undirected weighted graph over the floor plan.
///
/// Node ids may be sparse (the grid builder skips blocked cells without
/// renumbering).  `ids` keeps every existing id in ascending order so that
/// uniform sampling and tie-breaking stay deterministic across runs.
#[derive(Clone, Debug, Default)]
pub struct NavGraph {
    nodes: FxHashMap<NodeId, Node>,
    /// Every node id, ascending.  Builders insert in ascending id order.
    ids: Vec<NodeId>,
    /// Exit node id → index of the owning exit segment in the environment.
    exit_nodes: FxHashMap<NodeId, usize>,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction (used by builders) ───────────────────────────────────

    /// Insert a node.  Ids must arrive in strictly ascending order.
    pub fn insert_node(&mut self, id: NodeId, pos: Vec2) {
        debug_assert!(
            self.ids.last().is_none_or(|last| *last < id),
            "node ids must be inserted in ascending order"
        );
        self.nodes.insert(id, Node::new(id, pos));
        self.ids.push(id);
    }

    /// Insert the symmetric edge `a ↔ b` with cost equal to the Euclidean
    /// distance between the endpoints.  Re-inserting an edge is a no-op
    /// (the cost is a function of the fixed positions).
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (Some(na), Some(nb)) = (self.nodes.get(&a), self.nodes.get(&b)) else {
            return;
        };
        let cost = na.pos.distance(nb.pos);
        if let Some(n) = self.nodes.get_mut(&a) {
            n.edges.insert(b, cost);
        }
        if let Some(n) = self.nodes.get_mut(&b) {
            n.edges.insert(a, cost);
        }
    }

    /// Mark `id` as an exit node belonging to exit segment `segment_idx`.
    pub fn mark_exit(&mut self, id: NodeId, segment_idx: usize) {
        self.exit_nodes.insert(id, segment_idx);
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// All node ids in ascending order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn pos(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(&id).map(|n| n.pos)
    }

    /// Neighbour ids and edge costs of `id`, in **ascending id order**.
    ///
    /// Sorted so that stochastic sampling over neighbours is reproducible
    /// and greedy selection tie-breaks on the lower id.
    pub fn neighbors(&self, id: NodeId) -> Vec<(NodeId, f32)> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let mut out: Vec<(NodeId, f32)> = node.edges.iter().map(|(&n, &c)| (n, c)).collect();
        out.sort_unstable_by_key(|(n, _)| *n);
        out
    }

    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> Option<f32> {
        self.nodes.get(&a)?.edges.get(&b).copied()
    }

    pub fn is_exit(&self, id: NodeId) -> bool {
        self.exit_nodes.contains_key(&id)
    }

    /// Exit-segment index owning exit node `id`.
    pub fn exit_segment(&self, id: NodeId) -> Option<usize> {
        self.exit_nodes.get(&id).copied()
    }

    /// Number of exit nodes.
    pub fn exit_count(&self) -> usize {
        self.exit_nodes.len()
    }

    /// Every undirected edge exactly once as `(low_id, high_id, cost)`,
    /// ascending by `(low, high)`.
    pub fn edges(&self) -> Vec<(NodeId, NodeId, f32)> {
        let mut out = Vec::new();
        for &id in &self.ids {
            for (n, c) in self.neighbors(id) {
                if id < n {
                    out.push((id, n, c));
                }
            }
        }
        out
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node to `pos` that has an unobstructed line of sight from
    /// `pos`, or `None` when the graph is empty or every node is hidden
    /// behind a wall.
    ///
    /// Candidates are tried in ascending distance (ties broken by id), the
    /// same rule the original route seeding used.
    pub fn nearest_visible_node(&self, pos: Vec2, env: &dyn Environment) -> Option<NodeId> {
        let mut candidates: Vec<(f32, NodeId)> = self
            .ids
            .iter()
            .map(|&id| (self.nodes[&id].pos.distance(pos), id))
            .collect();
        candidates.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        candidates.into_iter().find_map(|(_, id)| {
            let node_pos = self.nodes[&id].pos;
            env.first_hit(pos, node_pos, SegmentKind::Wall)
                .is_none()
                .then_some(id)
        })
    }
}
