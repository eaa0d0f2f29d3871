//! The pheromone field: one non-negative level per undirected graph edge.

use rustc_hash::{FxHashMap, FxHashSet};

use evac_core::NodeId;
use evac_graph::NavGraph;

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// Unordered node-id pair identifying an undirected edge.
///
/// The constructor normalizes the endpoint order, so `(a, b)` and `(b, a)`
/// always address the same pheromone entry.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    low:  NodeId,
    high: NodeId,
}

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        debug_assert_ne!(a, b, "an edge needs two distinct endpoints");
        if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> NodeId {
        self.low
    }

    pub fn high(&self) -> NodeId {
        self.high
    }
}

// ── PheromoneField ────────────────────────────────────────────────────────────

/// Per-edge pheromone levels.
///
/// Created uniformly over a graph's edges, mutated only by the router's
/// convergence loop (evaporation then reinforcement), and read-only once
/// the simulator starts.  Levels never go negative: evaporation floors at
/// zero and deposits are positive.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneField {
    levels: FxHashMap<EdgeKey, f32>,
}

impl PheromoneField {
    /// Level assigned to every edge at construction.
    pub const INITIAL_LEVEL: f32 = 1.0;

    /// One entry per edge of `graph`, all at [`INITIAL_LEVEL`].
    ///
    /// [`INITIAL_LEVEL`]: PheromoneField::INITIAL_LEVEL
    pub fn uniform(graph: &NavGraph) -> Self {
        let levels = graph
            .edges()
            .into_iter()
            .map(|(u, v, _)| (EdgeKey::new(u, v), Self::INITIAL_LEVEL))
            .collect();
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Pheromone level on edge `a ↔ b`, or `None` for a non-edge.
    pub fn level(&self, a: NodeId, b: NodeId) -> Option<f32> {
        self.levels.get(&EdgeKey::new(a, b)).copied()
    }

    /// Multiply every level by `1 − rate`, flooring at zero.
    pub fn evaporate(&mut self, rate: f32) {
        let keep = (1.0 - rate).max(0.0);
        for level in self.levels.values_mut() {
            *level = (*level * keep).max(0.0);
        }
    }

    /// Add `amount` to the level of edge `a ↔ b`.  Unknown edges are
    /// ignored; deposits only ever land on edges that exist in the graph
    /// the field was built from.
    pub fn deposit(&mut self, a: NodeId, b: NodeId, amount: f32) {
        if let Some(level) = self.levels.get_mut(&EdgeKey::new(a, b)) {
            *level += amount;
        }
    }

    /// Greedy next hop: the unvisited neighbor of `from` whose connecting
    /// edge carries the most pheromone.
    ///
    /// Ties resolve to the lower node id (neighbors are scanned in
    /// ascending id order and only a strictly larger level displaces the
    /// incumbent).  Returns `None` when every neighbor has been visited —
    /// the caller treats that as a dead end.
    pub fn best_neighbor(
        &self,
        graph:   &NavGraph,
        from:    NodeId,
        visited: &FxHashSet<NodeId>,
    ) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for (neighbor, _) in graph.neighbors(from) {
            if visited.contains(&neighbor) {
                continue;
            }
            let level = self.level(from, neighbor).unwrap_or(0.0);
            if best.is_none_or(|(_, b)| level > b) {
                best = Some((neighbor, level));
            }
        }
        best.map(|(n, _)| n)
    }
}
