//! The `GraphBuilder` trait and the exit-node wiring shared by all builders.

use evac_core::{NodeId, SimRng};
use evac_env::{Environment, SegmentKind};

use crate::graph::NavGraph;
use crate::GraphResult;

// ── GraphBuilder trait ────────────────────────────────────────────────────────

/// Pluggable graph-construction strategy.
///
/// The simulator does not care how navigable space was discretised; grid
/// and roadmap builders are interchangeable behind this trait.  Builders
/// take `&mut SimRng` even when deterministic (the grid variant) so the
/// caller's wiring is identical for both.
pub trait GraphBuilder {
    /// Build a navigation graph over `env`'s geometry.
    ///
    /// An environment with no free space yields an empty graph, not an
    /// error — only invalid builder parameters fail.
    fn build(&self, env: &dyn Environment, rng: &mut SimRng) -> GraphResult<NavGraph>;
}

// ── ExitWiring ────────────────────────────────────────────────────────────────

/// How exit segments are turned into exit nodes.
#[derive(Copy, Clone, Debug)]
pub struct ExitWiring {
    /// Maximum distance at which an ordinary node is connected to an exit
    /// node (line of sight permitting).
    pub threshold: f32,
    /// Spacing between sub-nodes along a wide exit, so several agents can
    /// pass through concurrently.
    pub spacing: f32,
}

impl Default for ExitWiring {
    fn default() -> Self {
        Self { threshold: 3.0, spacing: 0.5 }
    }
}

impl ExitWiring {
    pub fn validate(&self) -> GraphResult<()> {
        if self.threshold <= 0.0 || self.spacing <= 0.0 {
            return Err(crate::GraphError::BadExitWiring);
        }
        Ok(())
    }
}

/// Append exit nodes for every exit segment of `env` and wire them to the
/// existing nodes.
///
/// For an exit of length `l`, `max(⌊l / spacing⌋, 1)` sub-nodes are placed
/// `spacing` apart, centred on the segment.  Each sub-node is connected to
/// every pre-existing node within `threshold` whose connecting segment
/// crosses no wall.  Exit node ids start at `first_id` and increase in
/// segment order, keeping the graph's ascending-id invariant.
pub(crate) fn attach_exit_nodes(
    graph:    &mut NavGraph,
    env:      &dyn Environment,
    wiring:   &ExitWiring,
    first_id: u32,
) {
    let interior: Vec<NodeId> = graph.ids().to_vec();
    let mut next_id = first_id;

    for (segment_idx, exit) in env.exits().iter().enumerate() {
        let len = exit.length();
        let count = ((len / wiring.spacing).floor() as usize).max(1);
        let dir = (exit.b - exit.a).normalized();
        let margin = (len - (count - 1) as f32 * wiring.spacing) / 2.0;

        for k in 0..count {
            let pos = exit.a + dir * (margin + k as f32 * wiring.spacing);
            let id = NodeId(next_id);
            next_id += 1;

            graph.insert_node(id, pos);
            graph.mark_exit(id, segment_idx);

            for &other in &interior {
                let other_pos = graph.pos(other).unwrap_or(pos);
                if other_pos.distance(pos) <= wiring.threshold
                    && env.first_hit(other_pos, pos, SegmentKind::Wall).is_none()
                {
                    graph.connect(other, id);
                }
            }
        }
    }
}
