//! Probabilistic-roadmap graph builder.
//!
//! Samples random free points, then links each point to its k nearest
//! neighbours through an R-tree.  Sampling draws from the caller-supplied
//! [`SimRng`], so a fixed seed reproduces the exact same roadmap.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use evac_core::{NodeId, SimRng, Vec2};
use evac_env::{Environment, SegmentKind};

use crate::builder::{attach_exit_nodes, ExitWiring, GraphBuilder};
use crate::graph::NavGraph;
use crate::{GraphError, GraphResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Sampled point stored in the R-tree together with its node id.
#[derive(Clone)]
struct SampleEntry {
    point: [f32; 2],
    id:    NodeId,
}

impl RTreeObject for SampleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SampleEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadmapBuilder ────────────────────────────────────────────────────────────

/// Random-sampling roadmap builder.
#[derive(Copy, Clone, Debug)]
pub struct RoadmapBuilder {
    /// Number of interior points to sample.
    pub samples: usize,
    /// Nearest-neighbour candidates per point.
    pub neighbors: usize,
    /// Margin kept clear along the floor edges when sampling.
    pub border: f32,
    pub wiring: ExitWiring,
}

impl RoadmapBuilder {
    pub const DEFAULT_BORDER: f32 = 0.5;

    /// Rejection-sampling attempts per point before giving up on an
    /// environment that is (locally) full.
    const MAX_SAMPLE_ATTEMPTS: usize = 10_000;

    pub fn new(samples: usize, neighbors: usize) -> Self {
        Self {
            samples,
            neighbors,
            border: Self::DEFAULT_BORDER,
            wiring: ExitWiring::default(),
        }
    }

    pub fn with_wiring(mut self, wiring: ExitWiring) -> Self {
        self.wiring = wiring;
        self
    }

    fn validate(&self) -> GraphResult<()> {
        if self.samples == 0 || self.neighbors == 0 {
            return Err(GraphError::BadRoadmapParams {
                samples:   self.samples,
                neighbors: self.neighbors,
            });
        }
        self.wiring.validate()
    }

    /// Draw one free position, or `None` when the attempt budget runs out
    /// (a floor with no remaining free space).
    fn sample_free(&self, env: &dyn Environment, rng: &mut SimRng) -> Option<Vec2> {
        let (width, height) = env.bounds();
        for _ in 0..Self::MAX_SAMPLE_ATTEMPTS {
            let pos = Vec2::new(
                rng.gen_range(self.border..width - self.border),
                rng.gen_range(self.border..height - self.border),
            );
            if env.is_free(pos) {
                return Some(pos);
            }
        }
        None
    }
}

impl GraphBuilder for RoadmapBuilder {
    fn build(&self, env: &dyn Environment, rng: &mut SimRng) -> GraphResult<NavGraph> {
        self.validate()?;

        let mut graph = NavGraph::new();
        let mut entries = Vec::with_capacity(self.samples);

        for i in 0..self.samples {
            // A full floor ends sampling early rather than erroring; the
            // caller sees the shortfall in `node_count`.
            let Some(pos) = self.sample_free(env, rng) else {
                break;
            };
            let id = NodeId(i as u32);
            graph.insert_node(id, pos);
            entries.push(SampleEntry { point: [pos.x, pos.y], id });
        }

        let sampled = entries.len();
        let tree = RTree::bulk_load(entries);

        let interior: Vec<NodeId> = graph.ids().to_vec();
        for id in interior {
            let Some(pos) = graph.pos(id) else { continue };
            let point = [pos.x, pos.y];
            let candidates: Vec<NodeId> = tree
                .nearest_neighbor_iter(&point)
                .filter(|e| e.id != id)
                .take(self.neighbors)
                .map(|e| e.id)
                .collect();
            for other in candidates {
                let Some(other_pos) = graph.pos(other) else { continue };
                if env.first_hit(pos, other_pos, SegmentKind::Wall).is_none() {
                    graph.connect(id, other);
                }
            }
        }

        attach_exit_nodes(&mut graph, env, &self.wiring, sampled as u32);
        Ok(graph)
    }
}
