//! Agent state and the per-tick read-only snapshot.

use rustc_hash::FxHashSet;

use evac_core::{AgentId, NodeId, Segment, Vec2};

// ── Target ────────────────────────────────────────────────────────────────────

/// What an agent is currently steering toward.
#[derive(Copy, Clone, Debug)]
pub enum Target {
    /// A fixed waypoint (normally a graph node position).
    Point(Vec2),
    /// An exit segment; the steering point is the closest point on the
    /// segment to the agent, recomputed every tick.
    Exit(Segment),
}

impl Target {
    /// The concrete point to steer toward from `pos`.
    pub fn point_for(&self, pos: Vec2) -> Vec2 {
        match self {
            Target::Point(p) => *p,
            Target::Exit(seg) => seg.closest_point(pos),
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Terminal state of an agent.  `Active` agents keep being stepped; the
/// other two are final and mutually exclusive.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    #[default]
    Active,
    Escaped,
    Failed,
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// Full mutable state of one pedestrian.
#[derive(Clone, Debug)]
pub struct AgentState {
    pub id:        AgentId,
    pub pos:       Vec2,
    pub vel:       Vec2,
    pub radius:    f32,
    pub mass:      f32,
    pub max_speed: f32,
    /// Steering target for the dynamics step.  `None` until routing
    /// assigns one; stepping a targetless agent is an error.
    pub target: Option<Target>,
    /// Graph node the agent is currently heading for, or
    /// [`NodeId::INVALID`] when the target is not a node (direct exit
    /// approach).
    pub target_node: NodeId,
    /// Nodes already consumed by route following; greedy next-hop
    /// selection never revisits these.
    pub visited: FxHashSet<NodeId>,
    pub outcome: Outcome,
}

impl AgentState {
    /// New active agent at rest.
    pub fn new(id: AgentId, pos: Vec2, radius: f32, mass: f32, max_speed: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
            max_speed,
            target: None,
            target_node: NodeId::INVALID,
            visited: FxHashSet::default(),
            outcome: Outcome::Active,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.outcome == Outcome::Active
    }

    /// Pre-tick copy used for neighbor repulsion.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id:     self.id,
            pos:    self.pos,
            vel:    self.vel,
            radius: self.radius,
        }
    }
}

// ── AgentSnapshot ─────────────────────────────────────────────────────────────

/// Immutable pre-tick view of an agent, shared by every dynamics step in
/// the same tick.
#[derive(Copy, Clone, Debug)]
pub struct AgentSnapshot {
    pub id:     AgentId,
    pub pos:    Vec2,
    pub vel:    Vec2,
    pub radius: f32,
}
