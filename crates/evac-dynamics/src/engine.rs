//! The `MovementModel` trait and its social-force implementation.

use evac_core::Segment;
use evac_env::{Environment, SegmentKind};

use crate::agent::{AgentSnapshot, AgentState};
use crate::error::{DynamicsError, DynamicsResult};
use crate::forces::{agent_repulsion, driving_force, wall_repulsion, ForceParams};

// ── MovementModel trait ───────────────────────────────────────────────────────

/// One-tick motion update for a single agent.
///
/// The simulator owns the loop; a model only ever sees one agent plus the
/// shared pre-tick snapshot, so alternative policies (flocking, swarm
/// variants) drop in without touching the orchestration.
pub trait MovementModel: Send + Sync {
    /// Advance `agent` by `dt` seconds.
    ///
    /// `neighbors` is the pre-tick snapshot of every agent (including
    /// this one, which implementations must skip by id).  Fails with
    /// [`DynamicsError::MissingTarget`] when the agent has no target —
    /// that is a routing bug upstream, not a simulation outcome.
    fn step(
        &self,
        agent:     &mut AgentState,
        neighbors: &[AgentSnapshot],
        env:       &dyn Environment,
        dt:        f32,
    ) -> DynamicsResult<()>;
}

// ── SocialForceModel ──────────────────────────────────────────────────────────

/// Helbing-style social-force dynamics.
///
/// Per tick: driving force toward the target, plus agent and wall
/// repulsion scaled by `1 / mass`; semi-implicit Euler integration with a
/// hard speed clamp; then wall-collision resolution on the travelled
/// segment.
#[derive(Copy, Clone, Debug, Default)]
pub struct SocialForceModel {
    params: ForceParams,
}

impl SocialForceModel {
    /// Pushed-back agents end up this far beyond their radius from the
    /// wall, so the next tick does not immediately re-collide.
    const WALL_PUSHBACK: f32 = 0.1;

    pub fn new(params: ForceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    /// If the travel segment `prev → agent.pos` crosses a wall, push the
    /// agent back to the wall-facing side and cancel the velocity
    /// component directed into the wall.
    fn resolve_wall_collision(
        &self,
        agent: &mut AgentState,
        prev:  evac_core::Vec2,
        env:   &dyn Environment,
    ) {
        let Some(idx) = env.first_hit(prev, agent.pos, SegmentKind::Wall) else {
            return;
        };
        let wall = env.walls()[idx];
        let travel = Segment::new(prev, agent.pos);
        let hit = travel
            .intersection_point(wall)
            .unwrap_or_else(|| wall.closest_point(agent.pos));

        let normal = wall.normal_towards(prev);
        agent.pos = hit + normal * (agent.radius + Self::WALL_PUSHBACK);

        let v_in = agent.vel.dot(normal);
        if v_in < 0.0 {
            agent.vel -= normal * v_in;
        }
    }
}

impl MovementModel for SocialForceModel {
    fn step(
        &self,
        agent:     &mut AgentState,
        neighbors: &[AgentSnapshot],
        env:       &dyn Environment,
        dt:        f32,
    ) -> DynamicsResult<()> {
        let target = agent.target.ok_or(DynamicsError::MissingTarget(agent.id))?;
        let target_point = target.point_for(agent.pos);

        let driving = driving_force(agent, target_point, &self.params);
        let f_agents = agent_repulsion(agent, neighbors, &self.params);
        let f_walls = wall_repulsion(agent, env.walls(), &self.params);

        // Driving is already an acceleration; contact forces scale with
        // body mass.
        let accel = driving + (f_agents + f_walls) / agent.mass;
        agent.vel += accel * dt;
        agent.vel = agent.vel.clamped(agent.max_speed);

        let prev = agent.pos;
        agent.pos += agent.vel * dt;

        self.resolve_wall_collision(agent, prev, env);
        Ok(())
    }
}
