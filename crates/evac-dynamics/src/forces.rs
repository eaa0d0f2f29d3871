//! Social-force terms: driving force plus agent and wall repulsion.
//!
//! The repulsion formula follows Helbing's granular variant: an
//! exponential personal-space term, a body-compression term active only
//! while shapes overlap, and a sliding-friction term along the contact
//! tangent.  Walls reuse the same formula with the closest point on the
//! segment as the interaction point, zero radius and zero velocity.

use evac_core::{Segment, Vec2, GEOM_EPS};

use crate::agent::{AgentSnapshot, AgentState};

// ── ForceParams ───────────────────────────────────────────────────────────────

/// Social-force constants.
///
/// Defaults are the common calibration for indoor pedestrian densities:
/// interaction strength `a` in newtons, falloff `b` in metres, body force
/// `k` and friction `kappa` in the 1e5 range, relaxation time `tau` in
/// seconds.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceParams {
    pub a:     f32,
    pub b:     f32,
    pub k:     f32,
    pub kappa: f32,
    pub tau:   f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            a:     2.0,
            b:     0.08,
            k:     1.2e5,
            kappa: 2.4e5,
            tau:   0.5,
        }
    }
}

// ── Force terms ───────────────────────────────────────────────────────────────

/// Relaxation toward the desired velocity: `(v_des − v) / tau`, where
/// `v_des` points at `target_point` at full speed.  An agent standing
/// exactly on its target gets a pure braking term.
pub fn driving_force(agent: &AgentState, target_point: Vec2, params: &ForceParams) -> Vec2 {
    let to_target = target_point - agent.pos;
    let direction = if to_target.length() < GEOM_EPS {
        Vec2::ZERO
    } else {
        to_target.normalized()
    };
    let v_des = direction * agent.max_speed;
    (v_des - agent.vel) / params.tau
}

/// Repulsion exerted on `agent` by a point interactor at `p_j` moving
/// with `v_j` and carrying radius `r_j`.
///
/// When the two positions coincide the contact normal is undefined; a
/// fixed +x direction is used so the step stays finite and reproducible.
fn repulsion_from_point(
    agent:  &AgentState,
    p_j:    Vec2,
    v_j:    Vec2,
    r_j:    f32,
    params: &ForceParams,
) -> Vec2 {
    let d_vec = agent.pos - p_j;
    let dist = d_vec.length().max(GEOM_EPS);
    let n = if d_vec.length() < GEOM_EPS {
        Vec2::UNIT_X
    } else {
        d_vec / dist
    };
    let t = n.perp();

    let r_sum = agent.radius + r_j;
    let overlap = (r_sum - dist).max(0.0);

    let f_exp = n * (params.a * ((r_sum - dist) / params.b).exp());
    let f_push = n * (params.k * overlap);
    let dv_t = (v_j - agent.vel).dot(t);
    let f_slide = t * (params.kappa * overlap * dv_t);

    f_exp + f_push + f_slide
}

/// Total repulsion from every other agent in the pre-tick snapshot.
pub fn agent_repulsion(
    agent:     &AgentState,
    neighbors: &[AgentSnapshot],
    params:    &ForceParams,
) -> Vec2 {
    neighbors
        .iter()
        .filter(|other| other.id != agent.id)
        .fold(Vec2::ZERO, |acc, other| {
            acc + repulsion_from_point(agent, other.pos, other.vel, other.radius, params)
        })
}

/// Total repulsion from every wall segment, each interacting through its
/// closest point to the agent.
pub fn wall_repulsion(agent: &AgentState, walls: &[Segment], params: &ForceParams) -> Vec2 {
    walls.iter().fold(Vec2::ZERO, |acc, wall| {
        let closest = wall.closest_point(agent.pos);
        acc + repulsion_from_point(agent, closest, Vec2::ZERO, 0.0, params)
    })
}
