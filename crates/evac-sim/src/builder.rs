//! Fluent builder for constructing a [`Simulator`].

use evac_core::{AgentId, SimRng, Vec2};
use evac_dynamics::{AgentState, MovementModel, Outcome, SocialForceModel, Target};
use evac_env::{EnvError, Environment};
use evac_graph::NavGraph;
use evac_router::PheromoneField;

use crate::{SimConfig, SimResult, Simulator};

/// Fluent builder for [`Simulator<E, M>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — agent count, seed, tick budget, dt, body ranges
/// - `E: Environment` — the floor geometry
/// - [`NavGraph`] + [`PheromoneField`] — built and trained beforehand
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                    |
/// |---------------|--------------------------------------------|
/// | `.agents(v)`  | `config.num_agents` randomly spawned agents |
///
/// Spawning draws every body parameter from the config ranges, samples a
/// collision-free position, and seeds each agent's route at the nearest
/// graph node it can see.  An agent with no visible node starts failed —
/// that is the unroutable-spawn outcome, not an error.
pub struct SimulatorBuilder<E: Environment, M: MovementModel> {
    config: SimConfig,
    env:    E,
    graph:  NavGraph,
    field:  PheromoneField,
    model:  M,
    agents: Option<Vec<AgentState>>,
}

impl<E: Environment> SimulatorBuilder<E, SocialForceModel> {
    /// Builder with the default social-force movement model.
    pub fn new(config: SimConfig, env: E, graph: NavGraph, field: PheromoneField) -> Self {
        Self::with_model(config, env, graph, field, SocialForceModel::default())
    }
}

/// RNG child stream used for spawning, distinct from the streams the demos
/// hand to the graph builder and the router.
const SPAWN_STREAM: u64 = 2;

/// Attempts per agent to find a collision-free spawn position.
const MAX_SPAWN_ATTEMPTS: usize = 10_000;

impl<E: Environment, M: MovementModel> SimulatorBuilder<E, M> {
    /// Builder with an explicit movement model.
    pub fn with_model(
        config: SimConfig,
        env:    E,
        graph:  NavGraph,
        field:  PheromoneField,
        model:  M,
    ) -> Self {
        Self {
            config,
            env,
            graph,
            field,
            model,
            agents: None,
        }
    }

    /// Supply pre-constructed agents instead of random spawning.
    ///
    /// Ids must be ascending; targets are taken as-is, so callers can set
    /// up direct exit approaches without any graph routing.
    pub fn agents(mut self, agents: Vec<AgentState>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate the config, spawn agents if none were supplied, and return
    /// a ready-to-run [`Simulator`].
    pub fn build(self) -> SimResult<Simulator<E, M>> {
        self.config.validate()?;

        let agents = match self.agents {
            Some(agents) => agents,
            None => spawn_agents(&self.config, &self.env, &self.graph)?,
        };

        Ok(Simulator::from_parts(
            self.config,
            self.env,
            self.graph,
            self.field,
            self.model,
            agents,
        ))
    }
}

/// Spawn `config.num_agents` agents with bodies drawn from the config
/// ranges and routes seeded at the nearest visible graph node.
fn spawn_agents(
    config: &SimConfig,
    env:    &dyn Environment,
    graph:  &NavGraph,
) -> SimResult<Vec<AgentState>> {
    let mut root = SimRng::new(config.seed);
    let mut rng = root.child(SPAWN_STREAM);

    let mut agents: Vec<AgentState> = Vec::with_capacity(config.num_agents);
    for i in 0..config.num_agents {
        let radius = rng.gen_range(config.radius_range.0..config.radius_range.1);
        let mass = rng.gen_range(config.mass_range.0..config.mass_range.1);
        let max_speed = rng.gen_range(config.speed_range.0..config.speed_range.1);

        let pos = free_spawn_position(env, &agents, radius, &mut rng)?;

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let vel = Vec2::new(angle.cos(), angle.sin()) * max_speed;

        let mut agent = AgentState::new(AgentId(i as u32), pos, radius, mass, max_speed)
            .with_velocity(vel);

        match graph.nearest_visible_node(pos, env) {
            Some(node) => {
                agent.target_node = node;
                if let Some(p) = graph.pos(node) {
                    agent.target = Some(Target::Point(p));
                }
            }
            // No route from here: a terminal outcome, not an error.
            None => agent.outcome = Outcome::Failed,
        }

        agents.push(agent);
    }
    Ok(agents)
}

/// Rejection-sample a position that is free and does not overlap any
/// already-spawned agent.
fn free_spawn_position(
    env:     &dyn Environment,
    spawned: &[AgentState],
    radius:  f32,
    rng:     &mut SimRng,
) -> SimResult<Vec2> {
    let (width, height) = env.bounds();
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = Vec2::new(
            rng.gen_range(radius..width - radius),
            rng.gen_range(radius..height - radius),
        );
        let clear = spawned
            .iter()
            .all(|a| a.pos.distance(pos) > a.radius + radius);
        if clear && env.is_free(pos) {
            return Ok(pos);
        }
    }
    Err(EnvError::NoFreePosition(MAX_SPAWN_ATTEMPTS).into())
}
