//! The `Simulator` struct and its tick loop.

use evac_core::{AgentId, NodeId, Segment};
use evac_dynamics::{AgentState, MovementModel, Outcome, Target};
use evac_env::{Environment, SegmentKind};
use evac_graph::NavGraph;
use evac_router::PheromoneField;

use crate::{SimConfig, SimObserver, SimResult};

// ── RunReport ─────────────────────────────────────────────────────────────────

/// Outcome summary of a completed [`Simulator::run`].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Ticks actually executed.
    pub ticks: u64,
    /// Ids that crossed an exit segment, in escape order.
    pub escaped: Vec<AgentId>,
    /// Ids that ran out of route.
    pub failed: Vec<AgentId>,
    /// Ids still active when the tick budget ran out.
    pub stalled: Vec<AgentId>,
}

impl RunReport {
    /// `true` when every agent reached a terminal state within the budget.
    pub fn is_complete(&self) -> bool {
        self.stalled.is_empty()
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The evacuation run orchestrator.
///
/// Owns the environment, the navigation graph, the trained (read-only)
/// pheromone field, and the agent collection.  One instance is built per
/// run via [`SimulatorBuilder`][crate::SimulatorBuilder]; there is no
/// process-wide state.
pub struct Simulator<E: Environment, M: MovementModel> {
    pub config: SimConfig,
    pub env:    E,
    pub graph:  NavGraph,
    pub field:  PheromoneField,
    pub model:  M,

    /// All agents, terminal ones included, in ascending id order.
    /// Terminal agents are skipped rather than removed so ids stay
    /// meaningful to observers.
    pub agents: Vec<AgentState>,

    tick: u64,
    escape_order: Vec<AgentId>,
}

impl<E: Environment, M: MovementModel> Simulator<E, M> {
    /// Used by the builder; everything is already validated there.
    pub(crate) fn from_parts(
        config: SimConfig,
        env:    E,
        graph:  NavGraph,
        field:  PheromoneField,
        model:  M,
        agents: Vec<AgentState>,
    ) -> Self {
        Self {
            config,
            env,
            graph,
            field,
            model,
            agents,
            tick: 0,
            escape_order: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_active()).count()
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.agents.iter().find(|a| a.id == id)
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Advance the whole simulation by one tick of `config.dt` seconds.
    ///
    /// Returns the ids that escaped during this tick.  Every dynamics step
    /// reads the same pre-tick snapshot, so the result does not depend on
    /// agent iteration order.
    pub fn step(&mut self) -> SimResult<Vec<AgentId>> {
        let snapshot: Vec<_> = self
            .agents
            .iter()
            .filter(|a| a.is_active())
            .map(AgentState::snapshot)
            .collect();

        let dt = self.config.dt;
        let mut escaped_now = Vec::new();

        for agent in self.agents.iter_mut() {
            if !agent.is_active() {
                continue;
            }

            let prev = agent.pos;
            self.model.step(agent, &snapshot, &self.env, dt)?;

            // Exit crossing wins over node arrival: the force model tends
            // to stall agents exactly on the exit line otherwise.
            if self.env.first_hit(prev, agent.pos, SegmentKind::Exit).is_some() {
                agent.outcome = Outcome::Escaped;
                escaped_now.push(agent.id);
                continue;
            }

            advance_route(
                agent,
                &self.graph,
                &self.field,
                self.env.exits(),
                self.config.arrival_radius,
            );
        }

        self.escape_order.extend(&escaped_now);
        self.tick += 1;
        Ok(escaped_now)
    }

    /// Run until every agent is terminal or the tick budget is spent.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        while self.tick < self.config.max_ticks && self.active_count() > 0 {
            let now = self.tick;
            observer.on_tick_start(now);
            let escaped = self.step()?;
            observer.on_tick_end(now, &escaped);
            if self.config.output_interval > 0 && now.is_multiple_of(self.config.output_interval)
            {
                observer.on_snapshot(now, &self.agents);
            }
        }
        observer.on_sim_end(self.tick);
        Ok(self.report())
    }

    /// Per-agent terminal states as of now.
    pub fn report(&self) -> RunReport {
        let by_outcome = |o: Outcome| {
            self.agents
                .iter()
                .filter(|a| a.outcome == o)
                .map(|a| a.id)
                .collect::<Vec<_>>()
        };
        RunReport {
            ticks:   self.tick,
            escaped: self.escape_order.clone(),
            failed:  by_outcome(Outcome::Failed),
            stalled: by_outcome(Outcome::Active),
        }
    }
}

// ── Route following ───────────────────────────────────────────────────────────

/// Apply the arrival policy after a dynamics step.
///
/// Agents whose `target_node` is [`NodeId::INVALID`] are in the final
/// straight-to-exit approach and need no graph bookkeeping.  Otherwise,
/// coming within `arrival_radius` of the target node consumes it: an exit
/// node hands over to its exit segment, an interior node hands over to the
/// unvisited neighbor with the most pheromone, and a dead end fails the
/// agent.
fn advance_route(
    agent:          &mut AgentState,
    graph:          &NavGraph,
    field:          &PheromoneField,
    exits:          &[Segment],
    arrival_radius: f32,
) {
    if agent.target_node == NodeId::INVALID {
        return;
    }
    let Some(node_pos) = graph.pos(agent.target_node) else {
        agent.outcome = Outcome::Failed;
        return;
    };
    if agent.pos.distance(node_pos) >= arrival_radius {
        return;
    }

    let reached = agent.target_node;
    agent.visited.insert(reached);

    if graph.is_exit(reached) {
        let segment = graph.exit_segment(reached).and_then(|i| exits.get(i));
        match segment {
            Some(seg) => {
                agent.target = Some(Target::Exit(*seg));
                agent.target_node = NodeId::INVALID;
            }
            None => agent.outcome = Outcome::Failed,
        }
        return;
    }

    match field.best_neighbor(graph, reached, &agent.visited) {
        Some(next) => match graph.pos(next) {
            Some(pos) => {
                agent.target_node = next;
                agent.target = Some(Target::Point(pos));
            }
            None => agent.outcome = Outcome::Failed,
        },
        None => agent.outcome = Outcome::Failed,
    }
}
