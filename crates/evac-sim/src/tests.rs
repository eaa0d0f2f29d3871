//! Unit tests for evac-sim.

use evac_core::{AgentId, NodeId, Vec2};
use evac_dynamics::{AgentState, Outcome, Target};
use evac_env::scenarios;
use evac_graph::NavGraph;
use evac_router::PheromoneField;

use crate::{NoopObserver, SimConfig, SimError, SimObserver, SimulatorBuilder};

fn agent(id: u32, x: f32, y: f32) -> AgentState {
    AgentState::new(AgentId(id), Vec2::new(x, y), 0.3, 60.0, 3.0)
}

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_dt() {
        let cfg = SimConfig { dt: 0.0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let cfg = SimConfig { mass_range: (75.0, 45.0), ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(SimError::Config(_))));
    }
}

#[cfg(test)]
mod escape {
    use super::*;

    #[test]
    fn straight_run_to_the_exit() {
        // Empty 10×10 room, 2-unit exit on the right wall.  One agent at
        // (1, 5) at rest, aimed straight at the exit midpoint, must cross
        // within 200 ticks at dt = 0.05.
        let env = scenarios::empty_room();
        let mut a = agent(0, 1.0, 5.0);
        a.target = Some(Target::Point(Vec2::new(10.0, 5.0)));

        let cfg = SimConfig { num_agents: 1, max_ticks: 200, ..SimConfig::default() };
        let graph = NavGraph::new();
        let field = PheromoneField::uniform(&graph);
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field)
            .agents(vec![a])
            .build()
            .unwrap();

        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.escaped, vec![AgentId(0)]);
        assert!(report.is_complete());
        assert!(report.ticks <= 200);
        let a = sim.agent(AgentId(0)).unwrap();
        assert_eq!(a.outcome, Outcome::Escaped);
        assert!(a.pos.x > 9.5);
    }

    #[test]
    fn terminal_agents_stop_moving() {
        let env = scenarios::empty_room();
        let mut a = agent(0, 8.0, 5.0);
        a.target = Some(Target::Point(Vec2::new(10.0, 5.0)));

        let cfg = SimConfig { num_agents: 1, max_ticks: 500, ..SimConfig::default() };
        let graph = NavGraph::new();
        let field = PheromoneField::uniform(&graph);
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field)
            .agents(vec![a])
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let pos_after = sim.agent(AgentId(0)).unwrap().pos;
        // Further steps are no-ops for escaped agents.
        let escaped = sim.step().unwrap();
        assert!(escaped.is_empty());
        assert_eq!(sim.agent(AgentId(0)).unwrap().pos, pos_after);
    }
}

#[cfg(test)]
mod routing {
    use super::*;

    /// One interior node at (2, 5) wired to an exit node at (10, 5).
    fn two_node_route() -> NavGraph {
        let mut g = NavGraph::new();
        g.insert_node(NodeId(0), Vec2::new(2.0, 5.0));
        g.insert_node(NodeId(1), Vec2::new(10.0, 5.0));
        g.connect(NodeId(0), NodeId(1));
        g.mark_exit(NodeId(1), 0);
        g
    }

    #[test]
    fn node_arrival_hands_over_to_the_exit_segment() {
        let env = scenarios::empty_room();
        let graph = two_node_route();
        let field = PheromoneField::uniform(&graph);

        let mut a = agent(0, 1.8, 5.0);
        a.target_node = NodeId(0);
        a.target = Some(Target::Point(Vec2::new(2.0, 5.0)));

        let cfg = SimConfig { num_agents: 1, max_ticks: 500, ..SimConfig::default() };
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field)
            .agents(vec![a])
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.escaped, vec![AgentId(0)]);
        let a = sim.agent(AgentId(0)).unwrap();
        assert!(a.visited.contains(&NodeId(0)));
        assert!(a.visited.contains(&NodeId(1)));
        // Final approach ran node-less against the exit segment.
        assert_eq!(a.target_node, NodeId::INVALID);
    }

    #[test]
    fn dead_end_marks_the_agent_failed() {
        let env = scenarios::empty_room();
        let mut graph = NavGraph::new();
        graph.insert_node(NodeId(0), Vec2::new(2.0, 5.0));
        let field = PheromoneField::uniform(&graph);

        let mut a = agent(0, 1.8, 5.0);
        a.target_node = NodeId(0);
        a.target = Some(Target::Point(Vec2::new(2.0, 5.0)));

        let cfg = SimConfig { num_agents: 1, max_ticks: 100, ..SimConfig::default() };
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field)
            .agents(vec![a])
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.failed, vec![AgentId(0)]);
        assert!(report.escaped.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn missing_target_surfaces_as_an_error() {
        let env = scenarios::empty_room();
        let graph = NavGraph::new();
        let field = PheromoneField::uniform(&graph);

        // Active agent, no target: a caller bug that must fail loudly.
        let a = agent(0, 5.0, 5.0);
        let cfg = SimConfig { num_agents: 1, ..SimConfig::default() };
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field)
            .agents(vec![a])
            .build()
            .unwrap();

        assert!(matches!(sim.step(), Err(SimError::Dynamics(_))));
    }
}

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn unroutable_spawns_fail_without_aborting() {
        // Empty graph: nobody can be routed; the run completes with every
        // agent failed rather than erroring out.
        let env = scenarios::empty_room();
        let graph = NavGraph::new();
        let field = PheromoneField::uniform(&graph);

        let cfg = SimConfig { num_agents: 8, ..SimConfig::default() };
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field).build().unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.ticks, 0);
        assert_eq!(report.failed.len(), 8);
        assert!(report.escaped.is_empty());
    }

    #[test]
    fn seeded_spawns_are_reproducible() {
        let make = || {
            let env = scenarios::empty_room();
            let graph = NavGraph::new();
            let field = PheromoneField::uniform(&graph);
            let cfg = SimConfig { num_agents: 10, seed: 7, ..SimConfig::default() };
            SimulatorBuilder::new(cfg, env, graph, field).build().unwrap()
        };

        let a = make();
        let b = make();
        for (x, y) in a.agents.iter().zip(&b.agents) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.radius, y.radius);
        }
    }

    #[test]
    fn spawns_do_not_overlap() {
        let env = scenarios::bottleneck();
        let graph = NavGraph::new();
        let field = PheromoneField::uniform(&graph);
        let cfg = SimConfig { num_agents: 20, ..SimConfig::default() };
        let sim = SimulatorBuilder::new(cfg, env, graph, field).build().unwrap();

        for (i, a) in sim.agents.iter().enumerate() {
            for b in &sim.agents[i + 1..] {
                assert!(a.pos.distance(b.pos) > a.radius + b.radius);
            }
        }
    }
}

#[cfg(test)]
mod pipeline {
    use super::*;
    use evac_core::SimRng;
    use evac_graph::{Connectivity, GraphBuilder, GridBuilder};
    use evac_router::{AcoParams, PheromoneRouter};

    struct CountingObserver {
        starts:    u64,
        ends:      u64,
        snapshots: u64,
        finished:  bool,
    }

    impl SimObserver for CountingObserver {
        fn on_tick_start(&mut self, _tick: u64) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _tick: u64, _escaped: &[AgentId]) {
            self.ends += 1;
        }
        fn on_snapshot(&mut self, _tick: u64, _agents: &[AgentState]) {
            self.snapshots += 1;
        }
        fn on_sim_end(&mut self, _final_tick: u64) {
            self.finished = true;
        }
    }

    #[test]
    fn full_run_partitions_every_agent() {
        let env = scenarios::empty_room();
        let mut rng = SimRng::new(42);
        let graph = GridBuilder::new(8, 8, Connectivity::Eight)
            .build(&env, &mut rng.child(0))
            .unwrap();
        let field = PheromoneRouter::new(AcoParams::default())
            .unwrap()
            .run(&graph, &mut rng.child(1));

        let cfg = SimConfig {
            num_agents:      5,
            max_ticks:       4_000,
            output_interval: 10,
            ..SimConfig::default()
        };
        let mut sim = SimulatorBuilder::new(cfg, env, graph, field).build().unwrap();

        let mut obs = CountingObserver { starts: 0, ends: 0, snapshots: 0, finished: false };
        let report = sim.run(&mut obs).unwrap();

        assert_eq!(
            report.escaped.len() + report.failed.len() + report.stalled.len(),
            5
        );
        assert!(!report.escaped.is_empty());

        assert_eq!(obs.starts, report.ticks);
        assert_eq!(obs.ends, report.ticks);
        assert!(obs.finished);
        assert!(obs.snapshots > 0);
    }
}
