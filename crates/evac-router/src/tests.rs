//! Unit tests for evac-router.
//!
//! Convergence-accounting tests drive `run_iteration` directly with
//! explicit ant start nodes, so the arithmetic under test does not depend
//! on where the uniform start sampling happens to drop the ants.

use rustc_hash::FxHashSet;

use evac_core::{NodeId, SimRng, Vec2};
use evac_graph::NavGraph;

use crate::colony::{path_length, run_iteration, walk};
use crate::{AcoParams, PheromoneField, PheromoneRouter, RouterError};

/// Two nodes joined by a single edge of cost 2; node 1 is an exit.
fn single_edge_graph() -> NavGraph {
    let mut g = NavGraph::new();
    g.insert_node(NodeId(0), Vec2::new(0.0, 0.0));
    g.insert_node(NodeId(1), Vec2::new(2.0, 0.0));
    g.connect(NodeId(0), NodeId(1));
    g.mark_exit(NodeId(1), 0);
    g
}

/// A short and a long route from node 0 to the exit node 3:
/// direct edge 0–3 (cost 2) versus detour 0–1–2–3 (cost 10).
fn two_route_graph() -> NavGraph {
    let mut g = NavGraph::new();
    g.insert_node(NodeId(0), Vec2::new(0.0, 0.0));
    g.insert_node(NodeId(1), Vec2::new(0.0, 4.0));
    g.insert_node(NodeId(2), Vec2::new(2.0, 4.0));
    g.insert_node(NodeId(3), Vec2::new(2.0, 0.0));
    g.connect(NodeId(0), NodeId(1));
    g.connect(NodeId(1), NodeId(2));
    g.connect(NodeId(2), NodeId(3));
    g.connect(NodeId(0), NodeId(3));
    g.mark_exit(NodeId(3), 0);
    g
}

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AcoParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_ants() {
        let p = AcoParams { ants: 0, ..AcoParams::default() };
        assert!(matches!(p.validate(), Err(RouterError::BadColonySize { .. })));
    }

    #[test]
    fn rejects_out_of_range_evaporation() {
        let p = AcoParams { evaporation_rate: 1.5, ..AcoParams::default() };
        assert!(matches!(p.validate(), Err(RouterError::BadEvaporationRate(_))));
        assert!(PheromoneRouter::new(p).is_err());
    }
}

#[cfg(test)]
mod field {
    use super::*;

    #[test]
    fn uniform_covers_every_edge() {
        let g = two_route_graph();
        let f = PheromoneField::uniform(&g);
        assert_eq!(f.len(), 4);
        for (u, v, _) in g.edges() {
            assert_eq!(f.level(u, v), Some(PheromoneField::INITIAL_LEVEL));
            // Unordered key: both orientations read the same entry.
            assert_eq!(f.level(v, u), f.level(u, v));
        }
        assert_eq!(f.level(NodeId(1), NodeId(3)), None);
    }

    #[test]
    fn evaporation_floors_at_zero() {
        let g = single_edge_graph();
        let mut f = PheromoneField::uniform(&g);
        f.evaporate(1.0);
        assert_eq!(f.level(NodeId(0), NodeId(1)), Some(0.0));
        f.evaporate(0.5);
        assert_eq!(f.level(NodeId(0), NodeId(1)), Some(0.0));
    }

    #[test]
    fn deposit_on_non_edge_is_ignored() {
        let g = single_edge_graph();
        let mut f = PheromoneField::uniform(&g);
        f.deposit(NodeId(0), NodeId(7), 5.0);
        assert_eq!(f.len(), 1);
        assert_eq!(f.level(NodeId(0), NodeId(7)), None);
    }

    #[test]
    fn best_neighbor_is_greedy_with_low_id_ties() {
        let g = two_route_graph();
        let mut f = PheromoneField::uniform(&g);
        let visited = FxHashSet::default();

        // All levels equal: the tie resolves to the lower id.
        assert_eq!(f.best_neighbor(&g, NodeId(0), &visited), Some(NodeId(1)));

        f.deposit(NodeId(0), NodeId(3), 0.5);
        assert_eq!(f.best_neighbor(&g, NodeId(0), &visited), Some(NodeId(3)));

        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        seen.insert(NodeId(1));
        seen.insert(NodeId(3));
        assert_eq!(f.best_neighbor(&g, NodeId(0), &seen), None);
    }
}

#[cfg(test)]
mod convergence {
    use super::*;

    #[test]
    fn single_edge_accounting() {
        // One ant from node 0, one iteration, evaporation 0.7, cost 2:
        // level = (1 − 0.7) · 1.0 + 1/2.
        let g = single_edge_graph();
        let params = AcoParams { iterations: 1, ants: 1, ..AcoParams::default() };
        let mut f = PheromoneField::uniform(&g);
        let mut rng = SimRng::new(9);

        run_iteration(&g, &mut f, &[NodeId(0)], &params, &mut rng);

        let level = f.level(NodeId(0), NodeId(1)).unwrap();
        assert!((level - 0.8).abs() < 1e-6);
    }

    #[test]
    fn ant_spawned_on_exit_deposits_nothing() {
        let g = single_edge_graph();
        let params = AcoParams { iterations: 1, ants: 1, ..AcoParams::default() };
        let mut f = PheromoneField::uniform(&g);
        let mut rng = SimRng::new(9);

        run_iteration(&g, &mut f, &[NodeId(1)], &params, &mut rng);

        // Evaporation only.
        let level = f.level(NodeId(0), NodeId(1)).unwrap();
        assert!((level - 0.3).abs() < 1e-6);
    }

    #[test]
    fn reinforcement_is_additive() {
        let g = single_edge_graph();
        let params = AcoParams { iterations: 1, ants: 2, ..AcoParams::default() };
        let mut f = PheromoneField::uniform(&g);
        let mut rng = SimRng::new(9);

        run_iteration(&g, &mut f, &[NodeId(0), NodeId(0)], &params, &mut rng);

        let level = f.level(NodeId(0), NodeId(1)).unwrap();
        assert!((level - (0.3 + 2.0 * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn dead_ended_ant_is_discarded() {
        // No exit marked anywhere: every walk dead-ends.
        let mut g = NavGraph::new();
        g.insert_node(NodeId(0), Vec2::new(0.0, 0.0));
        g.insert_node(NodeId(1), Vec2::new(1.0, 0.0));
        g.connect(NodeId(0), NodeId(1));

        let params = AcoParams::default();
        let f = PheromoneField::uniform(&g);
        let mut rng = SimRng::new(4);

        assert!(walk(&g, &f, NodeId(0), &params, &mut rng).is_none());
    }

    #[test]
    fn walk_path_ends_on_exit() {
        let g = two_route_graph();
        let f = PheromoneField::uniform(&g);
        let params = AcoParams::default();
        let mut rng = SimRng::new(11);

        for _ in 0..20 {
            if let Some(path) = walk(&g, &f, NodeId(0), &params, &mut rng) {
                assert_eq!(path.first(), Some(&NodeId(0)));
                assert!(g.is_exit(*path.last().unwrap()));
                assert!(path_length(&g, &path) > 0.0);
            }
        }
    }

    #[test]
    fn levels_stay_non_negative() {
        let g = two_route_graph();
        let router = PheromoneRouter::new(AcoParams::default()).unwrap();
        let f = router.run(&g, &mut SimRng::new(21));
        for (u, v, _) in g.edges() {
            assert!(f.level(u, v).unwrap() >= 0.0);
        }
    }

    #[test]
    fn shorter_route_accumulates_more_pheromone() {
        let g = two_route_graph();
        let router = PheromoneRouter::new(AcoParams::default()).unwrap();
        let f = router.run(&g, &mut SimRng::new(5));

        let direct = f.level(NodeId(0), NodeId(3)).unwrap();
        let detour = f.level(NodeId(0), NodeId(1)).unwrap();
        assert!(direct > detour);
    }

    #[test]
    fn seeded_runs_are_identical() {
        use evac_core::SimRng;
        use evac_env::scenarios;
        use evac_graph::{Connectivity, GraphBuilder, GridBuilder};

        let env = scenarios::bottleneck();
        let g = GridBuilder::new(6, 6, Connectivity::Eight)
            .build(&env, &mut SimRng::new(1))
            .unwrap();

        let params = AcoParams { iterations: 10, ants: 10, ..AcoParams::default() };
        let router = PheromoneRouter::new(params).unwrap();
        let a = router.run(&g, &mut SimRng::new(77));
        let b = router.run(&g, &mut SimRng::new(77));

        for (u, v, _) in g.edges() {
            assert_eq!(a.level(u, v), b.level(u, v));
        }
    }

    #[test]
    fn empty_graph_converges_to_empty_field() {
        let g = NavGraph::new();
        let router = PheromoneRouter::new(AcoParams::default()).unwrap();
        let f = router.run(&g, &mut SimRng::new(1));
        assert!(f.is_empty());
    }
}
