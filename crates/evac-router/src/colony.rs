//! The ant-colony convergence loop.
//!
//! Each iteration releases a batch of ants at uniformly random nodes.  An
//! ant walks by stochastic next-hop sampling until it reaches an exit node
//! (success) or runs out of unvisited neighbors (discarded).  After the
//! batch, every pheromone level evaporates and each successful path
//! deposits `1 / path_length` on every edge it traversed.

use rustc_hash::FxHashSet;

use evac_core::{NodeId, SimRng};
use evac_graph::NavGraph;

use crate::field::PheromoneField;
use crate::{RouterError, RouterResult};

// ── AcoParams ─────────────────────────────────────────────────────────────────

/// Tuning knobs of the convergence loop.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoParams {
    /// Number of evaporate-and-reinforce rounds.
    pub iterations: usize,
    /// Ants released per iteration.
    pub ants: usize,
    /// Pheromone exponent in the next-hop weight.
    pub alpha: f32,
    /// Heuristic (inverse-cost) exponent in the next-hop weight.
    pub beta: f32,
    /// Fraction of pheromone lost per iteration, in `[0, 1]`.
    pub evaporation_rate: f32,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            iterations:       100,
            ants:             50,
            alpha:            2.0,
            beta:             1.0,
            evaporation_rate: 0.7,
        }
    }
}

impl AcoParams {
    pub fn validate(&self) -> RouterResult<()> {
        if self.ants == 0 || self.iterations == 0 {
            return Err(RouterError::BadColonySize {
                ants:       self.ants,
                iterations: self.iterations,
            });
        }
        if self.alpha < 0.0 || self.beta < 0.0 {
            return Err(RouterError::BadExponents { alpha: self.alpha, beta: self.beta });
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(RouterError::BadEvaporationRate(self.evaporation_rate));
        }
        Ok(())
    }
}

// ── PheromoneRouter ───────────────────────────────────────────────────────────

/// Offline pheromone-field trainer.
///
/// This is the only writer the field ever has; once [`run`] returns, the
/// field is consumed read-only by the simulator's greedy next-hop lookups.
///
/// [`run`]: PheromoneRouter::run
#[derive(Copy, Clone, Debug)]
pub struct PheromoneRouter {
    params: AcoParams,
}

impl PheromoneRouter {
    pub fn new(params: AcoParams) -> RouterResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &AcoParams {
        &self.params
    }

    /// Run the full convergence loop over `graph`.
    ///
    /// An empty graph yields an empty field immediately.  The same seed
    /// against the same graph reproduces the field exactly.
    pub fn run(&self, graph: &NavGraph, rng: &mut SimRng) -> PheromoneField {
        let mut field = PheromoneField::uniform(graph);
        if graph.is_empty() {
            return field;
        }

        for _ in 0..self.params.iterations {
            let starts: Vec<NodeId> = (0..self.params.ants)
                .filter_map(|_| rng.choose(graph.ids()).copied())
                .collect();
            run_iteration(graph, &mut field, &starts, &self.params, rng);
        }
        field
    }
}

// ── Iteration internals ───────────────────────────────────────────────────────

/// One evaporate-and-reinforce round with explicit ant start nodes.
pub(crate) fn run_iteration(
    graph:  &NavGraph,
    field:  &mut PheromoneField,
    starts: &[NodeId],
    params: &AcoParams,
    rng:    &mut SimRng,
) {
    let mut successful: Vec<(Vec<NodeId>, f32)> = Vec::new();
    for &start in starts {
        if let Some(path) = walk(graph, field, start, params, rng) {
            let length = path_length(graph, &path);
            successful.push((path, length));
        }
    }

    field.evaporate(params.evaporation_rate);

    for (path, length) in &successful {
        // An ant spawned directly on an exit node has a zero-length path
        // and nothing to reinforce.
        if *length <= 0.0 {
            continue;
        }
        let amount = 1.0 / length;
        for pair in path.windows(2) {
            field.deposit(pair[0], pair[1], amount);
        }
    }
}

/// One ant's walk from `start`.
///
/// Returns the node sequence ending on an exit node, or `None` when the
/// ant dead-ends with no unvisited neighbor left.
pub(crate) fn walk(
    graph:  &NavGraph,
    field:  &PheromoneField,
    start:  NodeId,
    params: &AcoParams,
    rng:    &mut SimRng,
) -> Option<Vec<NodeId>> {
    let mut path = vec![start];
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    visited.insert(start);
    let mut current = start;

    loop {
        if graph.is_exit(current) {
            return Some(path);
        }

        let neighbors = graph.neighbors(current);
        let mut weights = Vec::with_capacity(neighbors.len());
        let mut total = 0.0_f32;
        for &(neighbor, cost) in &neighbors {
            let w = if visited.contains(&neighbor) {
                0.0
            } else {
                let tau = field.level(current, neighbor).unwrap_or(0.0).powf(params.alpha);
                let eta = (1.0 / cost).powf(params.beta);
                tau * eta
            };
            total += w;
            weights.push(w);
        }
        if total <= 0.0 {
            return None;
        }

        let next = sample_weighted(&neighbors, &weights, total, rng)?;
        path.push(next);
        visited.insert(next);
        current = next;
    }
}

/// Cumulative-sum sampling over the positive entries of `weights`.
///
/// The fallback to the last positive-weight neighbor covers the case where
/// rounding makes the accumulated sum come up short of `r`.
fn sample_weighted(
    neighbors: &[(NodeId, f32)],
    weights:   &[f32],
    total:     f32,
    rng:       &mut SimRng,
) -> Option<NodeId> {
    let r: f32 = rng.gen_range(0.0..total);
    let mut acc = 0.0_f32;
    for (&(neighbor, _), &w) in neighbors.iter().zip(weights) {
        if w <= 0.0 {
            continue;
        }
        acc += w;
        if r < acc {
            return Some(neighbor);
        }
    }
    neighbors
        .iter()
        .zip(weights)
        .rev()
        .find(|&(_, &w)| w > 0.0)
        .map(|(&(neighbor, _), _)| neighbor)
}

/// Sum of edge costs along `path`.
pub(crate) fn path_length(graph: &NavGraph, path: &[NodeId]) -> f32 {
    path.windows(2)
        .filter_map(|pair| graph.edge_cost(pair[0], pair[1]))
        .sum()
}
