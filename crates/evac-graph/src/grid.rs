//! Uniform-grid graph builder.

use evac_core::{NodeId, SimRng, Vec2};
use evac_env::{Environment, SegmentKind};

use crate::builder::{attach_exit_nodes, ExitWiring, GraphBuilder};
use crate::graph::NavGraph;
use crate::{GraphError, GraphResult};

// ── Connectivity ──────────────────────────────────────────────────────────────

/// Which cell neighbours get candidate edges.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Connectivity {
    /// Orthogonal neighbours only.
    Four,
    /// Orthogonal plus diagonal neighbours.
    Eight,
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Lays one candidate node per cell centre of a `rows x cols` grid inset by
/// `border` from the floor edges, keeping only free cells.
///
/// Node ids encode the cell: `id = row * cols + col`.  Blocked cells leave
/// a hole in the id space rather than renumbering, so neighbour lookup
/// stays arithmetic.  Exit node ids start at `rows * cols`.
#[derive(Copy, Clone, Debug)]
pub struct GridBuilder {
    pub rows:         usize,
    pub cols:         usize,
    pub connectivity: Connectivity,
    /// Margin kept clear along the floor edges when laying out cells.
    pub border: f32,
    pub wiring: ExitWiring,
}

impl GridBuilder {
    pub const DEFAULT_BORDER: f32 = 0.5;

    pub fn new(rows: usize, cols: usize, connectivity: Connectivity) -> Self {
        Self {
            rows,
            cols,
            connectivity,
            border: Self::DEFAULT_BORDER,
            wiring: ExitWiring::default(),
        }
    }

    pub fn with_wiring(mut self, wiring: ExitWiring) -> Self {
        self.wiring = wiring;
        self
    }

    fn validate(&self) -> GraphResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GraphError::BadGridDimensions { rows: self.rows, cols: self.cols });
        }
        self.wiring.validate()
    }

    fn cell_id(&self, row: usize, col: usize) -> NodeId {
        NodeId((row * self.cols + col) as u32)
    }

    /// In-grid neighbour cells of `(row, col)` under the configured
    /// connectivity.
    fn neighbor_cells(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut deltas: Vec<(isize, isize)> = vec![(0, 1), (0, -1), (-1, 0), (1, 0)];
        if self.connectivity == Connectivity::Eight {
            deltas.extend([(-1, 1), (-1, -1), (1, 1), (1, -1)]);
        }
        deltas
            .into_iter()
            .filter_map(|(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                (r < self.rows && c < self.cols).then_some((r, c))
            })
            .collect()
    }
}

impl GraphBuilder for GridBuilder {
    fn build(&self, env: &dyn Environment, _rng: &mut SimRng) -> GraphResult<NavGraph> {
        self.validate()?;

        let (width, height) = env.bounds();
        let cell_w = (width - 2.0 * self.border) / self.cols as f32;
        let cell_h = (height - 2.0 * self.border) / self.rows as f32;

        let mut graph = NavGraph::new();

        // Row-major insertion keeps ids ascending.
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Vec2::new(
                    self.border + cell_w / 2.0 + col as f32 * cell_w,
                    self.border + cell_h / 2.0 + row as f32 * cell_h,
                );
                if env.is_free(pos) {
                    graph.insert_node(self.cell_id(row, col), pos);
                }
            }
        }

        for row in 0..self.rows {
            for col in 0..self.cols {
                let id = self.cell_id(row, col);
                let Some(pos) = graph.pos(id) else { continue };
                for (r, c) in self.neighbor_cells(row, col) {
                    let other = self.cell_id(r, c);
                    let Some(other_pos) = graph.pos(other) else { continue };
                    if env.first_hit(pos, other_pos, SegmentKind::Wall).is_none() {
                        graph.connect(id, other);
                    }
                }
            }
        }

        let first_exit_id = (self.rows * self.cols) as u32;
        attach_exit_nodes(&mut graph, env, &self.wiring, first_exit_id);
        Ok(graph)
    }
}
