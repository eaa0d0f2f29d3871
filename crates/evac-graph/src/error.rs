//! Graph-subsystem error type.

use thiserror::Error;

/// Errors produced by `evac-graph`.
///
/// Note that an environment with no navigable space is *not* an error: the
/// builders return an empty [`NavGraph`](crate::NavGraph) and downstream
/// code treats unroutable agents as failed.  Only invalid parameters reach
/// this enum.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("grid dimensions must be positive, got {rows} x {cols}")]
    BadGridDimensions { rows: usize, cols: usize },

    #[error("roadmap needs at least one sample and one neighbour, got samples={samples}, neighbors={neighbors}")]
    BadRoadmapParams { samples: usize, neighbors: usize },

    #[error("exit wiring threshold and spacing must be positive")]
    BadExitWiring,
}

pub type GraphResult<T> = Result<T, GraphError>;
