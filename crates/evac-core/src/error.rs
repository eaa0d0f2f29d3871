//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `EvacError` via `From` impls or wrap it as one variant.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, NodeId};

/// The top-level error type for `evac-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvacError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `evac-*` crates.
pub type EvacResult<T> = Result<T, EvacError>;
