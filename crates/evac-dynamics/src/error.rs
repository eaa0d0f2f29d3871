//! Dynamics-subsystem error type.

use evac_core::AgentId;
use thiserror::Error;

/// Errors produced by `evac-dynamics`.
#[derive(Debug, Error)]
pub enum DynamicsError {
    /// An agent entered a dynamics step without a target.  This is a
    /// caller bug, not a simulation outcome, so it fails loudly instead of
    /// quietly marking the agent failed.
    #[error("agent {0} has no target assigned")]
    MissingTarget(AgentId),
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;
