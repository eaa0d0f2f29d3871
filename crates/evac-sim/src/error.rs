//! Simulation-level error type.

use evac_dynamics::DynamicsError;
use evac_env::EnvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    #[error("dynamics error: {0}")]
    Dynamics(#[from] DynamicsError),
}

pub type SimResult<T> = Result<T, SimError>;
