//! Router-subsystem error type.

use thiserror::Error;

/// Errors produced by `evac-router`.  All of them are parameter-validation
/// failures; the convergence loop itself cannot fail (dead-ended ants are
/// discarded, an empty graph converges to an empty field).
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("need at least one ant and one iteration, got ants={ants}, iterations={iterations}")]
    BadColonySize { ants: usize, iterations: usize },

    #[error("alpha and beta must be non-negative, got alpha={alpha}, beta={beta}")]
    BadExponents { alpha: f32, beta: f32 },

    #[error("evaporation rate must lie in [0, 1], got {0}")]
    BadEvaporationRate(f32),
}

pub type RouterResult<T> = Result<T, RouterError>;
