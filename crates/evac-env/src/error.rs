//! Environment error type.

use thiserror::Error;

/// Errors produced when constructing a floor plan.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("floor dimensions must be positive, got {width} x {height}")]
    BadDimensions { width: f32, height: f32 },

    #[error("exit {0} is degenerate (zero length)")]
    DegenerateExit(usize),

    #[error("floor plan has no exits")]
    NoExits,

    #[error("no free position found after {0} rejection-sampling attempts")]
    NoFreePosition(usize),
}

pub type EnvResult<T> = Result<T, EnvError>;
