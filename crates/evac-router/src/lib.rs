//! `evac-router` — ant-colony pheromone route planner.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`field`]  | `EdgeKey`, `PheromoneField` — per-edge pheromone levels  |
//! | [`colony`] | `AcoParams`, `PheromoneRouter` — the convergence loop    |
//! | [`error`]  | `RouterError`, `RouterResult<T>`                         |
//!
//! # Two-phase contract
//!
//! Stochastic path sampling happens only inside [`PheromoneRouter::run`],
//! before any agent moves.  The returned [`PheromoneField`] is read-only
//! thereafter; the simulator consults it purely through the greedy
//! [`PheromoneField::best_neighbor`] lookup.

pub mod colony;
pub mod error;
pub mod field;

#[cfg(test)]
mod tests;

pub use colony::{AcoParams, PheromoneRouter};
pub use error::{RouterError, RouterResult};
pub use field::{EdgeKey, PheromoneField};
