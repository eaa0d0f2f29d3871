//! `evac-dynamics` — continuous pedestrian motion under the social-force
//! model.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`agent`]  | `AgentState`, `AgentSnapshot`, `Target`, `Outcome`        |
//! | [`forces`] | `ForceParams` and the driving/repulsion force terms       |
//! | [`engine`] | `MovementModel` trait, `SocialForceModel` implementation  |
//! | [`error`]  | `DynamicsError`, `DynamicsResult<T>`                      |
//!
//! # Snapshot discipline
//!
//! All neighbor repulsion within one tick reads pre-tick
//! [`AgentSnapshot`]s, never live agent state, so the result is identical
//! no matter what order agents are stepped in.

pub mod agent;
pub mod engine;
pub mod error;
pub mod forces;

#[cfg(test)]
mod tests;

pub use agent::{AgentSnapshot, AgentState, Outcome, Target};
pub use engine::{MovementModel, SocialForceModel};
pub use error::{DynamicsError, DynamicsResult};
pub use forces::ForceParams;
