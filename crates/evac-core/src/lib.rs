//! `evac-core` — foundational types for the `rust_evac` evacuation framework.
//!
//! This crate is a dependency of every other `evac-*` crate.  It intentionally
//! has no `evac-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `AgentId`, `NodeId`                               |
//! | [`geom`]    | `Vec2`, `Segment`, intersection/projection tests  |
//! | [`rng`]     | `SimRng` (seeded, child-derivable)                |
//! | [`error`]   | `EvacError`, `EvacResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EvacError, EvacResult};
pub use geom::{Segment, Vec2, GEOM_EPS};
pub use ids::{AgentId, NodeId};
pub use rng::SimRng;
