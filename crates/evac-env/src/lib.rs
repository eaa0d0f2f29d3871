//! `evac-env` — floor-plan geometry and environment queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`floorplan`] | `Environment` trait, `FloorPlan`, `SegmentKind`       |
//! | [`scenarios`] | Canned 10×10 benchmark rooms                          |
//! | [`error`]     | `EnvError`, `EnvResult<T>`                            |
//!
//! The rest of the framework is a pure consumer of the [`Environment`]
//! trait: graph builders ask for wall-crossing tests and free-position
//! checks, the dynamics engine asks for wall segments, and the simulator
//! asks for exit crossings.  Nothing outside this crate stores geometry.

pub mod error;
pub mod floorplan;
pub mod scenarios;


pub use error::{EnvError, EnvResult};
pub use floorplan::{Environment, FloorPlan, SegmentKind};
