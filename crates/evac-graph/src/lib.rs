//! `evac-graph` — navigation graph construction over floor-plan geometry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`graph`]   | `Node`, `NavGraph` — undirected weighted adjacency        |
//! | [`grid`]    | `GridBuilder` — one node per free cell centre             |
//! | [`roadmap`] | `RoadmapBuilder` — random sampling + k-nearest linking    |
//! | [`builder`] | `GraphBuilder` trait, `ExitWiring`, exit-node attachment  |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                            |
//!
//! # Edge invariants
//!
//! Both builders uphold the same contract: every kept edge is symmetric,
//! costs exactly the Euclidean distance between its endpoints, and its
//! straight segment crosses no wall.  Exit nodes are appended after the
//! ordinary nodes and wired to every node within a threshold radius that
//! has an unobstructed line of sight.
//!
//! A floor with no free space yields an empty graph — that is a reportable
//! condition for the caller (`NavGraph::is_empty`), never an error here.

pub mod builder;
pub mod error;
pub mod graph;
pub mod grid;
pub mod roadmap;


pub use builder::{ExitWiring, GraphBuilder};
pub use error::{GraphError, GraphResult};
pub use graph::{NavGraph, Node};
pub use grid::{Connectivity, GridBuilder};
pub use roadmap::RoadmapBuilder;
