//! `evac-sim` — tick loop orchestrator for the rust_evac framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.max_ticks (or until no agent is active):
//!   ① Snapshot — copy every active agent's position/velocity/radius.
//!   ② Step     — run the movement model per active agent against the
//!                shared snapshot (ascending AgentId order).
//!   ③ Exits    — if the travelled segment crossed an exit segment, the
//!                agent escapes immediately.
//!   ④ Routing  — on arrival at the target node: mark it visited, pick
//!                the unvisited neighbor with the most pheromone (greedy,
//!                ties to the lower id); a node-less agent heads straight
//!                for its exit segment; no candidate left means failed.
//! ```
//!
//! The pheromone field is read-only here; all of its training happened in
//! `evac-router` before the first tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use evac_core::SimRng;
//! use evac_env::scenarios;
//! use evac_graph::{Connectivity, GraphBuilder, GridBuilder};
//! use evac_router::{AcoParams, PheromoneRouter};
//! use evac_sim::{NoopObserver, SimConfig, SimulatorBuilder};
//!
//! let env = scenarios::bottleneck();
//! let mut rng = SimRng::new(42);
//! let graph = GridBuilder::new(12, 12, Connectivity::Eight)
//!     .build(&env, &mut rng.child(0))?;
//! let field = PheromoneRouter::new(AcoParams::default())?
//!     .run(&graph, &mut rng.child(1));
//! let mut sim = SimulatorBuilder::new(SimConfig::default(), env, graph, field).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimulatorBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunReport, Simulator};
