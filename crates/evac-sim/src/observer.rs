//! Simulation observer trait for progress reporting and data collection.

use evac_core::AgentId;
use evac_dynamics::AgentState;

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: u64, escaped: &[AgentId]) {
///         if !escaped.is_empty() {
///             println!("tick {tick}: {} agents out", escaped.len());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent moves.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called at the end of each tick with the ids that escaped during it.
    fn on_tick_end(&mut self, _tick: u64, _escaped: &[AgentId]) {}

    /// Called every `config.output_interval` ticks (never when the
    /// interval is 0) with read-only access to the full agent collection,
    /// terminal agents included.
    fn on_snapshot(&mut self, _tick: u64, _agents: &[AgentState]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
