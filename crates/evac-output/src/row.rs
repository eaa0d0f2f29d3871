//! Plain data row types written by output backends.

use evac_dynamics::Outcome;

/// A snapshot of one agent's kinematic state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        f32,
    pub y:        f32,
    pub speed:    f32,
    pub outcome:  Outcome,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick: u64,
    /// Simulated seconds elapsed at the end of this tick.
    pub time_secs: f64,
    /// Agents that crossed an exit during this tick.
    pub escaped_this_tick: u64,
    /// Cumulative escape count including this tick.
    pub escaped_total: u64,
}

/// Stable text label for an outcome column.
pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Active => "active",
        Outcome::Escaped => "escaped",
        Outcome::Failed => "failed",
    }
}
