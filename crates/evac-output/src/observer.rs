//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use evac_core::AgentId;
use evac_dynamics::AgentState;
use evac_sim::{SimConfig, SimObserver};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes agent snapshots and tick summaries to an
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    dt:            f32,
    escaped_total: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`; `config.dt` converts ticks
    /// to simulated seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            dt:            config.dt,
            escaped_total: 0,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: u64, escaped: &[AgentId]) {
        self.escaped_total += escaped.len() as u64;
        let row = TickSummaryRow {
            tick,
            time_secs: (tick + 1) as f64 * self.dt as f64,
            escaped_this_tick: escaped.len() as u64,
            escaped_total: self.escaped_total,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: u64, agents: &[AgentState]) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow {
                agent_id: a.id.0,
                tick,
                x: a.pos.x,
                y: a.pos.y,
                speed: a.speed(),
                outcome: a.outcome,
            })
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
