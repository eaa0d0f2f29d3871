//! `evac-output` — simulation output writers for the rust_evac framework.
//!
//! The CSV backend creates two files in the configured directory:
//!
//! | File                  | Written on     | Contents                         |
//! |-----------------------|----------------|----------------------------------|
//! | `agent_snapshots.csv` | snapshot ticks | per-agent position/speed/outcome |
//! | `tick_summaries.csv`  | every tick     | per-tick escape counts           |
//!
//! The backend implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `evac_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use evac_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
