//! bottleneck — smallest end-to-end demo of the rust_evac framework.
//!
//! Evacuates 30 agents from a 10×10 room split by a dividing wall with a
//! 2-unit gap, one exit on the right wall.  The full pipeline runs:
//! grid graph → pheromone convergence → social-force evacuation, with CSV
//! output written to `./output/`.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use evac_core::SimRng;
use evac_env::scenarios;
use evac_graph::{Connectivity, GraphBuilder, GridBuilder};
use evac_output::{CsvWriter, SimOutputObserver};
use evac_router::{AcoParams, PheromoneRouter};
use evac_sim::{SimConfig, SimulatorBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:     usize = 30;
const SEED:            u64   = 42;
const GRID_ROWS:       usize = 12;
const GRID_COLS:       usize = 12;
const MAX_TICKS:       u64   = 20_000;
const OUTPUT_INTERVAL: u64   = 10;

// RNG child streams, one per stochastic phase.
const GRAPH_STREAM:  u64 = 0;
const ROUTER_STREAM: u64 = 1;

fn main() -> Result<()> {
    println!("=== bottleneck — rust_evac evacuation demo ===");
    println!("Agents: {AGENT_COUNT}  |  Grid: {GRID_ROWS}x{GRID_COLS}  |  Seed: {SEED}");
    println!();

    let mut rng = SimRng::new(SEED);

    // 1. Floor plan.
    let env = scenarios::bottleneck();

    // 2. Navigation graph.
    let graph = GridBuilder::new(GRID_ROWS, GRID_COLS, Connectivity::Eight)
        .build(&env, &mut rng.child(GRAPH_STREAM))?;
    println!(
        "Graph: {} nodes ({} exit), {} edges",
        graph.node_count(),
        graph.exit_count(),
        graph.edge_count()
    );

    // 3. Pheromone convergence.
    let aco = AcoParams::default();
    let started = Instant::now();
    let field = PheromoneRouter::new(aco)?.run(&graph, &mut rng.child(ROUTER_STREAM));
    println!(
        "Pheromone field: {} edges trained in {:.1?} ({} iterations x {} ants)",
        field.len(),
        started.elapsed(),
        aco.iterations,
        aco.ants
    );

    // 4. Simulation.
    let config = SimConfig {
        num_agents:      AGENT_COUNT,
        seed:            SEED,
        max_ticks:       MAX_TICKS,
        output_interval: OUTPUT_INTERVAL,
        ..SimConfig::default()
    };

    let out_dir = Path::new("./output");
    std::fs::create_dir_all(out_dir)?;
    let writer = CsvWriter::new(out_dir)?;
    let mut observer = SimOutputObserver::new(writer, &config);

    let mut sim = SimulatorBuilder::new(config.clone(), env, graph, field).build()?;

    let started = Instant::now();
    let report = sim.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!();
    println!(
        "Run: {} ticks ({:.1} sim-seconds) in {:.1?}",
        report.ticks,
        report.ticks as f64 * config.dt as f64,
        started.elapsed()
    );
    println!(
        "Outcome: {} escaped, {} failed, {} still inside",
        report.escaped.len(),
        report.failed.len(),
        report.stalled.len()
    );
    println!("CSV output written to {}", out_dir.display());

    Ok(())
}
