//! Counts command implementation.

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use qss_core::SolverConfig;

use super::common::{simulator, solver};
use crate::ProblemArgs;

/// Execute the counts command.
///
/// Runs the solver and prints the raw counts it recorded, so the
/// output reflects exactly what `solve` would decode.
pub async fn execute(
    problem: &ProblemArgs,
    shots: u32,
    seed: Option<u64>,
    iterations: Option<usize>,
) -> Result<()> {
    let config = SolverConfig {
        shots,
        grover_iterations: iterations,
        ..SolverConfig::default()
    };
    let mut solver = solver(problem, config)?;
    let backend = simulator(seed)?;
    solver.execute(&backend).await?;

    let recorded = solver
        .get_measurement_counts()
        .context("Solver finished without recording counts")?;
    let counts: Map<String, Value> = recorded
        .iter()
        .map(|(bits, &count)| (bits.clone(), json!(count)))
        .collect();

    let output = json!({
        "shots": recorded.total_shots(),
        "seed": seed,
        "grover_iterations": solver.grover_iterations(),
        "counts": counts,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
