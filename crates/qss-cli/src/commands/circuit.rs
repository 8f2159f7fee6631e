//! Circuit command implementation.

use std::collections::BTreeMap;

use anyhow::Result;
use console::style;
use serde::Serialize;

use qss_core::{RegisterLayout, SolverConfig};

use super::common::solver;
use crate::{OutputFormat, ProblemArgs};

#[derive(Serialize)]
struct CircuitReport<'a> {
    layout: &'a RegisterLayout,
    num_qubits: usize,
    num_clbits: usize,
    grover_iterations: usize,
    depth: usize,
    num_ops: usize,
    gates: BTreeMap<String, usize>,
    blocks: BTreeMap<String, usize>,
}

/// Execute the circuit command.
pub fn execute(
    problem: &ProblemArgs,
    iterations: Option<usize>,
    no_range_check: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = SolverConfig {
        grover_iterations: iterations,
        check_register_range: !no_range_check,
        ..SolverConfig::default()
    };
    let solver = solver(problem, config)?;
    let circuit = solver.build()?;
    let layout = solver.layout();

    let report = CircuitReport {
        layout,
        num_qubits: circuit.num_qubits(),
        num_clbits: circuit.num_clbits(),
        grover_iterations: solver.grover_iterations(),
        depth: circuit.depth(),
        num_ops: circuit.num_ops(),
        gates: circuit.op_counts(),
        blocks: circuit.label_counts(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &CircuitReport<'_>) {
    let layout = report.layout;
    let span = |qubits: &[qss_ir::QubitId]| match (qubits.first(), qubits.last()) {
        (Some(first), Some(last)) => format!("q[{}..={}]", first.0, last.0),
        _ => "-".to_string(),
    };

    println!("{} Register layout", style("→").cyan().bold());
    println!("  sum      {}", span(layout.sums()));
    println!("  index    {}", span(layout.indices()));
    println!("  marker   q[{}]", layout.marker().0);
    println!("  flag     q[{}]", layout.flag().0);
    println!("  marks    c[0..{}]", layout.num_clbits());

    println!(
        "\n{} {} qubits, {} clbits, {} ops, depth {}, {} round(s)",
        style("✓").green().bold(),
        report.num_qubits,
        report.num_clbits,
        style(report.num_ops).yellow(),
        style(report.depth).yellow(),
        report.grover_iterations
    );

    println!("\n  Gates:");
    for (name, count) in &report.gates {
        println!("    {:<10} {:>8}", style(name).cyan(), count);
    }

    println!("\n  Blocks:");
    for (label, count) in &report.blocks {
        let label = if label.is_empty() { "(none)" } else { label };
        println!("    {:<10} {:>8}", style(label).cyan(), count);
    }
}
