//! Shared helpers for CLI commands.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qss_adapter_sim::SimulatorBackend;
use qss_core::{QuantumSubsetSum, SolutionCandidate, SolverConfig};
use qss_hal::{BackendConfig, BackendFactory};

use crate::ProblemArgs;

/// Build the statevector simulator, seeded when `seed` is given.
pub fn simulator(seed: Option<u64>) -> Result<SimulatorBackend> {
    let mut config = BackendConfig::new("simulator");
    if let Some(seed) = seed {
        config = config.with_extra("seed", serde_json::json!(seed));
    }
    SimulatorBackend::from_config(config).context("Failed to create simulator backend")
}

/// Load a solver configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&str>) -> Result<SolverConfig> {
    match path {
        Some(path) => SolverConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration: {path}")),
        None => Ok(SolverConfig::default()),
    }
}

/// Create a solver for the command-line problem.
pub fn solver(problem: &ProblemArgs, config: SolverConfig) -> Result<QuantumSubsetSum> {
    Ok(QuantumSubsetSum::with_config(
        problem.values.clone(),
        problem.target,
        config,
    )?)
}

/// A steady-ticking spinner with `message`.
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Print solution candidates in a table format.
pub fn print_candidates(candidates: &[SolutionCandidate], shots: u64) {
    if candidates.is_empty() {
        println!(
            "\n{} No subset reaches the target ({} shots)",
            style("✗").yellow().bold(),
            shots
        );
        return;
    }

    println!(
        "\n{} {} solution(s) ({} shots):",
        style("✓").green().bold(),
        candidates.len(),
        shots
    );

    for candidate in candidates {
        let prob = candidate.probability * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}  {:<24} {:>6} ({:>5.2}%) {}",
            style(&candidate.bitstring).cyan(),
            format!("{:?}", candidate.subset),
            candidate.count,
            prob,
            style(bar).green()
        );
    }
}
