//! Solve command implementation.

use std::collections::BTreeSet;

use anyhow::Result;
use console::style;
use serde::Serialize;

use qss_core::{DecodeMode, SolutionCandidate, SolverConfig};
use qss_hal::Backend;

use super::common::{load_config, print_candidates, simulator, solver, spinner};
use crate::{OutputFormat, ProblemArgs};

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub shots: Option<u32>,
    pub iterations: Option<usize>,
    pub exhaustive: bool,
    pub min_probability: Option<f64>,
    pub no_range_check: bool,
}

impl Overrides {
    /// Apply the overrides onto `config` and revalidate it.
    pub fn apply(&self, mut config: SolverConfig) -> Result<SolverConfig> {
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(iterations) = self.iterations {
            config.grover_iterations = Some(iterations);
        }
        if self.exhaustive {
            config.decode.mode = DecodeMode::Exhaustive;
        }
        if let Some(p) = self.min_probability {
            config.decode.min_probability = p;
        }
        if self.no_range_check {
            config.check_register_range = false;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct SolveReport<'a> {
    values: &'a [i64],
    target: i64,
    shots: u64,
    grover_iterations: usize,
    solutions: &'a [SolutionCandidate],
    #[serde(skip_serializing_if = "Option::is_none")]
    classical_solutions: Option<Vec<Vec<i64>>>,
}

/// Execute the solve command.
pub async fn execute(
    problem: &ProblemArgs,
    config_path: Option<&str>,
    overrides: Overrides,
    seed: Option<u64>,
    format: OutputFormat,
    verify: bool,
) -> Result<()> {
    let config = overrides.apply(load_config(config_path)?)?;
    let mut solver = solver(problem, config)?;
    let backend = simulator(seed)?;

    if format == OutputFormat::Table {
        let layout = solver.layout();
        println!(
            "{} Solving {:?} → {} on {} ({} qubits, {} rounds)",
            style("→").cyan().bold(),
            problem.values,
            style(problem.target).green(),
            style(backend.name()).yellow(),
            layout.num_qubits(),
            solver.grover_iterations()
        );
    }

    let progress = spinner("Simulating circuit...")?;
    let outcome = solver.execute(&backend).await;
    progress.finish_and_clear();
    let candidates = outcome?;

    let shots = solver
        .get_measurement_counts()
        .map_or(0, |counts| counts.total_shots());
    let classical = if verify {
        Some(solver.classical_solutions()?)
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let report = SolveReport {
                values: &problem.values,
                target: problem.target,
                shots,
                grover_iterations: solver.grover_iterations(),
                solutions: &candidates,
                classical_solutions: classical,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_candidates(&candidates, shots);
            if let Some(expected) = classical {
                print_verification(&candidates, &expected);
            }
        }
    }

    Ok(())
}

fn print_verification(candidates: &[SolutionCandidate], expected: &[Vec<i64>]) {
    let found: BTreeSet<&[i64]> = candidates.iter().map(|c| c.subset.as_slice()).collect();
    let missing: Vec<&Vec<i64>> = expected
        .iter()
        .filter(|s| !found.contains(s.as_slice()))
        .collect();

    if missing.is_empty() {
        println!(
            "\n{} Matches classical search ({} solution(s))",
            style("✓").green().bold(),
            expected.len()
        );
    } else {
        println!(
            "\n{} Classical search found {} solution(s) missing from the measurement:",
            style("!").yellow().bold(),
            missing.len()
        );
        for subset in missing {
            println!("  {subset:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            shots: Some(64),
            iterations: Some(2),
            exhaustive: true,
            min_probability: Some(0.05),
            no_range_check: true,
        };
        let config = overrides.apply(SolverConfig::default()).unwrap();
        assert_eq!(config.shots, 64);
        assert_eq!(config.grover_iterations, Some(2));
        assert_eq!(config.decode.mode, DecodeMode::Exhaustive);
        assert_eq!(config.decode.min_probability, 0.05);
        assert!(!config.check_register_range);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let base = SolverConfig {
            shots: 333,
            ..SolverConfig::default()
        };
        let config = Overrides::default().apply(base.clone()).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = Overrides {
            min_probability: Some(2.0),
            ..Overrides::default()
        };
        assert!(overrides.apply(SolverConfig::default()).is_err());
    }
}
