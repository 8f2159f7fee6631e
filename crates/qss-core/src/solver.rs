//! End-to-end solver: build, execute, decode.

use qss_hal::{Backend, Counts, HalError, ValidationResult};
use qss_ir::Circuit;
use tracing::{debug, info, instrument, warn};

use crate::builder::CircuitBuilder;
use crate::config::SolverConfig;
use crate::decoder::SolutionCandidate;
use crate::error::CoreResult;
use crate::grover::default_iterations;
use crate::layout::RegisterLayout;
use crate::problem::ProblemInstance;

/// Quantum subset-sum solver for one problem instance.
///
/// ```ignore
/// let mut solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16)?;
/// let backend = SimulatorBackend::new().with_seed(7);
/// for candidate in solver.execute(&backend).await? {
///     println!("{:?} p={:.3}", candidate.subset, candidate.probability);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QuantumSubsetSum {
    problem: ProblemInstance,
    layout: RegisterLayout,
    config: SolverConfig,
    counts: Option<Counts>,
}

impl QuantumSubsetSum {
    /// Solver with the default configuration.
    pub fn new(values: Vec<i64>, target: i64) -> CoreResult<Self> {
        Self::with_config(values, target, SolverConfig::default())
    }

    /// Solver with an explicit configuration.
    ///
    /// The register range check runs here, so it honours
    /// `config.check_register_range`.
    pub fn with_config(values: Vec<i64>, target: i64, config: SolverConfig) -> CoreResult<Self> {
        config.validate()?;
        let problem = ProblemInstance::new(values, target)?;
        let layout = RegisterLayout::for_problem(&problem);
        if config.check_register_range {
            layout.check_target(target)?;
        }

        Ok(Self {
            problem,
            layout,
            config,
            counts: None,
        })
    }

    /// The problem instance.
    pub fn problem(&self) -> &ProblemInstance {
        &self.problem
    }

    /// The register layout.
    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Amplification rounds the built circuit contains.
    pub fn grover_iterations(&self) -> usize {
        self.config
            .grover_iterations
            .unwrap_or_else(|| default_iterations(self.problem.num_values()))
    }

    /// Build the measured circuit.
    pub fn build(&self) -> CoreResult<Circuit> {
        CircuitBuilder::new(&self.problem, &self.layout)
            .with_iterations(self.grover_iterations())
            .build()
    }

    /// Run on `backend` and decode the measured counts.
    ///
    /// Backend errors are returned unchanged. A layout wider than the
    /// backend fails with `CircuitTooLarge` before the circuit is built.
    #[instrument(
        skip(self, backend),
        fields(backend = backend.name(), shots = self.config.shots)
    )]
    pub async fn execute(&mut self, backend: &dyn Backend) -> CoreResult<Vec<SolutionCandidate>> {
        let required = self.layout.num_qubits();
        let available = backend.capabilities().num_qubits as usize;
        if required > available {
            return Err(HalError::CircuitTooLarge(format!(
                "layout needs {required} qubits but {} supports {available}",
                backend.name()
            ))
            .into());
        }

        let circuit = self.build()?;

        if let ValidationResult::Invalid { reasons } = backend.validate(&circuit).await? {
            warn!(?reasons, "backend rejected circuit");
            return Err(HalError::InvalidCircuit(reasons.join("; ")).into());
        }

        let job_id = backend.submit(&circuit, self.config.shots).await?;
        debug!(%job_id, "submitted");
        let result = backend.wait(&job_id).await?;

        let counts = self.counts.insert(result.counts);
        let candidates = self.config.decode.decoder().decode(&self.problem, counts);
        info!(
            outcomes = counts.len(),
            solutions = candidates.len(),
            "decoded measurement counts"
        );
        Ok(candidates)
    }

    /// Decode externally obtained counts with the configured decoder.
    pub fn process_measurements(&self, counts: &Counts) -> Vec<SolutionCandidate> {
        self.config.decode.decoder().decode(&self.problem, counts)
    }

    /// Raw counts of the most recent [`execute`](Self::execute).
    pub fn get_measurement_counts(&self) -> Option<&Counts> {
        self.counts.as_ref()
    }

    /// Every subset summing to the target, found classically.
    pub fn classical_solutions(&self) -> CoreResult<Vec<Vec<i64>>> {
        Ok(self
            .problem
            .classical_solutions()?
            .iter()
            .map(|indices| self.problem.subset(indices))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_target_out_of_range() {
        // sum = 3 gives a 3-qubit register, max 7.
        assert!(matches!(
            QuantumSubsetSum::new(vec![1, 2], 9),
            Err(CoreError::TargetOutOfRange { target: 9, max: 7 })
        ));

        let config = SolverConfig {
            check_register_range: false,
            ..SolverConfig::default()
        };
        assert!(QuantumSubsetSum::with_config(vec![1, 2], 9, config).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SolverConfig {
            shots: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            QuantumSubsetSum::with_config(vec![1, 2], 3, config),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_grover_iterations_override() {
        let solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16).unwrap();
        assert_eq!(solver.grover_iterations(), 5);

        let config = SolverConfig {
            grover_iterations: Some(2),
            ..SolverConfig::default()
        };
        let solver = QuantumSubsetSum::with_config(vec![5, 7, 8, 9, 1], 16, config).unwrap();
        assert_eq!(solver.grover_iterations(), 2);
    }

    #[test]
    fn test_no_counts_before_execute() {
        let solver = QuantumSubsetSum::new(vec![5, 2, 1], 3).unwrap();
        assert!(solver.get_measurement_counts().is_none());
    }

    #[test]
    fn test_classical_solutions_as_values() {
        let solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16).unwrap();
        assert_eq!(
            solver.classical_solutions().unwrap(),
            vec![vec![7, 9], vec![7, 8, 1]]
        );
    }
}
