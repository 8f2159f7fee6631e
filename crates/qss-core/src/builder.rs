//! Assembly of the full solver circuit.

use qss_ir::Circuit;
use tracing::{debug, instrument};

use crate::encoding::phase_estimation;
use crate::error::CoreResult;
use crate::grover::{default_iterations, diffuser, oracle};
use crate::layout::RegisterLayout;
use crate::problem::ProblemInstance;

/// Name given to built circuits.
pub const CIRCUIT_NAME: &str = "subset_sum";

/// Builds the measured subset-sum circuit for one problem instance.
#[derive(Debug, Clone)]
pub struct CircuitBuilder<'a> {
    problem: &'a ProblemInstance,
    layout: &'a RegisterLayout,
    iterations: usize,
}

impl<'a> CircuitBuilder<'a> {
    /// A builder using `floor(sqrt(2^n))` amplification rounds.
    pub fn new(problem: &'a ProblemInstance, layout: &'a RegisterLayout) -> Self {
        Self {
            problem,
            layout,
            iterations: default_iterations(problem.num_values()),
        }
    }

    /// Override the number of amplification rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Number of amplification rounds the circuit will contain.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Build the circuit, measurements included.
    #[instrument(
        skip(self),
        fields(values = self.problem.num_values(), iterations = self.iterations)
    )]
    pub fn build(&self) -> CoreResult<Circuit> {
        let layout = self.layout;
        let register = layout.phase_register();
        let everything = layout.all_qubits();

        let qpe = phase_estimation(self.problem, layout)?;
        let oracle = oracle(layout)?;
        let diffuser = diffuser(&qpe, layout)?;

        let mut circuit = layout.empty_circuit(CIRCUIT_NAME);
        circuit.append(&qpe, &register)?;
        circuit.x(layout.flag())?.h(layout.flag())?;

        for _ in 0..self.iterations {
            circuit.append(&oracle, &everything)?;
            circuit.append(&diffuser, &everything)?;
        }

        for (&index, &mark) in layout.indices().iter().zip(layout.marks()) {
            circuit.measure(index, mark)?;
        }

        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            depth = circuit.depth(),
            "built subset-sum circuit"
        );
        Ok(circuit)
    }
}
