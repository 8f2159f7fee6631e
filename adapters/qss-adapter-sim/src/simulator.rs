//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qss_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qss_ir::{Circuit, Instruction, InstructionKind};

use crate::statevector::Statevector;

/// Default width limit; a 20-qubit state holds 16 MiB of amplitudes.
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Hard ceiling for `max_qubits` accepted from configuration.
const QUBIT_CEILING: u32 = 30;

/// Probabilities below this are treated as zero in exact readout.
const PROBABILITY_EPSILON: f64 = 1e-12;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Where each measured qubit lands in the output bitstring.
struct Readout {
    width: usize,
    /// `(qubit index, clbit index)` pairs.
    wires: Vec<(usize, usize)>,
}

impl Readout {
    /// Collect measurement wiring from a circuit.
    ///
    /// A circuit without measurements reads out every qubit into the bit
    /// of the same index.
    fn from_circuit(circuit: &Circuit, instructions: &[Instruction]) -> Self {
        let wires: Vec<_> = instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| {
                inst.qubits
                    .iter()
                    .zip(&inst.clbits)
                    .map(|(q, c)| (q.index(), c.index()))
            })
            .collect();

        if wires.is_empty() {
            Self {
                width: circuit.num_qubits(),
                wires: (0..circuit.num_qubits()).map(|q| (q, q)).collect(),
            }
        } else {
            Self {
                width: circuit.num_clbits(),
                wires,
            }
        }
    }

    /// Bitstring of a basis state; character `i` is classical bit `i`.
    fn bitstring(&self, basis: usize) -> String {
        let mut bits = vec![b'0'; self.width];
        for &(qubit, clbit) in &self.wires {
            if (basis >> qubit) & 1 == 1 {
                bits[clbit] = b'1';
            }
        }
        bits.into_iter().map(char::from).collect()
    }
}

/// Local statevector simulator backend.
///
/// The circuit is evolved once per job and the requested shots are drawn
/// from the final state. With a seed configured every job is reproducible.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Maximum number of qubits supported.
    max_qubits: u32,
    /// Sampling seed.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits, None)
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let capabilities = Capabilities::simulator(max_qubits).with_name(config.name.clone());
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
            seed,
        }
    }

    /// The configured sampling seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn check_width(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        Ok(())
    }

    /// Exact outcome distribution of a circuit, keyed by bitstring.
    ///
    /// Outcomes with negligible probability are omitted.
    pub fn exact_probabilities(&self, circuit: &Circuit) -> HalResult<BTreeMap<String, f64>> {
        self.check_width(circuit)?;
        let instructions = circuit.instructions();
        let readout = Readout::from_circuit(circuit, &instructions);
        let sv = evolve(circuit.num_qubits(), &instructions);

        let mut distribution = BTreeMap::new();
        for (basis, p) in sv.probabilities().into_iter().enumerate() {
            if p > PROBABILITY_EPSILON {
                *distribution.entry(readout.bitstring(basis)).or_insert(0.0) += p;
            }
        }
        Ok(distribution)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply every unitary instruction to a fresh state.
fn evolve(num_qubits: usize, instructions: &[Instruction]) -> Statevector {
    let mut sv = Statevector::new(num_qubits);
    for inst in instructions {
        sv.apply(inst);
    }
    sv
}

/// Run simulation synchronously.
#[instrument(skip(circuit), fields(circuit = circuit.name()))]
fn run_simulation(circuit: &Circuit, shots: u32, seed: Option<u64>) -> ExecutionResult {
    let start = Instant::now();

    let instructions = circuit.instructions();
    debug!(
        "Starting simulation: {} qubits, {} instructions, {} shots",
        circuit.num_qubits(),
        instructions.len(),
        shots
    );

    let readout = Readout::from_circuit(circuit, &instructions);
    let sv = evolve(circuit.num_qubits(), &instructions);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut by_basis: FxHashMap<usize, u64> = FxHashMap::default();
    for outcome in sv.sample_many(&mut rng, shots) {
        *by_basis.entry(outcome).or_insert(0) += 1;
    }

    let mut counts = Counts::new();
    for (basis, n) in by_basis {
        counts.insert(readout.bitstring(basis), n);
    }

    let elapsed = start.elapsed();
    debug!("Simulation completed in {:?}", elapsed);

    ExecutionResult::new(counts, shots)
        .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .with_metadata(serde_json::json!({ "seed": seed }))
}

/// Whether any gate touches a qubit after it was measured.
fn has_mid_circuit_measurement(instructions: &[Instruction]) -> bool {
    let mut measured = rustc_hash::FxHashSet::default();
    for inst in instructions {
        match inst.kind {
            InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
            InstructionKind::Gate(_) if inst.qubits.iter().any(|q| measured.contains(q)) => {
                return true;
            }
            _ => {}
        }
    }
    false
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = vec![];
        if circuit.num_qubits() > self.max_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits, limit is {}",
                circuit.num_qubits(),
                self.max_qubits
            ));
        }

        let instructions = circuit.instructions();
        for inst in &instructions {
            if let Some(gate) = inst.as_gate() {
                if !self.capabilities.gate_set.contains(gate.name()) {
                    reasons.push(format!("unsupported gate '{}'", gate.name()));
                }
            }
        }
        if has_mid_circuit_measurement(&instructions) {
            reasons.push("gates after measurement are not supported".into());
        }

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(backend = %self.config.name))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.check_width(circuit)?;
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested, allowed range is 1..={}",
                self.capabilities.max_shots
            )));
        }
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.config.name.clone());

        {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }
        debug!("Submitted job: {}", job_id);

        self.set_status(&job_id, JobStatus::Running);

        let owned = circuit.clone();
        let seed = self.seed;
        let outcome =
            tokio::task::spawn_blocking(move || run_simulation(&owned, shots, seed)).await;

        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            match outcome {
                Ok(result) => {
                    sim_job.result = Some(result);
                    sim_job.job.transition(JobStatus::Completed);
                }
                Err(e) => sim_job.job.transition(JobStatus::Failed(e.to_string())),
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::Backend(format!(
                "job {job_id} has no result yet (status: {status})"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job.transition(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

impl SimulatorBackend {
    fn set_status(&self, job_id: &JobId, status: JobStatus) {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job.transition(status);
        }
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            None => DEFAULT_MAX_QUBITS,
            Some(v) => u32::try_from(v)
                .ok()
                .filter(|&v| (1..=QUBIT_CEILING).contains(&v))
                .ok_or_else(|| {
                    HalError::Configuration(format!(
                        "max_qubits must be between 1 and {QUBIT_CEILING}, got {v}"
                    ))
                })?,
        };
        let seed = config.extra_u64("seed")?;

        Ok(Self::build(config, max_qubits, seed))
    }
}
