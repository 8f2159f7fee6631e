//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use qss_ir::{Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
///
/// Basis index bit `q` holds the value of qubit `q`.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply the unitary part of an instruction.
    ///
    /// Measurements are read out separately by the caller; barriers are no-ops.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_standard_gate(&gate.kind, &qubits);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    /// Apply a standard gate.
    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            // Single-qubit gates
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::P(theta) => self.apply_phase(qubits[0], *theta),

            // Two-qubit gates
            StandardGate::CX => self.apply_mcx(&qubits[..1], qubits[1]),
            StandardGate::CP(theta) => self.apply_cp(qubits[0], qubits[1], *theta),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),

            // Multi-qubit gates
            StandardGate::MCX(_) => {
                let (target, controls) = qubits
                    .split_last()
                    .map_or((None, &[][..]), |(t, c)| (Some(*t), c));
                if let Some(target) = target {
                    self.apply_mcx(controls, target);
                }
            }
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        self.apply_mcx(&[], qubit);
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    // =========================================================================
    // Multi-qubit gate implementations
    // =========================================================================

    fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let mask = (1 << control) | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Flip `target` on every basis state where all `controls` are set.
    ///
    /// With no controls this is a plain X.
    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let ctrl_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // Readout
    // =========================================================================

    /// Probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Draw `shots` basis-state indices from the Born distribution.
    pub fn sample_many<R: Rng + ?Sized>(&self, rng: &mut R, shots: u32) -> Vec<usize> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut acc = 0.0;
        for amp in &self.amplitudes {
            acc += amp.norm_sqr();
            cumulative.push(acc);
        }

        let last = self.amplitudes.len() - 1;
        (0..shots)
            .map(|_| {
                let r: f64 = rng.r#gen::<f64>() * acc;
                cumulative.partition_point(|&c| c <= r).min(last)
            })
            .collect()
    }
}
