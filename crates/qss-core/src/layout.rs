//! Qubit and classical-bit layout of the solver circuit.
//!
//! ```text
//!   q[0 .. m)          sum register, m = round(log2(sum(values))) + 1
//!   q[m .. m+n)        one index qubit per value
//!   q[m+n]             target marker (last index qubit)
//!   q[m+n+1]           flag ancilla, prepared in |−⟩
//!   c[0 .. n+1)        index qubit i measured into classical bit i
//! ```

use serde::Serialize;

use qss_ir::{Circuit, ClbitId, QubitId};

use crate::error::{CoreError, CoreResult};
use crate::problem::ProblemInstance;

/// Register names used in the built circuit.
pub const SUM_REGISTER: &str = "sum";
/// Index register name.
pub const INDEX_REGISTER: &str = "index";
/// Flag ancilla register name.
pub const FLAG_REGISTER: &str = "flag";
/// Classical register name.
pub const MARK_REGISTER: &str = "marks";

/// Register layout for one problem instance. Fixed once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterLayout {
    num_values: usize,
    num_sum_qubits: u32,
    sums: Vec<QubitId>,
    indices: Vec<QubitId>,
    flag: QubitId,
    marks: Vec<ClbitId>,
}

impl RegisterLayout {
    /// Compute the layout for `problem`.
    pub fn for_problem(problem: &ProblemInstance) -> Self {
        let num_values = problem.num_values();
        let m = Self::sum_width(problem.value_sum());
        let n = u32::try_from(num_values).unwrap_or(u32::MAX);

        Self {
            num_values,
            num_sum_qubits: m,
            sums: (0..m).map(QubitId).collect(),
            indices: (m..m + n + 1).map(QubitId).collect(),
            flag: QubitId(m + n + 1),
            marks: (0..=n).map(ClbitId).collect(),
        }
    }

    /// Width of the sum register for a positive value sum.
    pub fn sum_width(value_sum: i128) -> u32 {
        let log2 = (value_sum.max(1) as f64).log2();
        log2.round() as u32 + 1
    }

    /// Largest target magnitude the sum register holds, `2^m − 1`.
    pub fn max_representable(&self) -> u128 {
        1u128
            .checked_shl(self.num_sum_qubits)
            .map_or(u128::MAX, |v| v - 1)
    }

    /// Fail when `|target|` does not fit in the sum register.
    pub fn check_target(&self, target: i64) -> CoreResult<()> {
        let max = self.max_representable();
        if u128::from(target.unsigned_abs()) > max {
            return Err(CoreError::TargetOutOfRange { target, max });
        }
        Ok(())
    }

    /// Number of input values.
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// Width of the sum register.
    pub fn num_sum_qubits(&self) -> u32 {
        self.num_sum_qubits
    }

    /// Sum register qubits, least significant first.
    pub fn sums(&self) -> &[QubitId] {
        &self.sums
    }

    /// Index qubits; the last one is the target marker.
    pub fn indices(&self) -> &[QubitId] {
        &self.indices
    }

    /// The target marker qubit.
    pub fn marker(&self) -> QubitId {
        self.indices[self.num_values]
    }

    /// The flag ancilla.
    pub fn flag(&self) -> QubitId {
        self.flag
    }

    /// Classical bits, one per index qubit.
    pub fn marks(&self) -> &[ClbitId] {
        &self.marks
    }

    /// Sum and index qubits, the span of the phase-estimation block.
    pub fn phase_register(&self) -> Vec<QubitId> {
        self.sums.iter().chain(&self.indices).copied().collect()
    }

    /// Every qubit in layout order.
    pub fn all_qubits(&self) -> Vec<QubitId> {
        let mut qubits = self.phase_register();
        qubits.push(self.flag);
        qubits
    }

    /// Total qubit count.
    pub fn num_qubits(&self) -> usize {
        self.sums.len() + self.indices.len() + 1
    }

    /// Total classical bit count.
    pub fn num_clbits(&self) -> usize {
        self.marks.len()
    }

    /// An empty circuit with the layout's named registers allocated.
    pub fn empty_circuit(&self, name: impl Into<String>) -> Circuit {
        let mut circuit = Circuit::new(name);
        let sums = circuit.add_qreg(SUM_REGISTER, self.num_sum_qubits);
        let indices = circuit.add_qreg(INDEX_REGISTER, self.indices.len() as u32);
        let flag = circuit.add_qreg(FLAG_REGISTER, 1);
        let marks = circuit.add_creg(MARK_REGISTER, self.marks.len() as u32);

        debug_assert_eq!(sums, self.sums);
        debug_assert_eq!(indices, self.indices);
        debug_assert_eq!(flag, [self.flag]);
        debug_assert_eq!(marks, self.marks);
        circuit
    }
}
