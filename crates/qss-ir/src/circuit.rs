//! High-level circuit builder API.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use rustc_hash::FxHashMap;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// Gates are appended through the fluent methods below; the circuit keeps
/// them in a [`CircuitDag`]. Whole circuits can be reused as blocks with
/// [`Circuit::append`] and reversed with [`Circuit::inverse`].
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    dag: CircuitDag,
    next_qubit_id: u32,
    next_clbit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            dag: CircuitDag::new(),
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = QubitId(self.next_qubit_id);
                self.next_qubit_id += 1;
                self.qubits.push(Qubit::with_register(id, &name, i));
                self.dag.add_qubit(id);
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.next_clbit_id);
        self.next_clbit_id += 1;
        self.clbits.push(Clbit::new(id));
        self.dag.add_clbit(id);
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = ClbitId(self.next_clbit_id);
                self.next_clbit_id += 1;
                self.clbits.push(Clbit::with_register(id, &name, i));
                self.dag.add_clbit(id);
                id
            })
            .collect()
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply a multi-controlled X gate.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::mcx(controls, target))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }

        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        let clbits: Vec<_> = self
            .clbits
            .iter()
            .map(|c| c.id)
            .take(qubits.len())
            .collect();

        self.dag.apply(Instruction::measure_all(qubits, clbits)?)?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append every operation of `block` onto `qubits` of this circuit.
    ///
    /// The i-th qubit of `block` is wired to `qubits[i]`. Every appended gate
    /// is labelled with the block's name, so after nested appends a gate
    /// carries the name of the outermost block it arrived through.
    pub fn append(&mut self, block: &Circuit, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if block.num_qubits() != qubits.len() {
            return Err(IrError::BlockSizeMismatch {
                block: block.name.clone(),
                expected: block.num_qubits(),
                got: qubits.len(),
            });
        }

        let wiring: FxHashMap<QubitId, QubitId> = block
            .qubits
            .iter()
            .map(|q| q.id)
            .zip(qubits.iter().copied())
            .collect();

        for (_, inst) in block.dag.topological_ops() {
            if inst.is_measure() {
                return Err(IrError::InvalidDag(format!(
                    "block '{}' contains a measurement and cannot be appended",
                    block.name
                )));
            }
            let mut placed = inst.remapped(|q| wiring[&q]);
            if let InstructionKind::Gate(gate) = &mut placed.kind {
                gate.label = Some(block.name.clone());
            }
            self.dag.apply(placed)?;
        }

        Ok(self)
    }

    /// The adjoint circuit: operations reversed, each one inverted.
    ///
    /// Fails on circuits that contain measurements.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut inverted = Circuit {
            name: format!("{}_dg", self.name),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            dag: CircuitDag::new(),
            next_qubit_id: self.next_qubit_id,
            next_clbit_id: self.next_clbit_id,
        };
        for q in &inverted.qubits {
            inverted.dag.add_qubit(q.id);
        }
        for c in &inverted.clbits {
            inverted.dag.add_clbit(c.id);
        }

        let ops: Vec<Instruction> = self.dag.topological_ops().map(|(_, i)| i.clone()).collect();
        for inst in ops.iter().rev() {
            inverted.dag.apply(inst.inverse()?)?;
        }

        Ok(inverted)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// All operations in an executable order.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.dag
            .topological_ops()
            .map(|(_, inst)| inst.clone())
            .collect()
    }

    /// Number of operations per instruction name.
    pub fn op_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, inst) in self.dag.topological_ops() {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of gates per block label; unlabelled gates count under `""`.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, inst) in self.dag.topological_ops() {
            if inst.is_gate() {
                let label = inst.label().unwrap_or_default().to_string();
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        counts
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Quantum Fourier transform on `n` qubits (without measurements).
    ///
    /// Qubit `n - 1` is the most significant; the final swaps restore the
    /// input bit order.
    pub fn qft(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("qft", n, 0);

        for j in (0..n).rev() {
            circuit.h(QubitId(j))?;
            for m in (0..j).rev() {
                let angle = PI / f64::from(1u32 << (j - m));
                circuit.cp(angle, QubitId(m), QubitId(j))?;
            }
        }

        for q in 0..n / 2 {
            circuit.swap(QubitId(q), QubitId(n - q - 1))?;
        }

        Ok(circuit)
    }

    /// Inverse quantum Fourier transform on `n` qubits.
    ///
    /// Exactly the adjoint of [`Circuit::qft`]: swaps first, then for each
    /// qubit `j` the conjugate rotations against every lower qubit followed
    /// by a Hadamard.
    pub fn iqft(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("iqft", n, 0);

        for q in 0..n / 2 {
            circuit.swap(QubitId(q), QubitId(n - q - 1))?;
        }

        for j in 0..n {
            for m in 0..j {
                let angle = -PI / f64::from(1u32 << (j - m));
                circuit.cp(angle, QubitId(m), QubitId(j))?;
            }
            circuit.h(QubitId(j))?;
        }

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let sums = circuit.add_qreg("sum", 3);
        let index = circuit.add_qreg("index", 2);
        let marks = circuit.add_creg("marks", 2);

        assert_eq!(sums, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(index, vec![QubitId(3), QubitId(4)]);
        assert_eq!(marks.len(), 2);
        assert_eq!(format!("{}", circuit.qubits()[4]), "index[1]");
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.num_ops(), 4);
    }

    #[test]
    fn test_mcx_width() {
        let mut circuit = Circuit::with_size("test", 4, 0);
        circuit
            .mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3))
            .unwrap();
        assert_eq!(circuit.op_counts().get("mcx"), Some(&1));
    }

    #[test]
    fn test_append_rewires_and_labels() {
        let mut block = Circuit::with_size("prep", 2, 0);
        block.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        let mut circuit = Circuit::with_size("main", 4, 0);
        circuit.append(&block, &[QubitId(2), QubitId(3)]).unwrap();

        let ops = circuit.instructions();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].qubits, vec![QubitId(2)]);
        assert_eq!(ops[1].qubits, vec![QubitId(2), QubitId(3)]);
        assert!(ops.iter().all(|i| i.label() == Some("prep")));
        assert_eq!(circuit.label_counts().get("prep"), Some(&2));
    }

    #[test]
    fn test_nested_append_takes_outer_label() {
        let mut inner = Circuit::with_size("inner", 1, 0);
        inner.x(QubitId(0)).unwrap();
        let mut outer = Circuit::with_size("outer", 1, 0);
        outer.append(&inner, &[QubitId(0)]).unwrap();

        let mut circuit = Circuit::with_size("main", 2, 0);
        circuit.append(&outer, &[QubitId(1)]).unwrap();
        assert_eq!(circuit.instructions()[0].label(), Some("outer"));
    }

    #[test]
    fn test_append_size_mismatch() {
        let block = Circuit::with_size("prep", 2, 0);
        let mut circuit = Circuit::with_size("main", 4, 0);
        let err = circuit.append(&block, &[QubitId(0)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::BlockSizeMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn test_inverse_reverses_and_negates() {
        let mut circuit = Circuit::with_size("enc", 2, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cp(0.75, QubitId(0), QubitId(1))
            .unwrap();

        let inv = circuit.inverse().unwrap();
        let ops = inv.instructions();
        assert_eq!(inv.name(), "enc_dg");
        assert_eq!(ops[0].as_gate().unwrap().kind, StandardGate::CP(-0.75));
        assert_eq!(ops[1].as_gate().unwrap().kind, StandardGate::H);
    }

    #[test]
    fn test_inverse_rejects_measurement() {
        let mut circuit = Circuit::with_size("m", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(circuit.inverse(), Err(IrError::NonUnitary(_))));
    }

    proptest::proptest! {
        #[test]
        fn double_inverse_restores_chain(
            angles in proptest::collection::vec(-PI..PI, 1..12)
        ) {
            let mut circuit = Circuit::with_size("chain", 3, 0);
            for (i, angle) in angles.iter().enumerate() {
                let control = QubitId((i % 3) as u32);
                let target = QubitId(((i + 1) % 3) as u32);
                circuit.cp(*angle, control, target).unwrap().h(target).unwrap();
            }
            let twice = circuit.inverse().unwrap().inverse().unwrap();
            proptest::prop_assert_eq!(twice.instructions(), circuit.instructions());
        }
    }

    #[test]
    fn test_qft_and_iqft_shapes() {
        let qft = Circuit::qft(4).unwrap();
        let iqft = Circuit::iqft(4).unwrap();
        assert_eq!(qft.op_counts(), iqft.op_counts());
        assert_eq!(iqft.op_counts().get("cp"), Some(&6));
        assert_eq!(iqft.op_counts().get("swap"), Some(&2));
        assert_eq!(iqft.op_counts().get("h"), Some(&4));
    }
}
