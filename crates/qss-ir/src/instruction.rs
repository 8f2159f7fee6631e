//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement operation.
    Measure,
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a multi-controlled X instruction.
    pub fn mcx(controls: &[QubitId], target: QubitId) -> Self {
        let num_controls = u32::try_from(controls.len()).unwrap_or(u32::MAX);
        Self::gate(
            StandardGate::MCX(num_controls),
            controls.iter().copied().chain(std::iter::once(target)),
        )
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a multi-qubit measurement instruction.
    ///
    /// Returns an error if the number of qubits and classical bits do not match.
    pub fn measure_all(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::InvalidDag(format!(
                "measure_all: qubit count ({}) does not match clbit count ({})",
                qubits.len(),
                clbits.len(),
            )));
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Label of the block that emitted this instruction, if any.
    pub fn label(&self) -> Option<&str> {
        self.as_gate().and_then(|g| g.label.as_deref())
    }

    /// Copy of this instruction with its operands rewired through `map`.
    pub fn remapped(&self, map: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|&q| map(q)).collect(),
            clbits: self.clbits.clone(),
        }
    }

    /// The adjoint of this instruction.
    ///
    /// Barriers are their own inverse; measurements have none.
    pub fn inverse(&self) -> IrResult<Self> {
        match &self.kind {
            InstructionKind::Gate(g) => Ok(Self {
                kind: InstructionKind::Gate(g.inverse()),
                qubits: self.qubits.clone(),
                clbits: vec![],
            }),
            InstructionKind::Barrier => Ok(self.clone()),
            InstructionKind::Measure => Err(IrError::NonUnitary(self.name().to_string())),
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_mcx_operand_order() {
        let inst = Instruction::mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(5));
        assert_eq!(inst.name(), "mcx");
        assert_eq!(
            inst.qubits,
            vec![QubitId(0), QubitId(1), QubitId(2), QubitId(5)]
        );
        assert_eq!(inst.as_gate().unwrap().num_qubits(), 4);
    }

    #[test]
    fn test_measure_all_mismatch() {
        let result = Instruction::measure_all([QubitId(0), QubitId(1)], [ClbitId(0)]);
        assert!(matches!(result, Err(IrError::InvalidDag(_))));
    }

    #[test]
    fn test_inverse_of_measure_fails() {
        let inst = Instruction::measure(QubitId(0), ClbitId(0));
        assert!(matches!(inst.inverse(), Err(IrError::NonUnitary(_))));
    }

    #[test]
    fn test_remapped() {
        let inst = Instruction::two_qubit_gate(StandardGate::CP(0.5), QubitId(0), QubitId(1));
        let moved = inst.remapped(|q| QubitId(q.0 + 10));
        assert_eq!(moved.qubits, vec![QubitId(10), QubitId(11)]);
        assert_eq!(moved.kind, inst.kind);
    }

    #[test]
    fn test_serde_roundtrip_keeps_label() {
        let gate = Gate::standard(StandardGate::CP(0.25)).with_label("qpe");
        let inst = Instruction::gate(gate, [QubitId(0), QubitId(3)]);
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
        assert_eq!(back.label(), Some("qpe"));
    }
}
