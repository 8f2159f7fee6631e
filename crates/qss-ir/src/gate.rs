//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Rotation angles are concrete radians; the solver never needs symbolic
/// parameters because every angle is fixed by the problem instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit gates
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Phase gate diag(1, e^{iθ}).
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled phase gate.
    CP(f64),
    /// SWAP gate.
    Swap,

    // Multi-qubit gates
    /// Multi-controlled X with the given number of controls.
    ///
    /// Operands are the controls followed by the target.
    MCX(u32),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
            StandardGate::MCX(_) => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::H | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CP(_) | StandardGate::Swap => 2,

            StandardGate::MCX(controls) => controls + 1,
        }
    }

    /// Rotation angle, for gates that carry one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::P(theta) | StandardGate::CP(theta) => Some(*theta),
            _ => None,
        }
    }

    /// The adjoint of this gate.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::P(theta) => StandardGate::P(-theta),
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            other => other.clone(),
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate itself.
    pub kind: StandardGate,
    /// Optional label, used to record which block produced the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create an unlabelled gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The adjoint gate, keeping the label.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            label: self.label.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CP(PI).num_qubits(), 2);
        assert_eq!(StandardGate::Swap.num_qubits(), 2);
        assert_eq!(StandardGate::MCX(6).num_qubits(), 7);
        assert_eq!(StandardGate::MCX(6).name(), "mcx");
    }

    #[test]
    fn test_inverse() {
        assert_eq!(StandardGate::CP(0.3).inverse(), StandardGate::CP(-0.3));
        assert_eq!(StandardGate::P(PI).inverse(), StandardGate::P(-PI));
        assert_eq!(StandardGate::H.inverse(), StandardGate::H);
        assert_eq!(StandardGate::MCX(3).inverse(), StandardGate::MCX(3));
    }

    #[test]
    fn test_gate_label_survives_inverse() {
        let gate = Gate::standard(StandardGate::P(1.0)).with_label("qpe");
        let inv = gate.inverse();
        assert_eq!(inv.label.as_deref(), Some("qpe"));
        assert_eq!(inv.kind.angle(), Some(-1.0));
    }
}
