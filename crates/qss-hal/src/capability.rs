//! Backend capability introspection.
//!
//! [`Capabilities`] tells a caller how wide a circuit a backend accepts, which
//! gates it understands and how many shots one job may request.

use serde::{Deserialize, Serialize};

/// Hardware capabilities of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags such as `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "exact_probabilities".into()],
        }
    }

    /// Rename the backend these capabilities describe.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether `feature` is advertised.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gate set supported by a backend.
///
/// Gate names are the lowercase names used by [`qss_ir::StandardGate::name`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Gates acting on three or more qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multi_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate the circuit IR can express.
    pub fn universal() -> Self {
        let names = |gates: &[&str]| gates.iter().map(|g| (*g).to_string()).collect();
        Self {
            single_qubit: names(&["x", "h", "p"]),
            two_qubit: names(&["cx", "cp", "swap"]),
            multi_qubit: names(&["mcx"]),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
            || self.two_qubit.iter().any(|g| g == gate)
            || self.multi_qubit.iter().any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_simulator() {
        let caps = Capabilities::simulator(20).with_name("statevector");
        assert_eq!(caps.name, "statevector");
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.is_simulator);
        assert!(caps.has_feature("exact_probabilities"));
        assert!(!caps.has_feature("mid_circuit_measurement"));
    }

    #[test]
    fn test_universal_gate_set() {
        let gates = GateSet::universal();
        for name in ["h", "x", "cp", "swap", "mcx"] {
            assert!(gates.contains(name), "{name} missing");
        }
        assert!(!gates.contains("rz"));
        assert!(!gates.contains("ccx"));
    }
}
