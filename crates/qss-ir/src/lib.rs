//! Circuit Intermediate Representation
//!
//! Core data structures for describing the gate circuits produced by the
//! subset-sum solver.
//!
//! # Overview
//!
//! Circuits are stored as a DAG (Directed Acyclic Graph) of instructions over
//! qubit and classical-bit wires. The high-level [`Circuit`] API offers a
//! fluent builder, block composition through [`Circuit::append`] and adjoints
//! through [`Circuit::inverse`].
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] with concrete angles, wrapped in a labelled [`Gate`]
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Phase Kickback Block
//!
//! ```rust
//! use qss_ir::{Circuit, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut block = Circuit::with_size("kick", 2, 0);
//! block.h(QubitId(0)).unwrap();
//! block.cp(PI / 2.0, QubitId(0), QubitId(1)).unwrap();
//!
//! let mut circuit = Circuit::with_size("main", 3, 0);
//! circuit.append(&block, &[QubitId(1), QubitId(2)]).unwrap();
//! circuit.append(&block.inverse().unwrap(), &[QubitId(1), QubitId(2)]).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 4);
//! assert_eq!(circuit.instructions()[0].label(), Some("kick"));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X` | 1 | Pauli-X |
//! | `P` | 1 | Phase gate |
//! | `CX` | 2 | Controlled-X |
//! | `CP` | 2 | Controlled phase |
//! | `Swap` | 2 | SWAP gate |
//! | `MCX` | n+1 | Multi-controlled X |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
