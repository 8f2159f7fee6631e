//! Quantum subset-sum solver.
//!
//! Encodes an integer set and a target sum into a phase-estimation circuit,
//! amplifies the states whose selected values reach the target, and decodes
//! measured bitstrings back into subsets.
//!
//! # Overview
//!
//! - [`ProblemInstance`] validates the input and normalizes it
//! - [`RegisterLayout`] fixes the sum, index and flag qubits
//! - [`CircuitBuilder`] assembles phase estimation and amplification rounds
//! - [`Decoder`] turns [`Counts`](qss_hal::Counts) into [`SolutionCandidate`]s
//! - [`QuantumSubsetSum`] ties them together against any [`Backend`](qss_hal::Backend)
//!
//! # Example
//!
//! ```ignore
//! use qss_adapter_sim::SimulatorBackend;
//! use qss_core::QuantumSubsetSum;
//!
//! let mut solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16)?;
//! let backend = SimulatorBackend::new().with_seed(42);
//! let solutions = solver.execute(&backend).await?;
//! // [7, 9] and [7, 8, 1]
//! ```

pub mod builder;
pub mod config;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod grover;
pub mod layout;
pub mod problem;
pub mod solver;

pub use builder::CircuitBuilder;
pub use config::{DecodeConfig, SolverConfig};
pub use decoder::{DecodeMode, Decoder, SolutionCandidate, decode_bitstring, encode_subset};
pub use error::{CoreError, CoreResult};
pub use layout::RegisterLayout;
pub use problem::ProblemInstance;
pub use solver::QuantumSubsetSum;
