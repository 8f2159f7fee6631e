//! Local Statevector Simulator
//!
//! A local backend that evolves the full statevector once per job and then
//! draws the requested shots from the final distribution.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, see [`SimulatorBackend::exact_probabilities`]
//! - **All Standard Gates**: every gate in `qss-ir`, including multi-controlled X
//! - **Reproducible Sampling**: optional seed via `BackendConfig` `extra.seed`
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! # Example
//!
//! ```ignore
//! use qss_adapter_sim::SimulatorBackend;
//! use qss_hal::Backend;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let job_id = backend.submit(&circuit, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("Results: {:?}", result.counts);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
