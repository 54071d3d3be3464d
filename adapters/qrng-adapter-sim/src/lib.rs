//! QRNG Local Statevector Simulator
//!
//! A [`Backend`](qrng_hal::Backend) that executes circuits by exact
//! statevector evolution and draws measurement outcomes from the resulting
//! Born-rule distribution.
//!
//! The state is evolved once per job; all shots are sampled from the final
//! distribution. Circuits must therefore measure each qubit only after its
//! last gate.
//!
//! # Memory
//!
//! | Qubits | Statevector |
//! |--------|-------------|
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//! | 30 | ~16 GB (upper limit) |
//!
//! # Example
//!
//! ```ignore
//! use qrng_adapter_sim::SimulatorBackend;
//! use qrng_hal::Backend;
//! use qrng_ir::Circuit;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let job_id = backend.submit(&Circuit::bell()?, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//! // Only "00" and "11"
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS, SimulatorBackend};
pub use statevector::{OutcomeSampler, Statevector};
