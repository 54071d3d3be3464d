//! QRNG Hardware Abstraction Layer
//!
//! A uniform interface to anything that can execute a circuit a number of
//! times and report how often each measurement outcome occurred.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] describing qubit limits and the supported gate set
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Bitstring convention
//!
//! Outcome keys in [`Counts`] have one character per classical bit, with
//! classical bit 0 as the **rightmost** character (OpenQASM 3 convention).
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qrng_hal::Backend;
//! use qrng_adapter_sim::SimulatorBackend;
//! use qrng_ir::Circuit;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::bell()?;
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     for (bitstring, count) in result.counts.sorted() {
//!         println!("{bitstring}: {count}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
